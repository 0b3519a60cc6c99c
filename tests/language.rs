use std::fs;

use lair::{
    error::{ErrorKind, LairError},
    interpreter::{
        evaluator::function::builtin::equals,
        value::core::{TRUE, Value},
    },
    run,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn sample_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "lair"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out")).unwrap_or_default();

        count += 1;
        match output_of(&source) {
            Ok(output) => assert_eq!(output, expected, "unexpected output from {path:?}"),
            Err(e) => panic!("Script {path:?} failed:\n{source}\nError: {e}"),
        }
    }

    assert!(count > 0, "No sample scripts found in tests/scripts");
}

fn output_of(src: &str) -> Result<String, LairError> {
    let mut out = Vec::new();
    run(src, &mut out)?;
    Ok(String::from_utf8(out).expect("output is not UTF-8"))
}

fn assert_output(src: &str, expected: &str) {
    match output_of(src) {
        Ok(output) => assert_eq!(output, expected),
        Err(e) => panic!("Script failed: {e}"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match run(src, &mut Vec::<u8>::new()) {
        Ok(_) => panic!("Script succeeded but was expected to fail"),
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
    }
}

fn last_value(src: &str) -> Option<Value> {
    run(src, &mut Vec::<u8>::new()).unwrap_or_else(|e| panic!("Script failed: {e}"))
}

#[test]
fn addition_of_numbers_and_strings() {
    assert_output("! println + 2 3", "5\n");
    assert_output("! println + \"ab\" \"cd\"", "abcd\n");
    assert_eq!(last_value("! + 2 3"), Some(Value::Num(5)));
    assert_eq!(last_value("! + \"ab\" \"cd\""), Some(Value::from("abcd")));
}

#[test]
fn addition_of_mixed_kinds_is_error() {
    assert_failure("! + 1 \"a\"", ErrorKind::Runtime);
    assert_failure("! + \"a\" 1", ErrorKind::Runtime);
}

#[test]
fn subtraction_only_takes_numbers() {
    assert_output("! println - 10 3", "7\n");
    assert_output("! println - 3 10", "-7\n");
    assert_failure("! - \"b\" \"a\"", ErrorKind::Runtime);
}

#[test]
fn overflow_is_error() {
    assert_failure("! + 9223372036854775807 1", ErrorKind::Runtime);
    assert_failure("! - - 0 9223372036854775807 2", ErrorKind::Runtime);
}

#[test]
fn literal_too_large_is_parse_error() {
    assert_failure("! println 99999999999999999999", ErrorKind::Parse);
}

#[test]
fn equality_returns_canonical_booleans() {
    let first = last_value("! = 4 4").expect("no value");
    let second = last_value("! = \"x\" \"x\"").expect("no value");

    for value in [first, second] {
        match value {
            Value::Bool(b) => assert!(std::ptr::eq(b, &TRUE)),
            other => panic!("expected a bool, got {other:?}"),
        }
    }
    assert!(last_value("! = 4 5").is_some_and(|v| v.is_false()));
    assert!(last_value("! = true true").is_some_and(|v| v.is_true()));
    assert!(last_value("! = true false").is_some_and(|v| v.is_false()));
}

#[test]
fn equality_of_strings() {
    assert!(last_value("! = \"abc\" \"abc\"").is_some_and(|v| v.is_true()));
    assert!(last_value("! = \"abc\" \"abd\"").is_some_and(|v| v.is_false()));
    assert!(last_value("! = \"ab\" \"abc\"").is_some_and(|v| v.is_false()));
    assert!(last_value("! = \"\" \"\"").is_some_and(|v| v.is_true()));
}

#[test]
fn string_equality_stops_at_embedded_nul() {
    // Known edge case: strings compare as NUL-terminated byte strings, so
    // anything after an embedded NUL is ignored.
    let lhs = Some(Value::from("a\0b"));
    let rhs = Some(Value::from("a\0c"));
    let result = equals(&[lhs, rhs], 1, &mut Vec::<u8>::new()).expect("comparison failed");

    assert!(result.is_some_and(|v| v.is_true()));
}

#[test]
fn equality_of_mixed_kinds_is_error() {
    assert_failure("! = 1 \"1\"", ErrorKind::Runtime);
    assert_failure("! = true 1", ErrorKind::Runtime);
}

#[test]
fn rendering_of_values() {
    assert_output("! println = 1 1", "<bool: true>\n");
    assert_output("! println false", "<bool: false>\n");
    assert_output("! println + \"n=\" str 5", "n=5\n");
    assert_output("! print 1\n! print 2", "12");
    assert_output("! println \"tab\\there\"", "tab\there\n");
    assert_eq!(last_value("id x\n  : x"), Some(Value::Function("id".into())));
}

#[test]
fn false_conditional_at_end_of_body_is_syntax_error() {
    assert_failure("nothing\n  ? = 1 2\n    : 1\n! println nothing", ErrorKind::Syntax);

    let src = "f n\n  ? = n 0\n    ? = 1 2\n      : 1\n    : 2\n! println f 0\n! println f 1";
    let mut out = Vec::new();
    let result = run(src, &mut out);

    assert!(result.is_err_and(|e| e.kind() == ErrorKind::Syntax));
    assert_eq!(out, b"2\n");
}

#[test]
fn assignment_round_trip() {
    assert_output("! x : + 1 2\n! print x", "3");
}

#[test]
fn rebinding_is_error() {
    assert_failure("! x : 1\n! x : 2", ErrorKind::Runtime);
    assert_failure("! true : 1", ErrorKind::Runtime);
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    assert_output("# header\n\n! println 1 # trailing note\n\n", "1\n");
}

#[test]
fn empty_program_does_nothing() {
    assert_eq!(last_value(""), None);
    assert_eq!(last_value("# only a comment"), None);
}

#[test]
fn user_function_binds_arguments_positionally() {
    let src = "sub a b\n  : - a b\n! println sub 10 3\n! println sub 3 10";
    assert_output(src, "7\n-7\n");
}

#[test]
fn user_function_with_too_few_arguments_is_error() {
    assert_failure("sub a b\n  : - a b\n! println sub 10", ErrorKind::Runtime);
    assert_failure("! println + 1", ErrorKind::Runtime);
}

#[test]
fn call_arguments_stop_at_end_of_line() {
    let src = "pair a b\n  : + a b\n! x : pair 1\n! println x";
    assert_failure(src, ErrorKind::Runtime);
}

#[test]
fn nested_calls_as_arguments() {
    let src = "double x\n  : + x x\n! println ! double ! double 5\n! println double double 2";
    assert_output(src, "20\n8\n");
}

#[test]
fn function_locals_are_fresh_per_call() {
    let src = "inc a\n  b : + a 1\n  : b\n! println inc 1\n! println inc 5";
    assert_output(src, "2\n6\n");
}

#[test]
fn zero_argument_function_runs_in_defining_scope() {
    let src = "answer\n  : 42\n! println answer\n! println + answer 1";
    assert_output(src, "42\n43\n");
}

#[test]
fn scoping_is_lexical() {
    let src = "show x\n  : y\nouter y\n  : show 1\n! println outer 5";
    assert_failure(src, ErrorKind::Runtime);

    let src = "inner\n  : y\nouter y\n  : inner\n! println outer 5";
    assert_failure(src, ErrorKind::Runtime);
}

#[test]
fn conditional_true_runs_block_and_skips_else() {
    let src = "check n\n  ? = n 0\n    ! println \"then\"\n  ! println \"else\"\n! check 0\n! \
               check 1";
    assert_output(src, "then\nelse\n");
}

#[test]
fn conditional_false_skips_nested_blocks() {
    let src = "f n
  ? = n 0
    ? = 1 1
      ! println \"deep\"
    ! println \"inner\"
  ! println \"after\"
! f 1
! f 0";
    assert_output(src, "after\ndeep\n");
}

#[test]
fn conditional_on_bindings() {
    let src = "yes b\n  ? b\n    : \"yes\"\n  : \"no\"\n! println yes true\n! println yes false";
    assert_output(src, "yes\nno\n");
}

#[test]
fn conditional_without_block_is_syntax_error() {
    assert_failure("f n\n  ? = n 0\n  : 1\n! f 0", ErrorKind::Syntax);
    assert_failure("f n\n  ? = n 0\n! f 0", ErrorKind::Syntax);
}

#[test]
fn conditional_on_non_boolean_is_error() {
    assert_failure("f n\n  ? n\n    : 1\n! f 0", ErrorKind::Runtime);
}

#[test]
fn return_without_operand_is_syntax_error() {
    assert_failure("f n\n  :\n! f 0", ErrorKind::Syntax);
}

#[test]
fn undefined_atom_is_error() {
    assert_failure("! println y", ErrorKind::Runtime);
}

#[test]
fn unknown_function_is_error() {
    assert_failure("! nope 1", ErrorKind::Runtime);
    assert_failure("! % 4 2", ErrorKind::Runtime);
}

#[test]
fn redefinition_is_error() {
    assert_failure("f x\n  : x\nf y\n  : y", ErrorKind::Runtime);
    assert_failure("print x\n  : x", ErrorKind::Runtime);
}

#[test]
fn parse_errors_abort_before_running() {
    assert_failure("! println 1\n! println \"open", ErrorKind::Parse);
    assert_failure("f x x\n  : x", ErrorKind::Parse);
    assert_failure("f f\n  : f", ErrorKind::Parse);
}

#[test]
fn first_error_stops_the_run() {
    let mut out = Vec::new();
    let result = run("! println 1\n! println y\n! println 2", &mut out);

    assert!(result.is_err());
    assert_eq!(out, b"1\n");
}

#[test]
fn conditional_condition_must_end_its_line() {
    assert_failure("f n\n  ? = n 0 1\n    : 1\n! f 0", ErrorKind::Syntax);
}

#[test]
fn deep_recursion_succeeds() {
    let src = "count n\n  ? = n 0\n    : \"done\"\n  : count - n 1\n! println count 3000";
    assert_output(src, "done\n");
}

#[test]
fn runaway_recursion_is_runtime_error() {
    let src = "count n\n  ? = n 0\n    : 0\n  : count - n 1\n! println count 100000";
    assert_failure(src, ErrorKind::Runtime);

    assert_failure("forever\n  : forever\n! forever", ErrorKind::Runtime);
}
