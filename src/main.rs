use std::fs;

use clap::Parser;
use lair::{execute, interpreter::lexer::tokenize};
use tracing_subscriber::EnvFilter;

/// lair runs programs written in a small, indentation-sensitive prefix-call
/// language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Treat the argument as source code instead of a path to a script.
    #[arg(short, long)]
    eval: bool,

    /// Print the token stream before running.
    #[arg(short, long)]
    tokens: bool,

    /// Log more (-v for debug, -vv for trace). `RUST_LOG` overrides this.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    contents: String,
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    let source = if args.eval {
        args.contents
    } else {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("ERR_RUNTIME: Could not load file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    };

    if args.tokens && let Ok(tokens) = tokenize(&source) {
        for token in &tokens {
            println!("{token}");
        }
    }

    if let Err(e) = execute(&source) {
        eprintln!("{}: {e}", e.kind());
        std::process::exit(1);
    }
}

/// Installs the log subscriber. Logs go to stderr so program output stays
/// clean.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(format!("lair={level}")));

    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_target(true)
                             .with_writer(std::io::stderr)
                             .init();
}
