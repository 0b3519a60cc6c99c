use lair::util::tst::{TstError, TstMap};
use pretty_assertions::assert_eq;

#[test]
fn insert_then_get() {
    let keys = ["print", "println", "p", "str", "+", "-", "=", "x", "xylophone", "a_b"];
    let mut map = TstMap::new();

    for (i, key) in keys.iter().enumerate() {
        map.insert(key, i).unwrap();
    }
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(map.get(key), Some(&i), "lookup of {key}");
    }

    assert_eq!(map.len(), keys.len());
    assert_eq!(map.get("pr"), None);
    assert_eq!(map.get("printlnx"), None);
    assert_eq!(map.get(""), None);
}

#[test]
fn duplicate_insert_keeps_original() {
    let mut map = TstMap::new();
    map.insert("x", 1).unwrap();

    assert_eq!(map.insert("x", 2), Err(TstError::DuplicateKey("x".to_string())));
    assert_eq!(map.get("x"), Some(&1));
    assert_eq!(map.len(), 1);
}

#[test]
fn empty_key_is_rejected() {
    let mut map = TstMap::new();

    assert_eq!(map.insert("", 0), Err(TstError::EmptyKey));
    assert!(map.is_empty());
}

#[test]
fn remove_clears_only_the_value() {
    let mut map = TstMap::new();
    map.insert("print", 1).unwrap();
    map.insert("println", 2).unwrap();

    assert_eq!(map.remove("print"), Some(1));
    assert_eq!(map.remove("print"), None);
    assert_eq!(map.get("println"), Some(&2));
    assert!(!map.contains_key("print"));

    map.insert("print", 3).unwrap();
    assert_eq!(map.get("print"), Some(&3));
}

#[test]
fn destroy_visits_every_value_once() {
    let mut map = TstMap::new();
    let keys: Vec<String> = (0..200).map(|i| format!("key{i}")).collect();
    for key in &keys {
        map.insert(key, key.clone()).unwrap();
    }

    let mut seen = Vec::new();
    let released = map.destroy_with(|value| seen.push(value));
    seen.sort();
    let mut expected = keys.clone();
    expected.sort();

    assert_eq!(released, 200);
    assert_eq!(seen, expected);
}

#[test]
fn long_keys_do_not_exhaust_the_stack() {
    let key = "a".repeat(200_000);
    let mut map = TstMap::new();
    map.insert(&key, 1).unwrap();

    assert_eq!(map.get(&key), Some(&1));
    drop(map);

    let mut map = TstMap::new();
    map.insert(&key, 2).unwrap();
    assert_eq!(map.destroy_with(drop), 1);
}
