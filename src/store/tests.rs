#![allow(clippy::unwrap_used)]

use super::*;

#[test]
fn test_get_missing_key() {
    let kv = KvStore::open_in_memory().unwrap();
    assert_eq!(kv.get("nope").unwrap(), None);
}

#[test]
fn test_set_and_get() {
    let kv = KvStore::open_in_memory().unwrap();
    kv.set("greeting", "hello").unwrap();
    assert_eq!(kv.get("greeting").unwrap().as_deref(), Some("hello"));
}

#[test]
fn test_set_overwrites() {
    let kv = KvStore::open_in_memory().unwrap();
    kv.set("k", "one").unwrap();
    kv.set("k", "two").unwrap();
    assert_eq!(kv.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn test_remove() {
    let kv = KvStore::open_in_memory().unwrap();
    kv.set("k", "v").unwrap();
    kv.remove("k").unwrap();
    assert_eq!(kv.get("k").unwrap(), None);
    // Removing again is a no-op
    kv.remove("k").unwrap();
}

#[test]
fn test_keys_like() {
    let kv = KvStore::open_in_memory().unwrap();
    kv.set("transactions_a@x.com", "[]").unwrap();
    kv.set("transactions_b@x.com", "[]").unwrap();
    kv.set("budgetLimits_a@x.com", "{}").unwrap();

    let keys = kv.keys_like("transactions_%").unwrap();
    assert_eq!(keys, vec!["transactions_a@x.com", "transactions_b@x.com"]);
}

#[test]
fn test_json_roundtrip() {
    let kv = KvStore::open_in_memory().unwrap();
    kv.set_json("nums", &vec![1, 2, 3]).unwrap();
    let back: Option<Vec<i32>> = kv.get_json("nums").unwrap();
    assert_eq!(back, Some(vec![1, 2, 3]));
}

#[test]
fn test_malformed_json_reads_as_absent() {
    let kv = KvStore::open_in_memory().unwrap();
    kv.set("nums", "this is not json {").unwrap();
    let back: Option<Vec<i32>> = kv.get_json("nums").unwrap();
    assert_eq!(back, None);
}

#[test]
fn test_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.db");
    {
        let kv = KvStore::open(&path).unwrap();
        kv.set("k", "v").unwrap();
    }
    let kv = KvStore::open(&path).unwrap();
    assert_eq!(kv.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn test_user_key_namespacing() {
    assert_eq!(
        user_key("transactions", "alice@example.com"),
        "transactions_alice@example.com"
    );
    assert_ne!(user_key("transactions", "a"), user_key("transactions", "b"));
}
