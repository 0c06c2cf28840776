// SPDX-License-Identifier: Apache-2.0

use tempfile::tempdir;
use walletmatrix_store::{normalize_email, NewsletterStore, StoreErrorCode};

#[test]
fn subscribe_is_idempotent() {
    let dir = tempdir().expect("tmp");
    let store = NewsletterStore::open(&dir.path().join("news.sqlite")).expect("open");

    assert!(store.subscribe("alice@example.org").expect("first"));
    assert!(
        !store.subscribe("alice@example.org").expect("second"),
        "re-subscribing must not insert a second row"
    );
    assert_eq!(store.count().expect("count"), 1);
}

#[test]
fn subscribe_normalizes_case_and_surrounding_whitespace() {
    let dir = tempdir().expect("tmp");
    let store = NewsletterStore::open(&dir.path().join("news.sqlite")).expect("open");

    assert!(store.subscribe("  Alice@Example.ORG ").expect("first"));
    assert!(!store.subscribe("alice@example.org").expect("second"));
    assert_eq!(store.export().expect("export"), ["alice@example.org"]);
}

#[test]
fn unsubscribe_reports_whether_a_row_was_removed() {
    let dir = tempdir().expect("tmp");
    let store = NewsletterStore::open(&dir.path().join("news.sqlite")).expect("open");

    store.subscribe("bob@example.org").expect("subscribe");
    assert!(store.unsubscribe("bob@example.org").expect("remove"));
    assert!(!store.unsubscribe("bob@example.org").expect("repeat"));
    assert_eq!(store.count().expect("count"), 0);
}

#[test]
fn export_is_sorted_by_address() {
    let dir = tempdir().expect("tmp");
    let store = NewsletterStore::open(&dir.path().join("news.sqlite")).expect("open");

    store.subscribe("zoe@example.org").expect("zoe");
    store.subscribe("amir@example.org").expect("amir");
    store.subscribe("mika@example.org").expect("mika");

    assert_eq!(
        store.export().expect("export"),
        ["amir@example.org", "mika@example.org", "zoe@example.org"]
    );
}

#[test]
fn subscriptions_survive_reopen() {
    let dir = tempdir().expect("tmp");
    let path = dir.path().join("news.sqlite");
    {
        let store = NewsletterStore::open(&path).expect("open");
        store.subscribe("carol@example.org").expect("subscribe");
    }
    let reopened = NewsletterStore::open(&path).expect("reopen");
    assert_eq!(reopened.count().expect("count"), 1);
}

#[test]
fn malformed_addresses_are_rejected() {
    for raw in [
        "",
        "   ",
        "no-at-sign.example.org",
        "@example.org",
        "carol@",
        "carol@@example.org",
        "carol@example",
        "carol smith@example.org",
    ] {
        let err = normalize_email(raw).expect_err(raw);
        assert_eq!(err.code, StoreErrorCode::Validation, "input {raw:?}");
    }
}

#[test]
fn rejecting_an_address_does_not_touch_the_table() {
    let dir = tempdir().expect("tmp");
    let store = NewsletterStore::open(&dir.path().join("news.sqlite")).expect("open");

    store.subscribe("not an email").expect_err("invalid");
    assert_eq!(store.count().expect("count"), 0);
}
