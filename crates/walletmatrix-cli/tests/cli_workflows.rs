// SPDX-License-Identifier: Apache-2.0

use assert_cmd::Command;
use serde_json::Value;

#[test]
fn seed_then_validate_round_trips() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["seed", "--out-dir"])
        .arg(tmp.path())
        .output()
        .expect("run seed");
    assert!(out.status.success());
    assert!(tmp.path().join("features").join("features.json").is_file());
    assert!(tmp.path().join("wallets").join("phoenix.json").is_file());
    assert!(tmp.path().join("wallets").join("zeus.json").is_file());

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["--json", "validate", "--wallets-dir"])
        .arg(tmp.path().join("wallets"))
        .arg("--features-dir")
        .arg(tmp.path().join("features"))
        .output()
        .expect("run validate");
    assert!(out.status.success());
    let payload: Value = serde_json::from_slice(&out.stdout).expect("validate json");
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["wallets"], 3);
    assert_eq!(payload["features"], 4);
    assert_eq!(payload["associations"], 12);
    assert_eq!(payload["warnings"].as_array().map(Vec::len), Some(0));
}

#[test]
fn inspect_falls_back_to_the_seed_dataset() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["inspect", "--wallets-dir"])
        .arg(tmp.path().join("missing-wallets"))
        .arg("--features-dir")
        .arg(tmp.path().join("missing-features"))
        .output()
        .expect("run inspect");
    assert!(out.status.success());
    let views: Value = serde_json::from_slice(&out.stdout).expect("inspect json");
    let rows = views.as_array().expect("view array");
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0]["wallet"]["name"], "Phoenix");
    assert_eq!(rows[0]["features"].as_array().map(Vec::len), Some(4));
}

#[test]
fn inspect_filters_by_wallet_id_and_rejects_unknown_ids() {
    let tmp = tempfile::tempdir().expect("tempdir");

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["inspect", "--wallet-id", "2", "--wallets-dir"])
        .arg(tmp.path().join("missing"))
        .arg("--features-dir")
        .arg(tmp.path().join("missing"))
        .output()
        .expect("run inspect");
    assert!(out.status.success());
    let views: Value = serde_json::from_slice(&out.stdout).expect("inspect json");
    let rows = views.as_array().expect("view array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["wallet"]["name"], "Breez");

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["inspect", "--wallet-id", "99", "--wallets-dir"])
        .arg(tmp.path().join("missing"))
        .arg("--features-dir")
        .arg(tmp.path().join("missing"))
        .output()
        .expect("run inspect");
    assert_eq!(out.status.code(), Some(10));
    let stderr = String::from_utf8(out.stderr).expect("utf8 stderr");
    assert!(stderr.contains("does not exist"));
}

#[test]
fn validate_flags_unresolved_keys_with_a_distinct_exit_code() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let wallets = tmp.path().join("wallets");
    let features = tmp.path().join("features");
    std::fs::create_dir_all(&wallets).expect("wallets dir");
    std::fs::create_dir_all(&features).expect("features dir");
    std::fs::write(
        features.join("features.json"),
        r#"[{"id":"onChain","name":"On-Chain","type":"lightning"}]"#,
    )
    .expect("write features doc");
    std::fs::write(
        wallets.join("acme.json"),
        r#"{"name":"Acme","website":"https://acme.example.org","type":"lightning","features":{"onChain":"yes","mystery":"no"}}"#,
    )
    .expect("write wallet doc");

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["validate", "--wallets-dir"])
        .arg(&wallets)
        .arg("--features-dir")
        .arg(&features)
        .output()
        .expect("run validate");
    assert_eq!(out.status.code(), Some(3));
    let stdout = String::from_utf8(out.stdout).expect("utf8 stdout");
    assert!(stdout.contains("unresolved_key"));
    assert!(stdout.contains("wallets=1"));
}

#[test]
fn newsletter_export_lists_subscribers_in_order() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let db = tmp.path().join("subscriptions.sqlite");
    {
        let store = walletmatrix_store::NewsletterStore::open(&db).expect("open db");
        assert!(store.subscribe("zoe@example.org").expect("subscribe zoe"));
        assert!(store.subscribe("Amy@Example.org").expect("subscribe amy"));
    }

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["--json", "newsletter", "export", "--db"])
        .arg(&db)
        .output()
        .expect("run export");
    assert!(out.status.success());
    let emails: Vec<String> = serde_json::from_slice(&out.stdout).expect("export json");
    assert_eq!(emails, vec!["amy@example.org", "zoe@example.org"]);

    let out = Command::new(env!("CARGO_BIN_EXE_walletmatrix"))
        .args(["newsletter", "export", "--db"])
        .arg(&db)
        .output()
        .expect("run export");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).expect("utf8 stdout");
    assert_eq!(stdout, "amy@example.org\nzoe@example.org\n");
}
