use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::tempdir;

fn bin() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("sealkv"))
}

fn with_store(password: &str, store: &Path) -> Command {
    let mut cmd = bin();
    cmd.env("SEALKV_PASSWORD", password)
        .env_remove("SEALKV_STORE")
        .arg("--store")
        .arg(store);
    cmd
}

#[test]
fn init_creates_store_file() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("store initialized"));

    assert!(store.exists());
}

#[test]
fn put_and_get_roundtrip() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();

    with_store("pw", &store)
        .arg("put")
        .arg("A")
        .arg("B")
        .assert()
        .success()
        .stdout(predicate::str::contains("stored value"));

    with_store("pw", &store)
        .arg("get")
        .arg("A")
        .assert()
        .success()
        .stdout(predicate::str::diff("B\n"));
}

#[test]
fn put_overwrites_value() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();
    with_store("pw", &store).args(["put", "A", "B"]).assert().success();
    with_store("pw", &store).args(["put", "A", "C"]).assert().success();

    with_store("pw", &store)
        .args(["get", "A"])
        .assert()
        .success()
        .stdout(predicate::str::diff("C\n"));
}

#[test]
fn value_is_not_stored_in_clear() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();
    with_store("pw", &store)
        .args(["put", "A", "plaintext-marker"])
        .assert()
        .success();

    let raw = std::fs::read_to_string(&store).unwrap();
    assert!(!raw.contains("plaintext-marker"));
}

#[test]
fn wrong_password_fails() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();
    with_store("pw", &store).args(["put", "A", "B"]).assert().success();

    with_store("wrong_pw", &store)
        .args(["get", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid password or corrupted data"));
}

#[test]
fn init_fails_if_store_exists() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();

    with_store("pw", &store)
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn actions_fail_if_store_not_initialized() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store)
        .args(["get", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn delete_value_works() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();
    with_store("pw", &store).args(["put", "A", "B"]).assert().success();

    with_store("pw", &store)
        .args(["delete", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    with_store("pw", &store)
        .args(["get", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("key not found"));
}

#[test]
fn delete_missing_key_succeeds() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();

    with_store("pw", &store)
        .args(["delete", "missing"])
        .assert()
        .success();
}

#[test]
fn password_from_stdin() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    with_store("pw", &store).arg("init").assert().success();
    with_store("pw", &store).args(["put", "A", "B"]).assert().success();

    bin()
        .env_remove("SEALKV_PASSWORD")
        .env_remove("SEALKV_STORE")
        .arg("--store")
        .arg(&store)
        .args(["get", "A"])
        .write_stdin("pw\n")
        .assert()
        .success()
        .stdout(predicate::str::diff("B\n"));
}

#[test]
fn init_with_mismatched_confirmation_fails() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("test.json");

    bin()
        .env_remove("SEALKV_PASSWORD")
        .env_remove("SEALKV_STORE")
        .arg("--store")
        .arg(&store)
        .arg("init")
        .write_stdin("pw1\npw2\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("passwords do not match"));

    assert!(!store.exists());
}

#[test]
fn store_path_from_env() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("env.json");

    bin()
        .env("SEALKV_PASSWORD", "pw")
        .env("SEALKV_STORE", &store)
        .arg("init")
        .assert()
        .success();

    assert!(store.exists());
}
