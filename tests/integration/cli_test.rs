use predicates::prelude::*;
use tempfile::TempDir;

use super::authchain_cmd;
use authchain::provider::password::verify_password;

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    authchain_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("authentication chain"));
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    authchain_cmd(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("authchain"));
}

#[test]
fn test_hash_password_from_stdin() {
    let home = TempDir::new().unwrap();
    let output = authchain_cmd(&home)
        .args(["hash-password", "--password-stdin"])
        .write_stdin("hunter2\n")
        .output()
        .unwrap();

    assert!(output.status.success());
    let hash = String::from_utf8(output.stdout).unwrap();
    let hash = hash.trim();
    assert!(hash.starts_with("hmac-sha256$"));
    assert!(verify_password("hunter2", hash).unwrap());
    assert!(!verify_password("hunter2\n", hash).unwrap());
}

#[test]
fn test_hash_password_from_env() {
    let home = TempDir::new().unwrap();
    let output = authchain_cmd(&home)
        .args(["hash-password"])
        .env("AUTHCHAIN_PASSWORD", "from-env")
        .output()
        .unwrap();

    assert!(output.status.success());
    let hash = String::from_utf8(output.stdout).unwrap();
    assert!(verify_password("from-env", hash.trim()).unwrap());
}

#[test]
fn test_hash_password_rejects_empty() {
    let home = TempDir::new().unwrap();
    authchain_cmd(&home)
        .args(["hash-password", "--password-stdin"])
        .write_stdin("\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_non_interactive_without_password_fails() {
    let home = TempDir::new().unwrap();
    authchain_cmd(&home)
        .args(["hash-password"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No password provided"));
}
