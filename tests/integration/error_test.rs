use predicates::prelude::*;
use tempfile::TempDir;

use super::{authchain_cmd, install_config, write_config};

#[test]
fn test_exit_code_missing_config() {
    let home = TempDir::new().unwrap();
    let output = authchain_cmd(&home)
        .args(["validate"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(5)); // Config
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to read"));
}

#[test]
fn test_exit_code_bogus_condition() {
    let home = TempDir::new().unwrap();
    install_config(
        &home,
        r#"
[providers.a]
type = "grant_authorities"

[[chain]]
provider = "a"

[[chain]]
provider = "a"
required = "bogus"
"#,
    );

    authchain_cmd(&home)
        .args(["check", "alice"])
        .env("AUTHCHAIN_PASSWORD", "pw")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Invalid chain configuration"))
        .stderr(predicate::str::contains("bogus"));
}

#[test]
fn test_exit_code_unknown_provider() {
    let home = TempDir::new().unwrap();
    install_config(&home, "[[chain]]\nprovider = \"ldap\"\n");

    authchain_cmd(&home)
        .args(["validate"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Provider not found: ldap"));
}

#[test]
fn test_exit_code_bad_password_hash() {
    let home = TempDir::new().unwrap();
    let path = write_config(
        &home,
        "bad-hash.toml",
        r#"
[providers.internal]
type = "static_users"

[providers.internal.users.alice]
password = "not-a-hash"

[[chain]]
provider = "internal"
"#,
    );

    authchain_cmd(&home)
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("user 'alice' in provider 'internal'"));
}

#[test]
fn test_exit_code_malformed_toml() {
    let home = TempDir::new().unwrap();
    install_config(&home, "[[chain]\nprovider = ");

    authchain_cmd(&home)
        .args(["validate"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Invalid chain config"));
}
