use predicates::prelude::*;
use tempfile::TempDir;

use super::{authchain_cmd, install_config, standard_config, write_config};

#[test]
fn test_validate_lists_entries() {
    let home = TempDir::new().unwrap();
    install_config(&home, &standard_config());

    authchain_cmd(&home)
        .args(["validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("internal"))
        .stdout(predicate::str::contains("ifPreviousTrue"))
        .stdout(predicate::str::contains("ifPreviousFalse"))
        .stderr(predicate::str::contains("is valid (3 entries)"));
}

#[test]
fn test_validate_empty_chain() {
    let home = TempDir::new().unwrap();
    let path = write_config(&home, "empty.toml", "");

    authchain_cmd(&home)
        .args(["validate", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stderr(predicate::str::contains("has no entries"));
}

#[test]
fn test_validate_rejects_missing_required() {
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
"#,
    );

    authchain_cmd(&home)
        .args(["validate"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("missing 'required'"));
}
