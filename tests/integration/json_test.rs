use authchain::provider::password::hash_password;
use tempfile::TempDir;

use super::{authchain_cmd, install_config, standard_config};

fn setup() -> TempDir {
    let home = TempDir::new().unwrap();
    install_config(&home, &standard_config());
    home
}

#[test]
fn test_check_json() {
    let home = setup();
    let output = authchain_cmd(&home)
        .args(["check", "admin-bob", "--password-stdin", "--json"])
        .write_stdin("bob-pw")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["principal"], "admin-bob");
    assert_eq!(json["authenticated"], true);
    assert_eq!(json["authorities"], serde_json::json!(["ROLE_ADMIN", "ROLE_USER"]));
    assert!(json.get("steps").is_none());
}

#[test]
fn test_check_json_with_trace() {
    let home = setup();
    let output = authchain_cmd(&home)
        .args(["check", "carol", "--password-stdin", "--json", "--trace"])
        .write_stdin("carol-pw")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 3);
    assert_eq!(steps[0]["provider"], "internal");
    assert_eq!(steps[0]["outcome"]["status"], "rejected");
    assert_eq!(steps[0]["outcome"]["code"], "bad_credentials");
    assert_eq!(steps[1]["outcome"]["status"], "skipped");
    assert_eq!(steps[2]["condition"], "ifPreviousFalse");
    assert_eq!(steps[2]["outcome"]["status"], "succeeded");
}

#[test]
fn test_json_error_format() {
    let home = setup();
    let output = authchain_cmd(&home)
        .args(["check", "alice", "--password-stdin", "--json"])
        .write_stdin("wrong")
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let json: serde_json::Value = serde_json::from_str(stderr.trim()).unwrap();
    assert_eq!(json["error"]["code"], "bad_credentials");
    assert_eq!(json["error"]["exit_code"].as_i64(), Some(2));
}

#[test]
fn test_validate_json() {
    let home = setup();
    let output = authchain_cmd(&home)
        .args(["validate", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["provider"], "internal");
    assert_eq!(entries[0]["condition"], "always");
    assert_eq!(entries[1]["condition"], "ifPreviousTrue");
    assert!(json["path"].as_str().unwrap().ends_with("chain.toml"));
}

#[test]
fn test_hash_password_json() {
    let home = TempDir::new().unwrap();
    let output = authchain_cmd(&home)
        .args(["hash-password", "--password-stdin", "--json"])
        .write_stdin("pw")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(json["hash"].as_str().unwrap().starts_with("hmac-sha256$"));
}

/// A single entry that carries a condition it can never be gated on.
fn conditional_head_config() -> String {
    format!(
        r#"
[providers.internal]
type = "static_users"

[providers.internal.users.alice]
password = "{alice}"
authorities = ["ROLE_USER"]

[[chain]]
provider = "internal"
required = "ifPreviousTrue"
"#,
        alice = hash_password("alice-pw").unwrap(),
    )
}

#[test]
fn test_validate_json_reports_head_as_always() {
    let home = TempDir::new().unwrap();
    install_config(&home, &conditional_head_config());

    let output = authchain_cmd(&home)
        .args(["validate", "--json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["condition"], "always");
}

#[test]
fn test_check_json_trace_reports_head_as_always() {
    let home = TempDir::new().unwrap();
    install_config(&home, &conditional_head_config());

    let output = authchain_cmd(&home)
        .args(["check", "alice", "--password-stdin", "--json", "--trace"])
        .write_stdin("alice-pw")
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = json["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0]["condition"], "always");
    assert_eq!(steps[0]["outcome"]["status"], "succeeded");
}
