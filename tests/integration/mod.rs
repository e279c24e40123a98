mod cli_test;
mod error_test;
mod json_test;
mod validate_test;

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use authchain::provider::password::hash_password;
use tempfile::TempDir;

pub fn authchain_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("authchain").unwrap();
    cmd.env("HOME", home.path());
    cmd.env("AUTHCHAIN_NON_INTERACTIVE", "1");
    cmd.env_remove("AUTHCHAIN_CONFIG");
    cmd.env_remove("AUTHCHAIN_PASSWORD");
    cmd.env_remove("AUTHCHAIN_LOG");
    cmd
}

/// Internal users first, admin grants on success, a directory fallback on failure.
pub fn standard_config() -> String {
    format!(
        r#"
[providers.internal]
type = "static_users"

[providers.internal.users.alice]
password = "{alice}"
authorities = ["ROLE_USER"]

[providers.internal.users.admin-bob]
password = "{bob}"
authorities = ["ROLE_USER"]

[providers.internal.users.mallory]
password = "{mallory}"
authorities = ["ROLE_USER"]
enabled = false

[providers.admins]
type = "grant_authorities"

[[providers.admins.rules]]
principal = "admin-*"
authorities = ["ROLE_ADMIN"]

[providers.directory]
type = "static_users"

[providers.directory.users.carol]
password = "{carol}"
authorities = ["ROLE_DIRECTORY"]

[[chain]]
provider = "internal"

[[chain]]
provider = "admins"
required = "ifPreviousTrue"

[[chain]]
provider = "directory"
required = "ifPreviousFalse"
"#,
        alice = hash_password("alice-pw").unwrap(),
        bob = hash_password("bob-pw").unwrap(),
        mallory = hash_password("mallory-pw").unwrap(),
        carol = hash_password("carol-pw").unwrap(),
    )
}

/// Write a config into the default location (~/.authchain/chain.toml).
pub fn install_config(home: &TempDir, content: &str) -> PathBuf {
    let dir = home.path().join(".authchain");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("chain.toml");
    fs::write(&path, content).unwrap();
    path
}

/// Write a config to an arbitrary file under the temp dir.
pub fn write_config(home: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = home.path().join(name);
    fs::write(&path, content).unwrap();
    path
}
