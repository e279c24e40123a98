use authchain::error::{AuthChainError, Result};
use authchain::provider::password::hash_password;

use crate::cli::common;
use crate::cli::json_output::HashPasswordResponse;

pub fn run(password_stdin: bool, json: bool) -> Result<()> {
    let password = common::read_password(password_stdin, "Password to hash", true)?;
    if password.is_empty() {
        return Err(AuthChainError::Other("Password must not be empty".into()));
    }

    let hash = hash_password(&password)?;
    if json {
        let response = HashPasswordResponse { hash };
        println!(
            "{}",
            serde_json::to_string(&response)
                .map_err(|e| AuthChainError::Serialization(e.to_string()))?
        );
    } else {
        println!("{}", hash);
    }
    Ok(())
}
