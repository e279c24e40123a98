use std::env;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

use authchain::chain::ChainedAuthenticationManager;
use authchain::config::{self, ChainConfig};
use authchain::error::{AuthChainError, Result};

const AUTHCHAIN_PASSWORD_ENV: &str = "AUTHCHAIN_PASSWORD";
const AUTHCHAIN_NON_INTERACTIVE_ENV: &str = "AUTHCHAIN_NON_INTERACTIVE";

/// Check if we are in non-interactive mode.
/// Returns true if stdin is not a TTY or AUTHCHAIN_NON_INTERACTIVE=1 is set.
pub fn is_non_interactive() -> bool {
    if env::var(AUTHCHAIN_NON_INTERACTIVE_ENV)
        .map(|v| v == "1")
        .unwrap_or(false)
    {
        return true;
    }
    !io::stdin().is_terminal()
}

/// Resolve the config path from `--config`/`AUTHCHAIN_CONFIG` or the default location.
pub fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config::default_path(),
    }
}

/// Load the chain config and assemble a manager from it.
pub fn load_manager(explicit: Option<&Path>) -> Result<ChainedAuthenticationManager> {
    let path = config_path(explicit)?;
    let chain = ChainConfig::load(&path)?.build()?;
    tracing::debug!(path = %path.display(), entries = chain.len(), "chain assembled");
    Ok(ChainedAuthenticationManager::new(chain))
}

/// Read a password. Tries in order:
/// 1. stdin, when `from_stdin` is set
/// 2. AUTHCHAIN_PASSWORD env var
/// 3. Interactive prompt (only if TTY is available)
pub fn read_password(from_stdin: bool, prompt: &str, confirm: bool) -> Result<Zeroizing<String>> {
    if from_stdin {
        let mut value = Zeroizing::new(String::new());
        io::stdin()
            .read_to_string(&mut value)
            .map_err(|e| AuthChainError::Other(format!("Failed to read from stdin: {}", e)))?;
        // Trim trailing newline (common when piping echo)
        let trimmed = value.trim_end_matches(&['\r', '\n'][..]).len();
        value.truncate(trimmed);
        return Ok(value);
    }

    if let Ok(password) = env::var(AUTHCHAIN_PASSWORD_ENV) {
        return Ok(Zeroizing::new(password));
    }

    if is_non_interactive() {
        return Err(AuthChainError::Other(
            "No password provided. Use --password-stdin or set AUTHCHAIN_PASSWORD.".into(),
        ));
    }

    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm password", "Passwords don't match");
    }
    let password = input
        .interact()
        .map_err(|e| AuthChainError::Other(format!("Failed to read password: {}", e)))?;
    Ok(Zeroizing::new(password))
}
