use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::chain::{Chain, ChainEntry};
use crate::error::{AuthChainError, Result};
use crate::provider::password::PasswordHash;
use crate::provider::{
    AuthenticationProvider, AuthorityGrantProvider, GrantRule, StaticUserProvider, UserRecord,
};

pub const AUTHCHAIN_CONFIG_ENV: &str = "AUTHCHAIN_CONFIG";

/// Chain configuration file format (~/.authchain/chain.toml).
///
/// Example:
/// ```toml
/// [providers.internal]
/// type = "static_users"
/// [providers.internal.users.alice]
/// password = "hmac-sha256$...$..."
/// authorities = ["ROLE_USER"]
///
/// [providers.admins]
/// type = "grant_authorities"
/// [[providers.admins.rules]]
/// principal = "admin-*"
/// authorities = ["ROLE_ADMIN"]
///
/// [[chain]]
/// provider = "internal"
///
/// [[chain]]
/// provider = "admins"
/// required = "ifPreviousTrue"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
    #[serde(default)]
    pub chain: Vec<EntryConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProviderConfig {
    StaticUsers {
        #[serde(default)]
        users: BTreeMap<String, UserConfig>,
    },
    GrantAuthorities {
        #[serde(default)]
        rules: Vec<RuleConfig>,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserConfig {
    /// Encoded hash, see `authchain hash-password`
    pub password: String,
    #[serde(default)]
    pub authorities: Vec<String>,
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    /// Glob matched against the principal
    pub principal: String,
    pub authorities: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryConfig {
    pub provider: String,
    /// "ifPreviousTrue" or "ifPreviousFalse"; optional on the first entry only
    pub required: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ChainConfig {
    /// Load a chain config from a path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AuthChainError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| AuthChainError::Config(format!("Invalid chain config: {}", e)))
    }

    /// Instantiate every provider and assemble the chain.
    ///
    /// All providers are built, including ones no entry references, so a bad
    /// password hash anywhere in the file is reported up front.
    pub fn build(&self) -> Result<Chain> {
        let mut providers: BTreeMap<&str, Arc<dyn AuthenticationProvider>> = BTreeMap::new();
        for (name, cfg) in &self.providers {
            providers.insert(name.as_str(), cfg.instantiate(name)?);
        }

        let mut entries = Vec::with_capacity(self.chain.len());
        for (index, entry) in self.chain.iter().enumerate() {
            let provider = providers
                .get(entry.provider.as_str())
                .cloned()
                .ok_or_else(|| AuthChainError::ProviderNotFound(entry.provider.clone()))?;

            let chain_entry = match (index, entry.required.as_deref()) {
                (0, None) => ChainEntry::always(provider),
                (0, Some(required)) => ChainEntry::with_condition(provider, required.parse()?),
                (_, Some(required)) => ChainEntry::new(provider, required)?,
                (_, None) => {
                    return Err(AuthChainError::InvalidChainConfiguration(format!(
                        "entry {} ('{}') is missing 'required'",
                        index, entry.provider
                    )))
                }
            };
            entries.push(chain_entry);
        }

        for name in providers.keys() {
            if !self.chain.iter().any(|e| e.provider == *name) {
                tracing::warn!(provider = name, "provider is defined but not used by the chain");
            }
        }

        Chain::new(entries)
    }
}

impl ProviderConfig {
    fn instantiate(&self, name: &str) -> Result<Arc<dyn AuthenticationProvider>> {
        match self {
            ProviderConfig::StaticUsers { users } => {
                let mut provider = StaticUserProvider::new(name);
                for (username, user) in users {
                    let password = user.password.parse::<PasswordHash>().map_err(|e| match e {
                        AuthChainError::InvalidPasswordHash(msg) => {
                            AuthChainError::InvalidPasswordHash(format!(
                                "user '{}' in provider '{}': {}",
                                username, name, msg
                            ))
                        }
                        other => other,
                    })?;
                    let mut record =
                        UserRecord::new(password).with_authorities(user.authorities.iter().cloned());
                    if !user.enabled {
                        record = record.disabled();
                    }
                    provider.insert(username.clone(), record);
                }
                Ok(Arc::new(provider))
            }
            ProviderConfig::GrantAuthorities { rules } => {
                let rules = rules
                    .iter()
                    .map(|r| GrantRule::new(&r.principal, r.authorities.iter().cloned()))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Arc::new(AuthorityGrantProvider::new(name, rules)))
            }
        }
    }
}

/// Resolve the config path: `$AUTHCHAIN_CONFIG`, else `~/.authchain/chain.toml`.
pub fn default_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(AUTHCHAIN_CONFIG_ENV) {
        if !path.is_empty() {
            return Ok(PathBuf::from(expand_tilde(&path)));
        }
    }
    dirs::home_dir()
        .map(|home| home.join(".authchain").join("chain.toml"))
        .ok_or_else(|| AuthChainError::Config("Could not determine home directory".into()))
}

/// Expand leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") || path == "~" {
        if let Some(home) = dirs::home_dir() {
            return path.replacen('~', &home.to_string_lossy(), 1);
        }
    }
    path.to_string()
}
