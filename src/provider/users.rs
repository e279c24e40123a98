use std::collections::BTreeMap;

use secrecy::ExposeSecret;

use super::password::PasswordHash;
use super::AuthenticationProvider;
use crate::credential::{AuthResult, Credential, GrantedAuthority};
use crate::error::{AuthChainError, Result};

/// A user known to a [`StaticUserProvider`].
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub password: PasswordHash,
    pub authorities: Vec<GrantedAuthority>,
    pub enabled: bool,
}

impl UserRecord {
    pub fn new(password: PasswordHash) -> Self {
        Self {
            password,
            authorities: Vec::new(),
            enabled: true,
        }
    }

    pub fn with_authorities<I, A>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<GrantedAuthority>,
    {
        self.authorities = authorities.into_iter().map(Into::into).collect();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Password check against an in-memory user table.
///
/// Unknown users and wrong passwords are both reported as bad credentials,
/// and both pay for one digest check, so callers cannot tell which usernames
/// exist.
#[derive(Debug, Clone)]
pub struct StaticUserProvider {
    name: String,
    users: BTreeMap<String, UserRecord>,
}

impl StaticUserProvider {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            users: BTreeMap::new(),
        }
    }

    pub fn with_user(mut self, username: impl Into<String>, record: UserRecord) -> Self {
        self.users.insert(username.into(), record);
        self
    }

    pub fn insert(&mut self, username: impl Into<String>, record: UserRecord) {
        self.users.insert(username.into(), record);
    }

}

impl AuthenticationProvider for StaticUserProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn authenticate(&self, credential: &Credential) -> Result<AuthResult> {
        let principal = credential.principal.as_str();
        let bad = || AuthChainError::BadCredentials(principal.to_string());

        let Some(user) = self.users.get(principal) else {
            let supplied = credential.secret.as_ref().map(|s| s.expose_secret().as_str());
            PasswordHash::placeholder().verify(supplied.unwrap_or_default());
            tracing::debug!(provider = %self.name, principal, "unknown user");
            return Err(bad());
        };

        let password = credential.secret.as_ref().ok_or_else(bad)?;
        if !user.password.verify(password.expose_secret()) {
            tracing::debug!(provider = %self.name, principal, "password mismatch");
            return Err(bad());
        }

        if !user.enabled {
            return Err(AuthChainError::AccountDisabled(principal.to_string()));
        }

        Ok(credential.authenticated_with(user.authorities.iter().cloned()))
    }
}
