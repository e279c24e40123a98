use globset::{Glob, GlobMatcher};

use super::AuthenticationProvider;
use crate::credential::{AuthResult, Credential, GrantedAuthority};
use crate::error::{AuthChainError, Result};

/// Grants `authorities` to every principal matching `pattern`.
#[derive(Debug, Clone)]
pub struct GrantRule {
    pattern: String,
    matcher: GlobMatcher,
    authorities: Vec<GrantedAuthority>,
}

impl GrantRule {
    pub fn new<I, A>(pattern: &str, authorities: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<GrantedAuthority>,
    {
        let matcher = Glob::new(pattern)
            .map_err(|e| {
                AuthChainError::Config(format!("Invalid principal pattern '{}': {}", pattern, e))
            })?
            .compile_matcher();
        Ok(Self {
            pattern: pattern.to_string(),
            matcher,
            authorities: authorities.into_iter().map(Into::into).collect(),
        })
    }

    pub fn matches(&self, principal: &str) -> bool {
        self.matcher.is_match(principal)
    }
}

/// Enriches an already-authenticated credential with extra authorities.
///
/// Meant to sit behind an `ifPreviousTrue` entry: it refuses credentials that
/// no earlier step has authenticated. A principal that matches no rule keeps
/// its current authorities and still counts as a success.
#[derive(Debug, Clone)]
pub struct AuthorityGrantProvider {
    name: String,
    rules: Vec<GrantRule>,
}

impl AuthorityGrantProvider {
    pub fn new(name: impl Into<String>, rules: Vec<GrantRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }
}

impl AuthenticationProvider for AuthorityGrantProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn authenticate(&self, credential: &Credential) -> Result<AuthResult> {
        if !credential.authenticated {
            return Err(AuthChainError::InsufficientAuthentication(format!(
                "'{}' must be authenticated before '{}' can grant authorities",
                credential.principal, self.name
            )));
        }

        let mut authorities = credential.authorities.clone();
        for rule in self.rules.iter().filter(|r| r.matches(&credential.principal)) {
            tracing::debug!(
                provider = %self.name,
                principal = %credential.principal,
                pattern = %rule.pattern,
                "grant rule matched"
            );
            authorities.extend(rule.authorities.iter().cloned());
        }

        Ok(credential.authenticated_with(authorities))
    }
}
