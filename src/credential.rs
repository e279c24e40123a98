use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single authority claim such as `ROLE_USER`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GrantedAuthority(String);

impl GrantedAuthority {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GrantedAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GrantedAuthority {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for GrantedAuthority {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The normalized shape of an in-flight authentication attempt.
///
/// Providers receive a `&Credential` and hand back a new one; the chain never
/// mutates a value a provider returned.
#[derive(Debug, Clone)]
pub struct Credential {
    pub principal: String,
    /// Secret material (password). Redacted in `Debug` output.
    pub secret: Option<SecretString>,
    pub authorities: BTreeSet<GrantedAuthority>,
    pub authenticated: bool,
    /// Opaque request metadata, carried through the chain untouched.
    pub details: Option<Value>,
}

/// The successful outcome of one provider invocation.
pub type AuthResult = Credential;

impl Credential {
    /// An unauthenticated principal/secret pair with no authorities.
    pub fn unauthenticated(principal: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            principal: principal.into(),
            secret: Some(SecretString::new(secret.into())),
            authorities: BTreeSet::new(),
            authenticated: false,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_authorities<I, A>(mut self, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<GrantedAuthority>,
    {
        self.authorities = authorities.into_iter().map(Into::into).collect();
        self
    }

    /// Build an authenticated result for the same principal, replacing the
    /// authorities. Secret and details are carried forward so later chain
    /// entries can still verify them.
    pub fn authenticated_with<I, A>(&self, authorities: I) -> AuthResult
    where
        I: IntoIterator<Item = A>,
        A: Into<GrantedAuthority>,
    {
        Self {
            principal: self.principal.clone(),
            secret: self.secret.clone(),
            authorities: authorities.into_iter().map(Into::into).collect(),
            authenticated: true,
            details: self.details.clone(),
        }
    }

    pub fn has_authority(&self, name: &str) -> bool {
        self.authorities.iter().any(|a| a.as_str() == name)
    }

    /// Authority names in sorted order.
    pub fn authority_names(&self) -> Vec<String> {
        self.authorities.iter().map(|a| a.to_string()).collect()
    }
}

/// Anything that can be presented to the chain for authentication.
///
/// Inputs that are not already a [`Credential`] are copied into one before
/// evaluation; a `Credential` is used as-is.
pub trait Authentication {
    fn principal(&self) -> &str;
    fn secret(&self) -> Option<&SecretString>;
    fn authorities(&self) -> BTreeSet<GrantedAuthority>;
    fn is_authenticated(&self) -> bool;
    fn details(&self) -> Option<&Value>;

    fn to_credential(&self) -> Cow<'_, Credential> {
        Cow::Owned(Credential {
            principal: self.principal().to_string(),
            secret: self.secret().cloned(),
            authorities: self.authorities(),
            authenticated: self.is_authenticated(),
            details: self.details().cloned(),
        })
    }
}

impl Authentication for Credential {
    fn principal(&self) -> &str {
        &self.principal
    }

    fn secret(&self) -> Option<&SecretString> {
        self.secret.as_ref()
    }

    fn authorities(&self) -> BTreeSet<GrantedAuthority> {
        self.authorities.clone()
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    fn to_credential(&self) -> Cow<'_, Credential> {
        Cow::Borrowed(self)
    }
}

/// A login attempt as handed over by a request-handling layer.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub username: String,
    pub password: SecretString,
    pub details: Option<Value>,
}

impl LoginRequest {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into()),
            details: None,
        }
    }

    /// Record where the attempt came from.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.details = Some(serde_json::json!({ "origin": origin.into() }));
        self
    }
}

impl Authentication for LoginRequest {
    fn principal(&self) -> &str {
        &self.username
    }

    fn secret(&self) -> Option<&SecretString> {
        Some(&self.password)
    }

    fn authorities(&self) -> BTreeSet<GrantedAuthority> {
        BTreeSet::new()
    }

    fn is_authenticated(&self) -> bool {
        false
    }

    fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}
