use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthChainError {
    #[error("Invalid chain configuration: {0}")]
    InvalidChainConfiguration(String),

    #[error("Bad credentials: {0}")]
    BadCredentials(String),

    #[error("Account disabled: {0}")]
    AccountDisabled(String),

    #[error("Insufficient authentication: {0}")]
    InsufficientAuthentication(String),

    #[error("No provider reached a decision for '{0}'")]
    NoDecision(String),

    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Invalid password hash: {0}")]
    InvalidPasswordHash(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl AuthChainError {
    /// Return a typed exit code for this error category.
    pub fn exit_code(&self) -> i32 {
        match self {
            AuthChainError::InvalidChainConfiguration(_) => 5,
            AuthChainError::BadCredentials(_) => 2,
            AuthChainError::AccountDisabled(_) => 2,
            AuthChainError::InsufficientAuthentication(_) => 2,
            AuthChainError::NoDecision(_) => 3,
            AuthChainError::ProviderNotFound(_) => 5,
            AuthChainError::InvalidPasswordHash(_) => 5,
            AuthChainError::Config(_) => 5,
            AuthChainError::Serialization(_) => 1,
            AuthChainError::Io(_) => 1,
            AuthChainError::Other(_) => 1,
        }
    }

    /// Return a string error code identifier.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthChainError::InvalidChainConfiguration(_) => "invalid_chain_configuration",
            AuthChainError::BadCredentials(_) => "bad_credentials",
            AuthChainError::AccountDisabled(_) => "account_disabled",
            AuthChainError::InsufficientAuthentication(_) => "insufficient_authentication",
            AuthChainError::NoDecision(_) => "no_decision",
            AuthChainError::ProviderNotFound(_) => "provider_not_found",
            AuthChainError::InvalidPasswordHash(_) => "invalid_password_hash",
            AuthChainError::Config(_) => "config_error",
            AuthChainError::Serialization(_) => "serialization_error",
            AuthChainError::Io(_) => "io_error",
            AuthChainError::Other(_) => "error",
        }
    }

    /// Whether this error is a provider rejecting a credential, as opposed to
    /// a broken configuration or an I/O problem.
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthChainError::BadCredentials(_)
                | AuthChainError::AccountDisabled(_)
                | AuthChainError::InsufficientAuthentication(_)
        )
    }
}

/// JSON error response for --json mode.
#[derive(Serialize)]
pub struct JsonError {
    pub error: JsonErrorDetail,
}

#[derive(Serialize)]
pub struct JsonErrorDetail {
    pub code: String,
    pub message: String,
    pub exit_code: i32,
}

impl JsonError {
    pub fn from_error(e: &AuthChainError) -> Self {
        Self {
            error: JsonErrorDetail {
                code: e.error_code().to_string(),
                message: e.to_string(),
                exit_code: e.exit_code(),
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthChainError>;
