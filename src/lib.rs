//! authchain: conditional authentication chains.
//!
//! A [`chain::Chain`] is an ordered list of authentication providers. The
//! first entry always runs; every later entry runs only if the previous entry
//! succeeded (`ifPreviousTrue`) or failed (`ifPreviousFalse`). The
//! [`chain::ChainedAuthenticationManager`] walks the chain and returns the
//! last successful result, or the last provider error when nothing succeeded.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use authchain::chain::{Chain, ChainEntry, ChainedAuthenticationManager};
//! use authchain::credential::LoginRequest;
//! use authchain::provider::password::PasswordHash;
//! use authchain::provider::{AuthorityGrantProvider, GrantRule, StaticUserProvider, UserRecord};
//!
//! let users = StaticUserProvider::new("internal").with_user(
//!     "admin-alice",
//!     UserRecord::new(PasswordHash::generate("s3cret")?).with_authorities(["ROLE_USER"]),
//! );
//! let grants = AuthorityGrantProvider::new(
//!     "admins",
//!     vec![GrantRule::new("admin-*", ["ROLE_ADMIN"])?],
//! );
//!
//! let manager = ChainedAuthenticationManager::new(Chain::new(vec![
//!     ChainEntry::always(Arc::new(users)),
//!     ChainEntry::new(Arc::new(grants), "ifPreviousTrue")?,
//! ])?);
//!
//! let result = manager
//!     .authenticate(Some(&LoginRequest::new("admin-alice", "s3cret")))?
//!     .expect("input was present");
//! assert!(result.authenticated);
//! assert!(result.has_authority("ROLE_ADMIN"));
//! # Ok::<(), authchain::error::AuthChainError>(())
//! ```

pub mod chain;
pub mod config;
pub mod credential;
pub mod error;
pub mod provider;
