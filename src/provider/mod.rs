pub mod grants;
pub mod password;
pub mod users;

use crate::credential::{AuthResult, Credential};
use crate::error::Result;

pub use grants::{AuthorityGrantProvider, GrantRule};
pub use users::{StaticUserProvider, UserRecord};

/// One authentication step that a chain entry delegates to.
///
/// A provider either returns an authenticated [`AuthResult`] or an error
/// describing why it rejected the credential. Returning `Ok` with an
/// unauthenticated credential means the provider abstained.
///
/// Calls are synchronous and may block; implementations own their timeouts.
pub trait AuthenticationProvider: Send + Sync {
    /// Short name used in logs and traces.
    fn name(&self) -> &str;

    fn authenticate(&self, credential: &Credential) -> Result<AuthResult>;
}
