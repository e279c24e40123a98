use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AuthChainError, Result};

type HmacSha256 = Hmac<Sha256>;

const SCHEME: &str = "hmac-sha256";
const SALT_BYTES: usize = 16;
const DIGEST_BYTES: usize = 32;

/// A salted password hash in the form `hmac-sha256$<salt hex>$<digest hex>`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash {
    salt: Vec<u8>,
    digest: Vec<u8>,
}

impl PasswordHash {
    /// Hash a password under a fresh random salt.
    pub fn generate(password: &str) -> Result<Self> {
        let mut salt = vec![0u8; SALT_BYTES];
        rand::thread_rng().fill_bytes(&mut salt);
        let digest = compute_digest(&salt, password)?;
        Ok(Self { salt, digest })
    }

    /// Check a candidate password. The digest comparison is constant-time.
    pub fn verify(&self, password: &str) -> bool {
        match compute_digest(&self.salt, password) {
            Ok(candidate) => self.digest.ct_eq(&candidate).into(),
            Err(_) => false,
        }
    }

    /// A hash with a fixed salt and an all-zero digest. Checking a password
    /// against it costs the same as a real check and never succeeds.
    pub(crate) fn placeholder() -> Self {
        Self {
            salt: vec![0u8; SALT_BYTES],
            digest: vec![0u8; DIGEST_BYTES],
        }
    }

    pub fn encode(&self) -> String {
        format!("{}${}${}", SCHEME, hex::encode(&self.salt), hex::encode(&self.digest))
    }
}

impl FromStr for PasswordHash {
    type Err = AuthChainError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split('$');
        let (scheme, salt, digest) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(scheme), Some(salt), Some(digest), None) => (scheme, salt, digest),
            _ => {
                return Err(AuthChainError::InvalidPasswordHash(
                    "expected '<scheme>$<salt>$<digest>'".into(),
                ))
            }
        };

        if scheme != SCHEME {
            return Err(AuthChainError::InvalidPasswordHash(format!(
                "unsupported scheme '{}'",
                scheme
            )));
        }

        let salt = hex::decode(salt)
            .map_err(|e| AuthChainError::InvalidPasswordHash(format!("bad salt: {}", e)))?;
        let digest = hex::decode(digest)
            .map_err(|e| AuthChainError::InvalidPasswordHash(format!("bad digest: {}", e)))?;
        if salt.is_empty() || digest.is_empty() {
            return Err(AuthChainError::InvalidPasswordHash(
                "salt and digest must not be empty".into(),
            ));
        }

        Ok(Self { salt, digest })
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}

/// Hash a password for use in a chain configuration file.
pub fn hash_password(password: &str) -> Result<String> {
    Ok(PasswordHash::generate(password)?.encode())
}

/// Verify a password against an encoded hash.
pub fn verify_password(password: &str, encoded: &str) -> Result<bool> {
    Ok(encoded.parse::<PasswordHash>()?.verify(password))
}

fn compute_digest(salt: &[u8], password: &str) -> Result<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(salt)
        .map_err(|e| AuthChainError::Other(format!("HMAC init failed: {}", e)))?;
    mac.update(password.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}
