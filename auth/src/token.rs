//! Opaque session tokens.
//!
//! A token is 256 random bits encoded as base64url. Only its SHA-256 digest
//! is stored, so a leaked sessions table cannot be replayed.

use crate::constants::{SESSION_TOKEN_BYTES, SESSION_TOKEN_LEN};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Generate a cryptographically secure random token.
///
/// Returns a 256-bit random token encoded as base64url (43 characters).
#[must_use]
pub fn generate_token() -> String {
    let mut random_bytes = [0u8; SESSION_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Lowercase hex SHA-256 digest of `token`, as stored at rest.
///
/// # Examples
///
/// ```
/// use party_rsvp_auth::token::hash_token;
///
/// assert_eq!(hash_token("abc").len(), 64);
/// assert_eq!(hash_token("abc"), hash_token("abc"));
/// ```
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// `true` if `token` could have been produced by [`generate_token`].
#[must_use]
pub fn is_well_formed(token: &str) -> bool {
    token.len() == SESSION_TOKEN_LEN
        && URL_SAFE_NO_PAD
            .decode(token)
            .is_ok_and(|bytes| bytes.len() == SESSION_TOKEN_BYTES)
}
