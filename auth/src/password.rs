//! bcrypt password hashing on the blocking pool.
//!
//! bcrypt is deliberately slow, so every call is moved off the async
//! workers with `spawn_blocking`.

use crate::error::{AuthError, Result};

/// Well-formed bcrypt hash matching no password, verified against when the
/// email is unknown so both failure paths cost the same.
const DUMMY_HASH: &str = "$2b$10$abcdefghijklmnopqrstu.ABCDEFGHIJKLMNOPQRSTUVWXYZ0123.";

/// Hash `password` with the given bcrypt cost.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails or the cost is out of
/// range.
pub async fn hash_password(password: &str, cost: u32) -> Result<String> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AuthError::InternalError(format!("hashing task failed: {e}")))?
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Check `password` against a stored bcrypt hash (`$2a$`, `$2b$` or `$2y$`).
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if the stored hash is malformed.
pub async fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let password = password.to_string();
    let hash = hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AuthError::InternalError(format!("verification task failed: {e}")))?
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Burn the same work as a real verification. The result is ignored.
pub(crate) async fn verify_dummy(password: &str) {
    let _ = verify_password(password, DUMMY_HASH).await;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the tests fast.
    const TEST_COST: u32 = 4;

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hash = hash_password("hunter2", TEST_COST).await.unwrap_or_default();
        assert!(hash.starts_with("$2b$04$"));
        assert_eq!(verify_password("hunter2", &hash).await, Ok(true));
        assert_eq!(verify_password("hunter3", &hash).await, Ok(false));
    }

    #[tokio::test]
    async fn test_dummy_hash_matches_nothing() {
        assert_eq!(verify_password("", DUMMY_HASH).await, Ok(false));
    }

    #[tokio::test]
    async fn test_malformed_hash_is_an_error() {
        assert!(matches!(
            verify_password("x", "plaintext").await,
            Err(AuthError::PasswordHash(_))
        ));
    }
}
