//! Authentication constants.

/// bcrypt work factor for new admin password hashes.
pub const BCRYPT_COST: u32 = 10;

/// Random bytes in a session token (256 bits).
pub const SESSION_TOKEN_BYTES: usize = 32;

/// Length of a base64url (unpadded) encoded session token.
pub const SESSION_TOKEN_LEN: usize = 43;

/// Default admin session lifetime in seconds (7 days).
pub const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_length_matches_byte_count() {
        assert_eq!(SESSION_TOKEN_LEN, (SESSION_TOKEN_BYTES * 8).div_ceil(6));
    }
}
