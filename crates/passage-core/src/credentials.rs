//! Password digest helpers for the single administrator account.
//!
//! Credentials are stored as an unsalted SHA-256 hex digest, with a
//! plaintext fallback for rows that predate hashing. This mirrors the data
//! already in the field; it is not a recommended password scheme.

use sha2::{Digest, Sha256};

/// Username of the administrator account created at startup.
pub const DEFAULT_USERNAME: &str = "admin";

/// Password of the administrator account created at startup.
pub const DEFAULT_PASSWORD: &str = "admin123";

/// Digest an earlier build wrote for the default password by mistake.
/// Startup initialization replaces it with the correct one.
pub const LEGACY_BAD_DIGEST: &str =
    "240be518fabd2724ddb6f04eeb9d5b76d76ad8f8e5d1a62bcf2caaec2b2b8b53";

/// Length of a valid stored digest.
pub const DIGEST_LEN: usize = 64;

/// Lowercase hex SHA-256 of arbitrary bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Digest a password for storage.
pub fn digest(password: &str) -> String {
    sha256_hex(password.as_bytes())
}

/// Check a plaintext password against a stored value.
///
/// A 64-character stored value is treated as a digest; anything else is a
/// legacy plaintext row and compared directly. Exact match only.
pub fn verify(input: &str, stored: &str) -> bool {
    if stored.len() == DIGEST_LEN {
        digest(input) == stored
    } else {
        input == stored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADMIN123_DIGEST: &str =
        "240be518fabd2724ddb6f04eeb1da5967448d7e831c08c8fa822809f74c720a9";

    #[test]
    fn digest_of_default_password_matches_known_value() {
        assert_eq!(digest(DEFAULT_PASSWORD), ADMIN123_DIGEST);
    }

    #[test]
    fn verify_round_trips_any_password() {
        assert!(verify("s3cret", &digest("s3cret")));
        assert!(!verify("s3cret", &digest("other")));
    }

    #[test]
    fn verify_falls_back_to_plaintext_for_legacy_rows() {
        assert!(verify("oldpass", "oldpass"));
        assert!(!verify("oldpass", "different"));
    }

    #[test]
    fn legacy_bad_digest_never_verifies() {
        assert!(!verify(DEFAULT_PASSWORD, LEGACY_BAD_DIGEST));
    }
}
