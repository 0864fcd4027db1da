//! Password hashing helpers.
//!
//! PBKDF2-SHA256 in PHC string format with a per-value random salt. The
//! empty string is the "no password set" sentinel and is never hashed; a
//! value that already parses as a hash of this scheme is stored unchanged
//! so a round-trip load cannot double-hash.

use pbkdf2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Params, Pbkdf2,
};
use rand::rngs::OsRng;
use serde::Deserialize;

use crate::Error;

/// Tunable hashing parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PasswordParams {
    /// PBKDF2 iteration count.
    pub rounds: u32,
}

impl Default for PasswordParams {
    fn default() -> Self {
        // passlib's pbkdf2_sha256 default, what existing stored hashes use.
        Self { rounds: 29_000 }
    }
}

/// Hash a plaintext password with the default parameters.
pub fn hash(plaintext: &str) -> Result<String, Error> {
    hash_with(plaintext, PasswordParams::default())
}

/// Hash a plaintext password with explicit parameters.
pub fn hash_with(plaintext: &str, params: PasswordParams) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Pbkdf2
        .hash_password_customized(
            plaintext.as_bytes(),
            Some(Algorithm::Pbkdf2Sha256.ident()),
            None,
            Params {
                rounds: params.rounds,
                output_length: 32,
            },
            &salt,
        )
        .map_err(|e| Error::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

/// Verify a plaintext password against a stored hash.
pub fn verify(plaintext: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Pbkdf2
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Check whether a string is recognizable as a hash of this scheme.
pub fn identify(candidate: &str) -> bool {
    PasswordHash::new(candidate)
        .map(|parsed| parsed.algorithm == Algorithm::Pbkdf2Sha256.ident())
        .unwrap_or(false)
}

/// Normalize a raw password value for storage.
///
/// Empty stays empty, an existing hash stays as-is, anything else is
/// hashed. Every password write funnels through here.
pub fn normalize(raw: &str) -> Result<String, Error> {
    if raw.is_empty() || identify(raw) {
        Ok(raw.to_string())
    } else {
        hash(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hashed = hash("secret").unwrap();
        assert!(verify("secret", &hashed));
        assert!(!verify("not-secret", &hashed));
    }

    #[test]
    fn test_distinct_salts() {
        let a = hash("secret").unwrap();
        let b = hash("secret").unwrap();
        assert_ne!(a, b);
        assert!(verify("secret", &a));
        assert!(verify("secret", &b));
    }

    #[test]
    fn test_identify() {
        let hashed = hash("secret").unwrap();
        assert!(identify(&hashed));
        assert!(!identify("secret"));
        assert!(!identify(""));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let first = normalize("secret").unwrap();
        assert!(identify(&first));

        // Re-saving the stored hash must not change it.
        let second = normalize(&first).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_normalize_keeps_empty_sentinel() {
        assert_eq!(normalize("").unwrap(), "");
    }

    #[test]
    fn test_custom_rounds() {
        let hashed = hash_with("secret", PasswordParams { rounds: 1_000 }).unwrap();
        assert!(identify(&hashed));
        assert!(verify("secret", &hashed));
    }
}
