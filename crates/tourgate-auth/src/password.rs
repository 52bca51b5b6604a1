//! Password hashing

use std::sync::LazyLock;

use argon2::{
    Argon2,
    password_hash::{
        self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};
use tracing::warn;

use crate::error::AuthError;

/// Hash used when the username does not exist, so a failed lookup costs the
/// same as a failed password check.
static DUMMY_HASH: LazyLock<Result<String, String>> =
    LazyLock::new(|| hash_password("tourgate-timing-equalizer").map_err(|e| e.to_string()));

/// Build the dummy hash up front instead of on the first unknown-user login
pub fn prepare_dummy_hash() -> Result<(), AuthError> {
    dummy_hash().map(|_| ())
}

fn dummy_hash() -> Result<&'static str, AuthError> {
    match &*DUMMY_HASH {
        Ok(hash) => Ok(hash.as_str()),
        Err(e) => Err(AuthError::PasswordHash(e.clone())),
    }
}

/// Hash a password with Argon2id and a fresh random salt
///
/// The result is a PHC string carrying the algorithm parameters and salt.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a password against a stored hash
///
/// A mismatch yields `Ok(false)`. So does any stored hash the verifier
/// cannot use: unparseable strings, foreign algorithms and out-of-range
/// parameters are logged and treated as a non-match.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed = match PasswordHash::new(hash) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Stored password hash is malformed: {}", e);
            return Ok(false);
        }
    };

    match Argon2::default().verify_password(password.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            warn!("Stored password hash is unusable: {}", e);
            Ok(false)
        }
    }
}

/// Run a verification that always fails, at the cost of a real one
pub fn verify_against_dummy(password: &str) -> Result<bool, AuthError> {
    verify_password(password, dummy_hash()?)?;
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("password1").unwrap();

        assert_ne!(hash, "password1");
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("password1", &hash).unwrap());
    }

    #[test]
    fn test_wrong_password() {
        let hash = hash_password("password1").unwrap();

        assert!(!verify_password("password2", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let a = hash_password("password1").unwrap();
        let b = hash_password("password1").unwrap();

        assert_ne!(a, b);
    }

    #[test]
    fn test_malformed_hash_is_not_an_error() {
        assert!(!verify_password("password1", "not-a-valid-hash").unwrap());
        assert!(!verify_password("password1", "").unwrap());
    }

    #[test]
    fn test_unusable_hash_is_not_an_error() {
        // Parses as PHC, but the cost parameters are below argon2's minimum
        let weak = "$argon2id$v=19$m=1,t=1,p=1$c2FsdHNhbHQ$aGFzaGhhc2hoYXNo";
        // Parses as PHC, but belongs to another algorithm
        let foreign = "$pbkdf2-sha256$i=1000$c2FsdHNhbHQ$aGFzaGhhc2hoYXNo";

        assert!(!verify_password("password1", weak).unwrap());
        assert!(!verify_password("password1", foreign).unwrap());
    }

    #[test]
    fn test_dummy_hash_is_real() {
        prepare_dummy_hash().unwrap();

        let hash = dummy_hash().unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("tourgate-timing-equalizer", hash).unwrap());
    }

    #[test]
    fn test_dummy_never_matches() {
        assert!(!verify_against_dummy("tourgate-timing-equalizer").unwrap());
        assert!(!verify_against_dummy("anything").unwrap());
    }
}
