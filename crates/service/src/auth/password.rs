use argon2::{
    password_hash::{PasswordHasher as _, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

use crate::sellers::errors::SellerError;

/// Salted one-way password hashing.
///
/// Each `hash` call draws a fresh random salt, so hashing the same plaintext
/// twice yields different strings; the salt is embedded in the output and
/// recovered during verification.
#[derive(Clone, Copy, Debug, Default)]
pub struct PasswordHasher;

impl PasswordHasher {
    pub fn hash(&self, plaintext: &str) -> Result<String, SellerError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map_err(|e| SellerError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// True iff `plaintext` re-hashes to `hash`. Comparison happens inside
    /// the argon2 verifier in constant time; a malformed hash verifies as
    /// false rather than erroring.
    pub fn verify(&self, plaintext: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok()
    }
}
