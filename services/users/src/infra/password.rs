//! Argon2id password encryption adapter.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher as _, SaltString, rand_core::OsRng},
};

use crate::domain::repository::PasswordEncryptor;
use crate::error::UsersServiceError;

/// Hashes plaintext passwords into PHC-formatted argon2id strings. A fresh
/// salt per call means equal plaintexts produce different ciphertexts.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2Encryptor;

impl PasswordEncryptor for Argon2Encryptor {
    fn encrypt(&self, plaintext: &str) -> Result<String, UsersServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| UsersServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
    }
}
