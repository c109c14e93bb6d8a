// ============================
// accounts-backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
//!
//! Hashes are PHC strings, so verification picks the algorithm from the
//! stored hash and keeps working after the configured algorithm changes.
use argon2::{Algorithm, Argon2, Version};
use scrypt::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as PhcHasher, SaltString,
    },
    Scrypt,
};
use zeroize::Zeroizing;

use crate::config::{HashAlgorithm, HasherSettings};
use crate::error::HashingError;

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 7;

/// Salted one-way password hashing with the configured algorithm
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    algorithm: HashAlgorithm,
    scrypt: scrypt::Params,
    argon2: argon2::Params,
}

impl PasswordHasher {
    pub fn from_settings(settings: &HasherSettings) -> Result<Self, HashingError> {
        let scrypt = scrypt::Params::new(
            settings.scrypt_log_n,
            scrypt::Params::RECOMMENDED_R,
            scrypt::Params::RECOMMENDED_P,
            scrypt::Params::RECOMMENDED_LEN,
        )
        .map_err(|e| HashingError::Params(e.to_string()))?;

        let argon2 = argon2::Params::new(
            settings.argon2_memory_kib,
            settings.argon2_iterations,
            argon2::Params::DEFAULT_P_COST,
            None,
        )
        .map_err(|e| HashingError::Params(e.to_string()))?;

        Ok(Self {
            algorithm: settings.algorithm,
            scrypt,
            argon2,
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.argon2.clone())
    }

    /// Hash a password with a fresh random salt
    pub fn hash(&self, plain: &str) -> Result<String, HashingError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = match self.algorithm {
            HashAlgorithm::Scrypt => Scrypt
                .hash_password_customized(plain.as_bytes(), None, None, self.scrypt, &salt)
                .map_err(|e| HashingError::Hash(e.to_string()))?
                .to_string(),
            HashAlgorithm::Argon2 => self
                .argon2()
                .hash_password(plain.as_bytes(), &salt)
                .map_err(|e| HashingError::Hash(e.to_string()))?
                .to_string(),
        };
        Ok(hash)
    }

    /// Verify a password against a stored hash of either algorithm
    pub fn verify(&self, hash: &str, plain: &str) -> bool {
        let parsed_hash = match PasswordHash::new(hash) {
            Ok(h) => h,
            Err(_) => return false,
        };
        let argon2 = Argon2::default();
        parsed_hash
            .verify_password(&[&Scrypt, &argon2], plain.as_bytes())
            .is_ok()
    }

    /// Hash on the blocking pool; the plaintext is wiped when dropped
    pub async fn hash_secure(&self, plain: Zeroizing<String>) -> Result<String, HashingError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plain))
            .await
            .map_err(|e| HashingError::Hash(e.to_string()))?
    }

    /// Verify on the blocking pool; the plaintext is wiped when dropped
    pub async fn verify_secure(&self, hash: String, plain: Zeroizing<String>) -> bool {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&hash, &plain))
            .await
            .unwrap_or(false)
    }
}
