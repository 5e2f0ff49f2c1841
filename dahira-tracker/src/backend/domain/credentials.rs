//! Credential verification behind a swappable capability.
//!
//! Passwords are stored as Argon2id PHC strings. Phone logins go through
//! `verify_phone_code`, which today is a placeholder for a one-time code.

use anyhow::{anyhow, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use log::warn;

use crate::backend::config::PasswordHashingConfig;
use crate::backend::domain::models::Member;

pub trait CredentialVerifier: Send + Sync {
    /// Hash a plaintext password for storage
    fn hash_password(&self, password: &str) -> Result<String>;

    /// Check a plaintext password against a stored hash
    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool>;

    /// Check the code a member typed when logging in with their phone number
    fn verify_phone_code(&self, member: &Member, code: &str) -> bool;
}

/// Argon2id password hashing
#[derive(Clone)]
pub struct Argon2Verifier {
    params: Params,
}

impl Argon2Verifier {
    pub fn new(config: &PasswordHashingConfig) -> Result<Self> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| anyhow!("Invalid password hashing parameters: {}", e))?;
        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn hash_password(&self, password: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        let parsed = PasswordHash::new(password_hash)
            .map_err(|e| anyhow!("Stored password hash is malformed: {}", e))?;
        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    // Placeholder for an OTP check: any non-empty code is accepted.
    fn verify_phone_code(&self, member: &Member, code: &str) -> bool {
        if code.trim().is_empty() {
            return false;
        }
        warn!(
            "Phone login for member {} accepted without one-time code verification",
            member.id
        );
        true
    }
}
