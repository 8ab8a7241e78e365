//! Password hashing with Argon2 and strength policy

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use thiserror::Error;

use launchpad_shared::constants::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, MIN_PASSWORD_SCORE};

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Hash error: {0}")]
    HashError(String),
    #[error("Verification failed")]
    VerificationFailed,
}

/// Outcome of checking a candidate password against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Acceptable,
    TooShort,
    TooLong,
    TooWeak,
}

pub struct PasswordService;

impl PasswordService {
    pub fn hash(password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| PasswordError::HashError(e.to_string()))
    }

    pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Length bounds first, then a zxcvbn score that also penalises reuse of
    /// the user's own name or email.
    pub fn check_strength(password: &str, user_inputs: &[&str]) -> PasswordStrength {
        let len = password.chars().count();
        if len < MIN_PASSWORD_LENGTH {
            return PasswordStrength::TooShort;
        }
        if len > MAX_PASSWORD_LENGTH {
            return PasswordStrength::TooLong;
        }

        let score = zxcvbn::zxcvbn(password, user_inputs).score() as u8;
        if score < MIN_PASSWORD_SCORE {
            PasswordStrength::TooWeak
        } else {
            PasswordStrength::Acceptable
        }
    }
}
