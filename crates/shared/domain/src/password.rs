//! Password value object.
//!
//! Owns the strength policy and the argon2 hash/verify pair. A `Password`
//! only ever holds a hash; the plain text is dropped after hashing.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::constants::{MIN_PASSWORD_LENGTH, PASSWORD_SPECIAL_CHARS};
use crate::error::{DomainError, DomainResult, PasswordError};

#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Check the policy, then hash.
    ///
    /// # Errors
    /// The first failing [`PasswordError`] class, or `Internal` when hashing fails.
    pub fn new(plain_text: &str) -> DomainResult<Self> {
        Self::check_strength(plain_text)?;
        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Policy check in a fixed order: length, lower, upper, digit, special.
    ///
    /// Length is measured in bytes and the letter classes are ASCII only.
    pub fn check_strength(plain_text: &str) -> Result<(), PasswordError> {
        if plain_text.len() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::Length);
        }
        if !plain_text.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordError::LowerCase);
        }
        if !plain_text.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordError::UpperCase);
        }
        if !plain_text.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordError::Digit);
        }
        if !plain_text.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c)) {
            return Err(PasswordError::SpecialChar);
        }
        Ok(())
    }

    /// Wrap a stored hash.
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify plain text against this hash. Malformed hashes never match.
    pub fn verify(&self, plain_text: &str) -> bool {
        match PasswordHash::new(&self.hash) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain_text.as_bytes(), &parsed)
                .is_ok(),
            Err(_) => false,
        }
    }

    fn hash(plain_text: &str) -> DomainResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}
