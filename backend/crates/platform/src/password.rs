//! Password Hashing and Verification
//!
//! New hashes are Argon2id PHC strings. Stored hashes may also be legacy
//! bcrypt strings (`$2a$`, `$2b$`, `$2y$`), which are verified but never
//! produced. Both verifiers compare in constant time.
//!
//! Hashing and verification are CPU bound; async callers should run them
//! on the blocking pool.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Also the login payload limit.
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Policy violations for passwords that are about to be hashed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Unrecognized password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, erased from memory on drop.
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Accept a new password under the length/charset policy. Used when
    /// producing hashes for seeding.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = raw.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if raw
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(Self(raw))
    }

    /// Wrap a submitted login password as-is. Policy applies to new
    /// passwords only; a login attempt is just compared.
    pub fn for_verification(raw: String) -> Self {
        Self(raw)
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with Argon2id (default parameters: m=19456, t=2, p=1).
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let hash = Argon2::default()
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
            scheme: HashScheme::Argon2,
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashScheme {
    Argon2,
    Bcrypt,
}

/// A stored password hash with its detected scheme.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
    scheme: HashScheme,
}

impl HashedPassword {
    /// Recognize a hash read from storage.
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        let scheme = if hash.starts_with("$argon2") {
            PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
            HashScheme::Argon2
        } else if ["$2a$", "$2b$", "$2y$"].iter().any(|p| hash.starts_with(p)) {
            HashScheme::Bcrypt
        } else {
            return Err(PasswordHashError::InvalidHashFormat);
        };

        Ok(Self { hash, scheme })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Constant-time check of `password` against this hash. Malformed
    /// hashes never match.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        match self.scheme {
            HashScheme::Argon2 => match PasswordHash::new(&self.hash) {
                Ok(parsed) => Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok(),
                Err(_) => false,
            },
            HashScheme::Bcrypt => bcrypt::verify(password.as_bytes(), &self.hash).unwrap_or(false),
        }
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("scheme", &self.scheme)
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("          ".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("alas\u{7}diseño".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_argon2_hash_and_verify() {
        let password = ClearTextPassword::new("vuelo-de-papel-2024".to_string()).unwrap();
        let hashed = password.hash().unwrap();
        assert_eq!(hashed.scheme(), HashScheme::Argon2);
        assert!(hashed.as_str().starts_with("$argon2id$"));

        assert!(hashed.verify(&ClearTextPassword::for_verification(
            "vuelo-de-papel-2024".to_string()
        )));
        assert!(!hashed.verify(&ClearTextPassword::for_verification(
            "vuelo-de-papel-2025".to_string()
        )));
    }

    #[test]
    fn test_stored_argon2_roundtrip() {
        let password = ClearTextPassword::new("imprenta-central".to_string()).unwrap();
        let hashed = password.hash().unwrap();
        let restored = HashedPassword::from_stored(hashed.as_str()).unwrap();
        assert!(restored.verify(&password));
    }

    #[test]
    fn test_legacy_bcrypt_hash_verifies() {
        let stored = bcrypt::hash("etiquetas123", 4).unwrap();
        let hashed = HashedPassword::from_stored(stored).unwrap();
        assert_eq!(hashed.scheme(), HashScheme::Bcrypt);

        assert!(hashed.verify(&ClearTextPassword::for_verification("etiquetas123".to_string())));
        assert!(!hashed.verify(&ClearTextPassword::for_verification("etiquetas124".to_string())));
    }

    #[test]
    fn test_unknown_hash_format() {
        assert!(matches!(
            HashedPassword::from_stored("plaintext"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
        assert!(matches!(
            HashedPassword::from_stored("$argon2id$garbage"),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::for_verification("secreto".to_string());
        assert!(!format!("{:?}", password).contains("secreto"));

        let hashed = ClearTextPassword::new("otro-secreto".to_string())
            .unwrap()
            .hash()
            .unwrap();
        assert!(format!("{:?}", hashed).contains("[HASH]"));
    }
}
