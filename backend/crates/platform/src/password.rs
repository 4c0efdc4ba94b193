//! Password Hashing and Verification
//!
//! Password handling with:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Unicode NFKC normalization before hashing
//! - Zeroization of clear text on drop
//! - Constant-time comparison (inside `argon2`)
//!
//! Services depend on the [`CredentialHasher`] port; [`Argon2Hasher`] is the
//! production implementation. Hashing is CPU-bound, so async callers should go
//! through [`hash_blocking`] / [`compare_blocking`], which run on tokio's
//! blocking pool.

use std::fmt;
use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Error Types
// ============================================================================

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordError {
    /// The password does not match the stored hash
    #[error("Password does not match")]
    Mismatch,

    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,

    /// Invalid Argon2 parameters
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("my_secure_password".to_string());
/// assert!(!password.is_empty());
/// // Password is automatically zeroized when dropped
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a raw password, normalizing it with NFKC
    ///
    /// No length or strength policy is applied here.
    pub fn new(mut raw: String) -> Self {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    /// Whether the password has no characters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the password as bytes for hashing
    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
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

/// Hashed password in PHC string format
///
/// The PHC string carries the algorithm, version, parameters, salt and hash,
/// so verification does not need to know which parameters produced it.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordError> {
        let hash = s.into();

        // Validate it's a valid PHC string
        PasswordHash::new(&hash).map_err(|_| PasswordError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    /// Get the PHC string for storage
    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Credential Hasher port
// ============================================================================

/// One-way credential hashing
pub trait CredentialHasher: Send + Sync {
    /// Hash a clear text password with a fresh salt
    fn generate_hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordError>;

    /// Check a clear text password against a stored hash
    ///
    /// Returns [`PasswordError::Mismatch`] when they differ.
    fn compare_hash(
        &self,
        hash: &HashedPassword,
        password: &ClearTextPassword,
    ) -> Result<(), PasswordError>;
}

/// Argon2id implementation of [`CredentialHasher`]
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    /// OWASP recommended parameters: m=19456 (19 MiB), t=2, p=1
    pub fn new() -> Self {
        Self {
            params: Params::default(),
        }
    }

    /// Custom cost parameters
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;
        Ok(Self { params })
    }

    /// Minimum-cost parameters. Only suitable for tests.
    pub fn light() -> Self {
        Self {
            params: Params::new(Params::MIN_M_COST, Params::MIN_T_COST, Params::MIN_P_COST, None)
                .unwrap_or_default(),
        }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl Default for Argon2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Argon2Hasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Argon2Hasher")
            .field("m_cost", &self.params.m_cost())
            .field("t_cost", &self.params.t_cost())
            .field("p_cost", &self.params.p_cost())
            .finish()
    }
}

impl CredentialHasher for Argon2Hasher {
    fn generate_hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordError> {
        // Generate random salt (128 bits = 16 bytes)
        let salt = SaltString::generate(OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }

    fn compare_hash(
        &self,
        hash: &HashedPassword,
        password: &ClearTextPassword,
    ) -> Result<(), PasswordError> {
        let parsed_hash =
            PasswordHash::new(&hash.hash).map_err(|_| PasswordError::InvalidHashFormat)?;

        // Parameters are read from the PHC string, not from `self`
        match self.argon2().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(()),
            Err(argon2::password_hash::Error::Password) => Err(PasswordError::Mismatch),
            Err(e) => Err(PasswordError::HashingFailed(e.to_string())),
        }
    }
}

// ============================================================================
// Async helpers
// ============================================================================

/// [`CredentialHasher::generate_hash`] on the blocking pool
pub async fn hash_blocking(
    hasher: Arc<dyn CredentialHasher>,
    password: ClearTextPassword,
) -> Result<HashedPassword, PasswordError> {
    tokio::task::spawn_blocking(move || hasher.generate_hash(&password))
        .await
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
}

/// [`CredentialHasher::compare_hash`] on the blocking pool
pub async fn compare_blocking(
    hasher: Arc<dyn CredentialHasher>,
    hash: HashedPassword,
    password: ClearTextPassword,
) -> Result<(), PasswordError> {
    tokio::task::spawn_blocking(move || hasher.compare_hash(&hash, &password))
        .await
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_compare() {
        let hasher = Argon2Hasher::light();
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = hasher.generate_hash(&password).unwrap();

        // Correct password should verify
        assert!(hasher.compare_hash(&hashed, &password).is_ok());

        // Wrong password should not verify
        let wrong_password = ClearTextPassword::new("WrongPassword123!".to_string());
        assert!(matches!(
            hasher.compare_hash(&hashed, &wrong_password),
            Err(PasswordError::Mismatch)
        ));
    }

    #[test]
    fn test_short_passwords_are_accepted() {
        let hasher = Argon2Hasher::light();
        let password = ClearTextPassword::new("p".to_string());
        let hashed = hasher.generate_hash(&password).unwrap();
        assert!(hasher.compare_hash(&hashed, &password).is_ok());
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let hasher = Argon2Hasher::light();
        let password = ClearTextPassword::new("same".to_string());
        let a = hasher.generate_hash(&password).unwrap();
        let b = hasher.generate_hash(&password).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_nfkc_normalization() {
        let hasher = Argon2Hasher::light();
        // Full-width "ＡＢＣ" normalizes to "ABC"
        let hashed = hasher
            .generate_hash(&ClearTextPassword::new("ＡＢＣ".to_string()))
            .unwrap();
        assert!(
            hasher
                .compare_hash(&hashed, &ClearTextPassword::new("ABC".to_string()))
                .is_ok()
        );
    }

    #[test]
    fn test_verification_uses_params_from_hash() {
        let light = Argon2Hasher::light();
        let strong = Argon2Hasher::with_params(64, 2, 1).unwrap();
        let password = ClearTextPassword::new("secret".to_string());
        let hashed = strong.generate_hash(&password).unwrap();
        assert!(light.compare_hash(&hashed, &password).is_ok());
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            Argon2Hasher::with_params(0, 0, 0),
            Err(PasswordError::InvalidParams(_))
        ));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let hasher = Argon2Hasher::light();
        let password = ClearTextPassword::new("TestPassword123!".to_string());
        let hashed = hasher.generate_hash(&password).unwrap();

        let phc_string = hashed.as_phc_string().to_string();
        assert!(phc_string.starts_with("$argon2id$"));
        let restored = HashedPassword::from_phc_string(phc_string).unwrap();

        assert!(hasher.compare_hash(&restored, &password).is_ok());
    }

    #[test]
    fn test_invalid_phc_string() {
        let result = HashedPassword::from_phc_string("not_a_valid_hash");
        assert!(matches!(result, Err(PasswordError::InvalidHashFormat)));
    }

    #[test]
    fn test_debug_redaction() {
        let password = ClearTextPassword::new("secret".to_string());
        let debug_output = format!("{:?}", password);
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2Hasher::light());
        let hashed = hash_blocking(hasher.clone(), ClearTextPassword::new("pw".to_string()))
            .await
            .unwrap();
        compare_blocking(hasher.clone(), hashed.clone(), ClearTextPassword::new("pw".to_string()))
            .await
            .unwrap();
        let err = compare_blocking(hasher, hashed, ClearTextPassword::new("nope".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, PasswordError::Mismatch));
    }
}
