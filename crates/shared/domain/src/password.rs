//! Credential codec - one-way password hashing and verification.
//!
//! DDD: `Password` is a value object holding a stored hash; the codec is a
//! domain service so use-cases can swap it for a fake in tests.

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as HashError, PasswordHash, PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Algorithm, Argon2, Params, Version,
};

use crate::error::{DomainError, DomainResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Stored password hash in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output (security)
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: impl Into<String>) -> Self {
        Self { hash: hash.into() }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// A row without a stored hash never verifies.
    pub fn is_empty(&self) -> bool {
        self.hash.is_empty()
    }
}

impl From<Password> for String {
    fn from(password: Password) -> Self {
        password.hash
    }
}

/// Hashes plaintext passwords and checks them against stored hashes.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait CredentialCodec: Send + Sync {
    /// Produce a salted one-way hash of `plain_text`.
    ///
    /// # Errors
    /// `DomainError::Encoding` if the hashing primitive rejects the input.
    fn hash(&self, plain_text: &str) -> DomainResult<Password>;

    /// Check `plain_text` against `stored`.
    ///
    /// A wrong password is `Ok(false)`, never an error.
    ///
    /// # Errors
    /// `DomainError::Encoding` if `stored` is not a parseable hash.
    fn verify(&self, stored: &Password, plain_text: &str) -> DomainResult<bool>;
}

/// Argon2id implementation of [`CredentialCodec`].
#[derive(Clone)]
pub struct Argon2Codec {
    argon2: Argon2<'static>,
}

impl Argon2Codec {
    /// Build a codec with explicit cost parameters.
    ///
    /// `memory_kib` is the memory cost in KiB, `iterations` the time cost and
    /// `parallelism` the lane count.
    pub fn new(memory_kib: u32, iterations: u32, parallelism: u32) -> DomainResult<Self> {
        let params = Params::new(memory_kib, iterations, parallelism, None)
            .map_err(|e| DomainError::internal(format!("Invalid Argon2 parameters: {}", e)))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2Codec {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl CredentialCodec for Argon2Codec {
    fn hash(&self, plain_text: &str) -> DomainResult<Password> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self
            .argon2
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| DomainError::encoding(format!("Password hash failed: {}", e)))?;
        Ok(Password::from_hash(hash.to_string()))
    }

    fn verify(&self, stored: &Password, plain_text: &str) -> DomainResult<bool> {
        let parsed = PasswordHash::new(stored.as_str())
            .map_err(|e| DomainError::encoding(format!("Invalid hash format: {}", e)))?;

        // Output comparison inside argon2 is constant-time.
        match self.argon2.verify_password(plain_text.as_bytes(), &parsed) {
            Ok(()) => Ok(true),
            Err(HashError::Password) => Ok(false),
            Err(e) => Err(DomainError::encoding(format!(
                "Password verification failed: {}",
                e
            ))),
        }
    }
}
