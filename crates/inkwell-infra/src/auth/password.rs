//! Argon2 password hashing implementation.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use inkwell_core::ports::{AuthError, PasswordService};

/// Argon2id password service.
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    /// Argon2id with the crate's recommended parameters.
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }

    /// Argon2id with explicit memory (KiB) and iteration costs.
    ///
    /// Hashes produced with any cost verify with any instance, since the
    /// parameters travel inside the PHC string.
    pub fn with_cost(memory_kib: u32, iterations: u32) -> Result<Self, AuthError> {
        let params = Params::new(memory_kib, iterations, 1, None)
            .map_err(|e| AuthError::HashingError(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

impl PasswordService for Argon2PasswordService {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashingError(e.to_string()))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        let parsed_hash =
            PasswordHash::new(hash).map_err(|e| AuthError::HashingError(e.to_string()))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::HashingError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "password123";

        let hash = service.hash(password).unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(service.verify(password, &hash).unwrap());
        assert!(!service.verify("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_cheap_hash_verifies_with_default_service() {
        let cheap = Argon2PasswordService::with_cost(1024, 1).unwrap();
        let hash = cheap.hash("password123").unwrap();

        assert!(Argon2PasswordService::new().verify("password123", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_an_error() {
        let service = Argon2PasswordService::new();
        assert!(matches!(
            service.verify("password123", "not-a-hash"),
            Err(AuthError::HashingError(_))
        ));
    }
}
