//! Credentials: bearer tokens and password hashes.

use uuid::Uuid;

/// What a verified bearer token says about its holder.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub email: String,
    /// Unix timestamp after which the token is rejected.
    pub exp: i64,
}

/// Issues and verifies the tokens returned by register and login.
pub trait TokenService: Send + Sync {
    fn generate_token(&self, user_id: Uuid, email: &str) -> Result<String, AuthError>;

    /// Checks signature, issuer and expiry.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of a freshly issued token, reported to clients as `expiresIn`.
    fn expiration_seconds(&self) -> i64;
}

/// One-way password hashing. Hashes embed their own salt and parameters.
pub trait PasswordService: Send + Sync {
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// `Ok(false)` on a mismatch; `Err` only when the stored hash is unusable.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Unknown email and wrong password share this variant.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
