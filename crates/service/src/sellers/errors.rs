use thiserror::Error;

/// Business errors for seller identity workflows.
///
/// `InvalidCredentials` deliberately covers both "no such email" and "wrong
/// password" so the authentication path never leaks account existence.
#[derive(Debug, Error)]
pub enum SellerError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("email already registered")]
    Conflict,
    #[error("seller not found")]
    NotFound,
    #[error("incorrect email or password")]
    InvalidCredentials,
    #[error("could not validate credentials")]
    Unauthorized,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl SellerError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            SellerError::Validation(_) => 1001,
            SellerError::Conflict => 1002,
            SellerError::NotFound => 1003,
            SellerError::InvalidCredentials => 1004,
            SellerError::Unauthorized => 1005,
            SellerError::Hash(_) => 1101,
            SellerError::Token(_) => 1102,
            SellerError::Repository(_) => 1200,
        }
    }
}
