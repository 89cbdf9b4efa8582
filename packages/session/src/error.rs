use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The token is not a well-formed JWT carrying the expected claims.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// The token's `exp` lies in the past.
    #[error("token expired at {exp} (now {now})")]
    ExpiredToken { exp: i64, now: i64 },

    /// The durable record could not be read or written.
    #[error("session storage error: {0}")]
    Storage(String),
}

impl From<store::StoreError> for SessionError {
    fn from(e: store::StoreError) -> Self {
        SessionError::Storage(e.to_string())
    }
}
