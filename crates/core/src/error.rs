use thiserror::Error;

/// Main error type for chess-tally operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid winner: {0} (expected nithin, vishvesh or draw)")]
    InvalidWinner(String),

    #[error("Invalid PIN. Please try again.")]
    AccessDenied,

    #[error("Admin session locked or expired, run `tally admin login`")]
    SessionRequired,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Errors caused by what the user typed, as opposed to storage failures
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_)
                | Error::InvalidWinner(_)
                | Error::AccessDenied
                | Error::SessionRequired
        )
    }
}
