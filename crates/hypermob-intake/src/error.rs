use hypermob_core::error::CoreError;
use hypermob_scoring::rules::ValidationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Commit received data that validation should have rejected.
    #[error("internal contract violation: {0}")]
    InternalContract(String),

    #[error("row {index} does not exist (store has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("row {index} may have moved since editing began (revision {expected}, now {actual})")]
    StaleIndex {
        index: usize,
        expected: u64,
        actual: u64,
    },

    #[error("wizard session is {0}")]
    SessionClosed(&'static str),

    #[error("invalid record row: {0}")]
    Record(#[from] CoreError),

    #[error("config error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntakeError {
    /// Whether the user can fix this by correcting entered values. Everything
    /// else aborts the operation with the store left as it was.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, IntakeError::Validation(_))
    }
}
