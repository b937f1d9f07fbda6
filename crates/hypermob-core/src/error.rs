use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("column given more than once: {0}")]
    DuplicateColumn(String),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("invalid value for column '{column}': {value}")]
    InvalidCell { column: String, value: String },
}
