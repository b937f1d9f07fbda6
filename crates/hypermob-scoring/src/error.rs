use hypermob_core::models::field::Field;
use thiserror::Error;

use crate::rules::ValidationReason;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("unknown scoring scheme: {0}")]
    UnknownScheme(String),

    /// Derivation received an observation that validation should have
    /// rejected. Indicates a caller bug, not a data-entry mistake.
    #[error("observation field '{}' is not derivable: {reason}", .field.name())]
    Contract {
        field: Field,
        reason: ValidationReason,
    },

    #[error("BMI precision of {0} decimals is not supported")]
    Precision(u32),
}
