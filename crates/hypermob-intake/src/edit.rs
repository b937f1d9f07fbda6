use hypermob_core::models::field::Field;
use hypermob_core::models::observation::RawObservation;
use hypermob_core::models::record::{CellValue, DerivedRecord};

use crate::error::IntakeError;

/// Wizard values reconstructed from a stored row.
#[derive(Debug, Clone, PartialEq)]
pub struct EditPrefill {
    pub raw: RawObservation,
    /// Fields the row does not carry. They are left blank and must be
    /// re-entered before the row can be re-derived.
    pub missing: Vec<Field>,
}

impl EditPrefill {
    pub fn can_fully_reconstruct(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Map a stored row back to wizard input.
///
/// Each field is read from the column of the same name. Derived columns are
/// not read back; they are recomputed on commit. Values the row lacks are
/// reported in [`EditPrefill::missing`] instead of being estimated.
pub fn to_raw_observation(record: &DerivedRecord) -> Result<EditPrefill, IntakeError> {
    let mut raw = RawObservation::new();
    let mut missing = Vec::new();

    for field in Field::all() {
        let column = field.column().ok_or_else(|| {
            IntakeError::InternalContract(format!("field '{}' has no record column", field.name()))
        })?;
        match record.get(column) {
            CellValue::Empty => missing.push(field),
            value => raw.set(field, value.to_string()),
        }
    }

    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|f| f.name()).collect();
        tracing::warn!(fields = ?names, "row cannot be fully reconstructed");
    }

    Ok(EditPrefill { raw, missing })
}
