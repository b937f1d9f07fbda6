use hypermob_core::models::observation::RawObservation;
use hypermob_core::models::record::DerivedRecord;
use hypermob_scoring::derivation::Derivation;
use serde::{Deserialize, Serialize};

use crate::error::IntakeError;
use crate::store::RecordStore;

/// Where a finished wizard writes its row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SessionMode {
    /// Append a new row.
    Create,
    /// Replace the row at `index`, provided the store is still at `revision`.
    Edit { index: usize, revision: u64 },
}

/// Derive a record from a completed observation and write it.
///
/// Either the whole row is derived and written, or an error is returned and
/// the store is unchanged. Returns the row's index with the stored record.
pub fn commit(
    store: &mut RecordStore,
    derivation: &Derivation,
    raw: &RawObservation,
    mode: SessionMode,
    clinician_id: u32,
) -> Result<(usize, DerivedRecord), IntakeError> {
    let missing = raw.missing_fields();
    if !missing.is_empty() {
        let names: Vec<_> = missing.iter().map(|f| f.name()).collect();
        tracing::error!(fields = ?names, "commit reached with incomplete observation");
        return Err(IntakeError::InternalContract(format!(
            "observation is missing {}",
            names.join(", ")
        )));
    }

    let record = derivation.derive(raw, clinician_id).map_err(|e| {
        tracing::error!(error = %e, "derivation rejected a validated observation");
        IntakeError::InternalContract(e.to_string())
    })?;

    let index = match mode {
        SessionMode::Create => store.add(record.clone()),
        SessionMode::Edit { index, revision } => {
            store.update_if_revision(index, record.clone(), revision)?;
            index
        }
    };

    Ok((index, record))
}
