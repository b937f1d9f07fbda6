use hypermob_core::models::record::{CellValue, DerivedRecord};

use crate::error::IntakeError;

/// The ordered record table.
///
/// Rows are addressed by position `0..len`. Deleting a row shifts every later
/// row down by one, so positions stay contiguous. Each mutation bumps the
/// revision, which edit sessions use to detect that a captured position may
/// no longer point at the row they opened.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    rows: Vec<DerivedRecord>,
    revision: u64,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All rows in index order, for export and reporting.
    pub fn rows(&self) -> &[DerivedRecord] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Result<&DerivedRecord, IntakeError> {
        self.rows.get(index).ok_or(IntakeError::IndexOutOfRange {
            index,
            len: self.rows.len(),
        })
    }

    /// Replace the whole table with rows read by an import collaborator.
    pub fn load(&mut self, rows: Vec<DerivedRecord>) {
        self.rows = rows;
        self.bump();
        tracing::info!(rows = self.rows.len(), "record table loaded");
    }

    /// Replace the whole table from name-addressed cells. Every row is built
    /// before the table is touched, so one bad row leaves the store unchanged.
    pub fn load_cells<R, C, S>(&mut self, rows: R) -> Result<(), IntakeError>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = (S, CellValue)>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(DerivedRecord::from_cells)
            .collect::<Result<Vec<_>, _>>()?;
        self.load(rows);
        Ok(())
    }

    /// Append a row. Returns its index.
    pub fn add(&mut self, record: DerivedRecord) -> usize {
        self.rows.push(record);
        self.bump();
        let index = self.rows.len() - 1;
        tracing::info!(index, "record added");
        index
    }

    /// Replace the row at `index` in place.
    pub fn update(&mut self, index: usize, record: DerivedRecord) -> Result<(), IntakeError> {
        self.check_index(index)?;
        self.rows[index] = record;
        self.bump();
        tracing::info!(index, "record updated");
        Ok(())
    }

    /// Replace the row at `index` only if the store has not been mutated
    /// since `expected_revision` was read.
    pub fn update_if_revision(
        &mut self,
        index: usize,
        record: DerivedRecord,
        expected_revision: u64,
    ) -> Result<(), IntakeError> {
        self.check_index(index)?;
        if self.revision != expected_revision {
            tracing::warn!(
                index,
                expected = expected_revision,
                actual = self.revision,
                "rejected update of a possibly moved row"
            );
            return Err(IntakeError::StaleIndex {
                index,
                expected: expected_revision,
                actual: self.revision,
            });
        }
        self.update(index, record)
    }

    /// Remove the row at `index`; later rows move down by one.
    pub fn delete(&mut self, index: usize) -> Result<DerivedRecord, IntakeError> {
        self.check_index(index)?;
        let removed = self.rows.remove(index);
        self.bump();
        tracing::info!(index, remaining = self.rows.len(), "record deleted");
        Ok(removed)
    }

    fn check_index(&self, index: usize) -> Result<(), IntakeError> {
        if index < self.rows.len() {
            Ok(())
        } else {
            Err(IntakeError::IndexOutOfRange {
                index,
                len: self.rows.len(),
            })
        }
    }

    fn bump(&mut self) {
        self.revision += 1;
    }
}
