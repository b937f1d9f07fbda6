use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::field::Field;

/// Values typed into the intake wizard for one individual.
///
/// Values stay as entered until a step validates them. Blank and
/// whitespace-only values count as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RawObservation {
    values: BTreeMap<Field, String>,
}

impl RawObservation {
    pub fn new() -> Self {
        Self::default()
    }

    /// The entered value, trimmed, or `None` when blank.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.values
            .get(&field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Set a value addressed by the field's stable name.
    pub fn set_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), CoreError> {
        let field = Field::from_name(name)?;
        self.set(field, value);
        Ok(())
    }

    pub fn clear(&mut self, field: Field) {
        self.values.remove(&field);
    }

    /// Catalog fields with no value, in catalog order.
    pub fn missing_fields(&self) -> Vec<Field> {
        Field::all().filter(|f| self.get(*f).is_none()).collect()
    }

    pub fn is_complete(&self) -> bool {
        Field::all().all(|f| self.get(f).is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

impl<S: Into<String>> FromIterator<(Field, S)> for RawObservation {
    fn from_iter<I: IntoIterator<Item = (Field, S)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(f, v)| (f, v.into())).collect(),
        }
    }
}
