use std::fmt;

use hypermob_core::models::field::{Field, FieldDomain, FieldKind, FieldSpec};
use hypermob_core::models::observation::RawObservation;
use hypermob_core::models::step::Step;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::derivation::plausible_bmi;

/// Why an entered value was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "snake_case")]
#[ts(export)]
pub enum ValidationReason {
    Missing,
    NotInteger,
    NotNumber,
    NotPositive,
    NotBinary,
    OutOfRange { min: i64, max: i64 },
    /// Height and weight are each valid but give an impossible BMI.
    ImplausibleBmi,
}

impl fmt::Display for ValidationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationReason::Missing => f.write_str("is required"),
            ValidationReason::NotInteger => f.write_str("must be a whole number"),
            ValidationReason::NotNumber => f.write_str("must be a number"),
            ValidationReason::NotPositive => f.write_str("must be greater than zero"),
            ValidationReason::NotBinary => f.write_str("must be 0 or 1"),
            ValidationReason::OutOfRange { min, max } => {
                write!(f, "must be a whole number from {min} to {max}")
            }
            ValidationReason::ImplausibleBmi => f.write_str("gives a BMI outside the plausible range"),
        }
    }
}

/// A step rejected on forward navigation. The user corrects the values and
/// tries again; nothing entered so far is discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct ValidationError {
    pub step: Step,
    /// First failing field on the step.
    pub field: Field,
    pub reason: ValidationReason,
    /// Every failing field on the step, in catalog order.
    pub fields: Vec<Field>,
    pub message: String,
}

/// A value that passed its field's kind and domain checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParsedValue {
    Int(i64),
    Decimal(f64),
}

impl ParsedValue {
    pub fn as_int(self) -> i64 {
        match self {
            ParsedValue::Int(v) => v,
            ParsedValue::Decimal(d) => d as i64,
        }
    }

    pub fn as_decimal(self) -> f64 {
        match self {
            ParsedValue::Int(v) => v as f64,
            ParsedValue::Decimal(d) => d,
        }
    }
}

/// Parse one entered value against its catalog entry.
pub fn parse_value(spec: &FieldSpec, raw: Option<&str>) -> Result<ParsedValue, ValidationReason> {
    let text = raw.map(str::trim).filter(|t| !t.is_empty());
    let Some(text) = text else {
        return Err(ValidationReason::Missing);
    };

    let value = match spec.kind {
        FieldKind::Integer => text
            .parse::<i64>()
            .map(ParsedValue::Int)
            .map_err(|_| ValidationReason::NotInteger)?,
        FieldKind::Binary => text
            .parse::<i64>()
            .map(ParsedValue::Int)
            .map_err(|_| ValidationReason::NotBinary)?,
        FieldKind::Decimal => text
            .parse::<f64>()
            .ok()
            .filter(|d| d.is_finite())
            .map(ParsedValue::Decimal)
            .ok_or(ValidationReason::NotNumber)?,
    };

    match spec.domain {
        FieldDomain::Positive if value.as_decimal() <= 0.0 => Err(ValidationReason::NotPositive),
        FieldDomain::Range { min, max } if !(min..=max).contains(&value.as_int()) => {
            Err(ValidationReason::OutOfRange { min, max })
        }
        FieldDomain::Binary if !matches!(value.as_int(), 0 | 1) => Err(ValidationReason::NotBinary),
        _ => Ok(value),
    }
}

const ANTHROPOMETRICS_MESSAGE: &str = "Enter valid measurements: age must be a whole number of years, \
     height_cm and weight_kg must be positive numbers giving a plausible BMI";

/// Validate every field a step collects.
///
/// The step passes only if all of its fields pass. The anthropometrics step
/// reports a single message covering age, height and weight together; other
/// steps name the first failing field.
pub fn validate_step(step: Step, raw: &RawObservation) -> Result<(), ValidationError> {
    let mut failures: Vec<(Field, ValidationReason)> = step
        .fields()
        .into_iter()
        .filter_map(|spec| {
            parse_value(spec, raw.get(spec.field))
                .err()
                .map(|reason| (spec.field, reason))
        })
        .collect();

    if failures.is_empty() && step == Step::Anthropometrics && !measurements_plausible(raw) {
        failures = vec![
            (Field::HeightCm, ValidationReason::ImplausibleBmi),
            (Field::WeightKg, ValidationReason::ImplausibleBmi),
        ];
    }

    let Some(&(field, reason)) = failures.first() else {
        return Ok(());
    };

    let message = match step {
        Step::Anthropometrics => ANTHROPOMETRICS_MESSAGE.to_string(),
        _ => {
            let spec = field.spec();
            format!("{} ({}) {reason}", spec.label, spec.name)
        }
    };

    tracing::debug!(step = ?step, field = field.name(), %reason, "step rejected");

    Err(ValidationError {
        step,
        field,
        reason,
        fields: failures.into_iter().map(|(f, _)| f).collect(),
        message,
    })
}

/// Whether entered height and weight give a BMI that can be stored. Values
/// that fail to parse are reported by their own field checks.
fn measurements_plausible(raw: &RawObservation) -> bool {
    let measure = |field: Field| parse_value(field.spec(), raw.get(field)).map(ParsedValue::as_decimal);
    match (measure(Field::HeightCm), measure(Field::WeightKg)) {
        (Ok(height_cm), Ok(weight_kg)) => plausible_bmi(weight_kg, height_cm),
        _ => true,
    }
}

/// Validate every step in wizard order, stopping at the first rejection.
pub fn validate_all(raw: &RawObservation) -> Result<(), ValidationError> {
    Step::ALL
        .into_iter()
        .try_for_each(|step| validate_step(step, raw))
}
