use std::collections::BTreeMap;
use std::fmt;

use hypermob_core::models::field::{Field, FieldKind, AGE_MAX, AGE_MIN, CATALOG};
use hypermob_core::models::observation::RawObservation;
use hypermob_core::models::record::DerivedRecord;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ScoringError;
use crate::rules::{parse_value, ParsedValue, ValidationReason};
use crate::schemes::weighted::WeightedV2;
use crate::{get_scheme, ScoringScheme};

/// Decimal places kept on stored BMI values.
pub const DEFAULT_BMI_DECIMALS: u32 = 2;
pub const MAX_BMI_DECIMALS: u32 = 6;

/// BMI strictly below this sets the `bmi_under_25` flag.
pub const BMI_CUTOFF: f64 = 25.0;

/// Unrounded BMI bounds, inclusive, accepted from entered measurements.
pub const MIN_PLAUSIBLE_BMI: f64 = 5.0;
pub const MAX_PLAUSIBLE_BMI: f64 = 200.0;

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Body-mass index, `weight / (height_m)^2`, rounded to `decimals` places.
pub fn bmi(weight_kg: f64, height_cm: f64, decimals: u32) -> f64 {
    round_to(weight_kg / (height_cm / 100.0).powi(2), decimals)
}

/// Whether the unrounded BMI lies within the plausible bounds. Such a BMI is
/// finite and stays above zero at any supported precision.
pub fn plausible_bmi(weight_kg: f64, height_cm: f64) -> bool {
    let raw = weight_kg / (height_cm / 100.0).powi(2);
    (MIN_PLAUSIBLE_BMI..=MAX_PLAUSIBLE_BMI).contains(&raw)
}

pub fn bmi_under_25(bmi: f64) -> u8 {
    u8::from(bmi < BMI_CUTOFF)
}

/// Degree of generalized joint hypermobility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum GmsCategory {
    /// Score 1–3.
    Normal,
    /// Score 4–5.
    Light,
    /// Score 6–9.
    Expressed,
}

impl GmsCategory {
    pub fn from_score(gms: u8) -> Self {
        match gms {
            0..=3 => GmsCategory::Normal,
            4..=5 => GmsCategory::Light,
            _ => GmsCategory::Expressed,
        }
    }

    /// Stored category value, 1–3.
    pub fn value(self) -> u8 {
        match self {
            GmsCategory::Normal => 1,
            GmsCategory::Light => 2,
            GmsCategory::Expressed => 3,
        }
    }

    pub fn light_flag(self) -> u8 {
        u8::from(self == GmsCategory::Light)
    }

    pub fn expressed_flag(self) -> u8 {
        u8::from(self == GmsCategory::Expressed)
    }
}

/// A complete observation with every value parsed and in domain.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    age: u32,
    height_cm: f64,
    weight_kg: f64,
    gms: u8,
    flags: BTreeMap<Field, u8>,
}

impl Observation {
    /// Parse every catalog field. Any failure is a contract violation: the
    /// wizard validates each step before derivation is reached.
    pub fn parse(raw: &RawObservation) -> Result<Self, ScoringError> {
        let value = |field: Field| -> Result<ParsedValue, ScoringError> {
            parse_value(field.spec(), raw.get(field))
                .map_err(|reason| ScoringError::Contract { field, reason })
        };

        let age = u32::try_from(value(Field::Age)?.as_int()).map_err(|_| ScoringError::Contract {
            field: Field::Age,
            reason: ValidationReason::OutOfRange {
                min: AGE_MIN,
                max: AGE_MAX,
            },
        })?;
        let height_cm = value(Field::HeightCm)?.as_decimal();
        let weight_kg = value(Field::WeightKg)?.as_decimal();
        if !plausible_bmi(weight_kg, height_cm) {
            return Err(ScoringError::Contract {
                field: Field::WeightKg,
                reason: ValidationReason::ImplausibleBmi,
            });
        }
        // In range 1..=9 once parsed.
        let gms = value(Field::Gms)?.as_int() as u8;

        let mut flags = BTreeMap::new();
        for spec in CATALOG.iter().filter(|s| s.kind == FieldKind::Binary) {
            flags.insert(spec.field, value(spec.field)?.as_int() as u8);
        }

        Ok(Self {
            age,
            height_cm,
            weight_kg,
            gms,
            flags,
        })
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    /// Joint-hypermobility score, 1–9.
    pub fn gms(&self) -> u8 {
        self.gms
    }

    /// 0/1 value of a binary field; 0 for non-binary fields.
    pub fn flag(&self, field: Field) -> u8 {
        self.flags.get(&field).copied().unwrap_or(0)
    }
}

/// The derivation engine: BMI precision plus the scoring scheme in force.
pub struct Derivation {
    bmi_decimals: u32,
    scheme: Box<dyn ScoringScheme>,
}

impl Derivation {
    pub fn new(bmi_decimals: u32, scheme: Box<dyn ScoringScheme>) -> Result<Self, ScoringError> {
        if bmi_decimals > MAX_BMI_DECIMALS {
            return Err(ScoringError::Precision(bmi_decimals));
        }
        Ok(Self {
            bmi_decimals,
            scheme,
        })
    }

    pub fn from_scheme_id(scheme_id: &str, bmi_decimals: u32) -> Result<Self, ScoringError> {
        let scheme =
            get_scheme(scheme_id).ok_or_else(|| ScoringError::UnknownScheme(scheme_id.to_string()))?;
        Self::new(bmi_decimals, scheme)
    }

    pub fn scheme(&self) -> &dyn ScoringScheme {
        self.scheme.as_ref()
    }

    pub fn bmi_decimals(&self) -> u32 {
        self.bmi_decimals
    }

    /// Derive the full record for a completed observation.
    pub fn derive(&self, raw: &RawObservation, clinician_id: u32) -> Result<DerivedRecord, ScoringError> {
        let observation = Observation::parse(raw)?;
        Ok(self.derive_observation(&observation, clinician_id))
    }

    pub fn derive_observation(&self, obs: &Observation, clinician_id: u32) -> DerivedRecord {
        let bmi = bmi(obs.weight_kg, obs.height_cm, self.bmi_decimals);
        let category = GmsCategory::from_score(obs.gms);

        let mut record = DerivedRecord {
            disease: 0,
            age: obs.age,
            dst: obs.flag(Field::Dst),
            score: 0,
            bmi,
            gms: obs.gms,
            gms_category: category.value(),
            bmi_under_25: bmi_under_25(bmi),
            skin_light: obs.flag(Field::SkinLight),
            skin_heavy: obs.flag(Field::SkinHeavy),
            keloid: obs.flag(Field::Keloid),
            striae: obs.flag(Field::Striae),
            hemorrhages: obs.flag(Field::Hemorrhages),
            hernia: obs.flag(Field::Hernia),
            ptosis: obs.flag(Field::Ptosis),
            tmj_click: obs.flag(Field::TmjClick),
            periodontosis: obs.flag(Field::Periodontosis),
            dolichostenomelia: obs.flag(Field::Dolichostenomelia),
            gms_light: category.light_flag(),
            gms_expressed: category.expressed_flag(),
            kyphosis: obs.flag(Field::Kyphosis),
            chest_deformity: obs.flag(Field::ChestDeformity),
            flatfeet: obs.flag(Field::Flatfeet),
            valgus: obs.flag(Field::Valgus),
            joint_click: obs.flag(Field::JointClick),
            mvp: obs.flag(Field::Mvp),
            varicose_light: obs.flag(Field::VaricoseLight),
            varicose_heavy: obs.flag(Field::VaricoseHeavy),
            myopia_light: obs.flag(Field::MyopiaLight),
            myopia_heavy: obs.flag(Field::MyopiaHeavy),
            gallbladder: obs.flag(Field::Gallbladder),
            gerd: obs.flag(Field::Gerd),
            hypotension: obs.flag(Field::Hypotension),
            height_cm: Some(obs.height_cm),
            weight_kg: Some(obs.weight_kg),
            clinician_id,
        };

        record.score = self.scheme.score(&record);
        record.disease = self.scheme.classify(record.score);
        record
    }
}

impl Default for Derivation {
    fn default() -> Self {
        Self {
            bmi_decimals: DEFAULT_BMI_DECIMALS,
            scheme: Box::new(WeightedV2),
        }
    }
}

impl fmt::Debug for Derivation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derivation")
            .field("bmi_decimals", &self.bmi_decimals)
            .field("scheme", &self.scheme.id())
            .finish()
    }
}
