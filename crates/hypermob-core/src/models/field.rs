use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::step::Step;
use crate::schema::{column, Column};

/// The value kind a field or column holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldKind {
    /// Whole number.
    Integer,
    /// Finite decimal number.
    Decimal,
    /// Present/absent flag stored as 0 or 1.
    Binary,
}

/// The set of values a field accepts once parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldDomain {
    /// Strictly greater than zero.
    Positive,
    /// Inclusive integer range.
    Range { min: i64, max: i64 },
    /// Exactly 0 or 1.
    Binary,
}

/// A clinician-entered observation field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Field {
    Age,
    HeightCm,
    WeightKg,
    Dst,
    Gms,
    SkinLight,
    SkinHeavy,
    Keloid,
    Striae,
    Hemorrhages,
    Hernia,
    Ptosis,
    TmjClick,
    Periodontosis,
    Dolichostenomelia,
    Kyphosis,
    ChestDeformity,
    Flatfeet,
    Valgus,
    JointClick,
    Mvp,
    VaricoseLight,
    VaricoseHeavy,
    MyopiaLight,
    MyopiaHeavy,
    Gallbladder,
    Gerd,
    Hypotension,
}

/// Catalog entry describing one field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub field: Field,
    /// Stable name, shared with the record column that stores the value.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub domain: FieldDomain,
    pub step: Step,
    /// Whether the value feeds BMI, GMS categorization or the symptom score.
    pub derived_from: bool,
}

const fn binary(
    field: Field,
    name: &'static str,
    label: &'static str,
    step: Step,
    derived_from: bool,
) -> FieldSpec {
    FieldSpec {
        field,
        name,
        label,
        kind: FieldKind::Binary,
        domain: FieldDomain::Binary,
        step,
        derived_from,
    }
}

/// Accepted age in whole years, inclusive.
pub const AGE_MIN: i64 = 1;
pub const AGE_MAX: i64 = 130;

/// Joint-hypermobility score bounds, inclusive.
pub const GMS_MIN: i64 = 1;
pub const GMS_MAX: i64 = 9;

/// The field catalog, in entry order.
pub static CATALOG: [FieldSpec; 28] = [
    FieldSpec {
        field: Field::Age,
        name: column::AGE,
        label: "Age (years)",
        kind: FieldKind::Integer,
        domain: FieldDomain::Range {
            min: AGE_MIN,
            max: AGE_MAX,
        },
        step: Step::Anthropometrics,
        derived_from: false,
    },
    FieldSpec {
        field: Field::HeightCm,
        name: column::HEIGHT_CM,
        label: "Height (cm)",
        kind: FieldKind::Decimal,
        domain: FieldDomain::Positive,
        step: Step::Anthropometrics,
        derived_from: true,
    },
    FieldSpec {
        field: Field::WeightKg,
        name: column::WEIGHT_KG,
        label: "Weight (kg)",
        kind: FieldKind::Decimal,
        domain: FieldDomain::Positive,
        step: Step::Anthropometrics,
        derived_from: true,
    },
    binary(Field::Dst, column::DST, "Connective tissue dysplasia", Step::ConnectiveTissue, false),
    FieldSpec {
        field: Field::Gms,
        name: column::GMS,
        label: "Joint hypermobility score (1-9)",
        kind: FieldKind::Integer,
        domain: FieldDomain::Range {
            min: GMS_MIN,
            max: GMS_MAX,
        },
        step: Step::JointMobility,
        derived_from: true,
    },
    binary(Field::SkinLight, column::SKIN_LIGHT, "Skin hyperextensibility, light", Step::Skin, false),
    binary(Field::SkinHeavy, column::SKIN_HEAVY, "Skin hyperextensibility, heavy", Step::Skin, false),
    binary(Field::Keloid, column::KELOID, "Keloid scars", Step::Keloid, true),
    binary(Field::Striae, column::STRIAE, "Striae", Step::Striae, true),
    binary(Field::Hemorrhages, column::HEMORRHAGES, "Hemorrhages", Step::Hemorrhages, true),
    binary(Field::Hernia, column::HERNIA, "Hernias", Step::Hernia, true),
    binary(Field::Ptosis, column::PTOSIS, "Visceral ptosis", Step::Ptosis, true),
    binary(Field::TmjClick, column::TMJ_CLICK, "TMJ click", Step::TmjClick, true),
    binary(Field::Periodontosis, column::PERIODONTOSIS, "Periodontosis", Step::Periodontosis, true),
    binary(
        Field::Dolichostenomelia,
        column::DOLICHOSTENOMELIA,
        "Dolichostenomelia",
        Step::Dolichostenomelia,
        true,
    ),
    binary(Field::Kyphosis, column::KYPHOSIS, "Kyphosis or lordosis", Step::Kyphosis, true),
    binary(
        Field::ChestDeformity,
        column::CHEST_DEFORMITY,
        "Chest deformity",
        Step::ChestDeformity,
        true,
    ),
    binary(Field::Flatfeet, column::FLATFEET, "Flat feet", Step::Flatfeet, true),
    binary(Field::Valgus, column::VALGUS, "Valgus foot", Step::Valgus, true),
    binary(Field::JointClick, column::JOINT_CLICK, "Joint clicking", Step::JointClick, true),
    binary(Field::Mvp, column::MVP, "Mitral valve prolapse", Step::MitralProlapse, true),
    binary(Field::VaricoseLight, column::VARICOSE_LIGHT, "Varicose veins, light", Step::Varicose, true),
    binary(Field::VaricoseHeavy, column::VARICOSE_HEAVY, "Varicose veins, heavy", Step::Varicose, true),
    binary(Field::MyopiaLight, column::MYOPIA_LIGHT, "Myopia, light", Step::Myopia, true),
    binary(Field::MyopiaHeavy, column::MYOPIA_HEAVY, "Myopia, heavy", Step::Myopia, true),
    binary(Field::Gallbladder, column::GALLBLADDER, "Gallbladder anomalies", Step::Gallbladder, true),
    binary(Field::Gerd, column::GERD, "Gastroesophageal reflux", Step::Gerd, true),
    binary(Field::Hypotension, column::HYPOTENSION, "Arterial hypotension", Step::Hypotension, true),
];

impl Field {
    /// Catalog entry for this field.
    pub fn spec(self) -> &'static FieldSpec {
        // CATALOG is declared in `Field` variant order.
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }

    pub fn kind(self) -> FieldKind {
        self.spec().kind
    }

    pub fn step(self) -> Step {
        self.spec().step
    }

    pub fn from_name(name: &str) -> Result<Field, CoreError> {
        CATALOG
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| spec.field)
            .ok_or_else(|| CoreError::UnknownField(name.to_string()))
    }

    /// The record column storing this field, resolved by name.
    pub fn column(self) -> Option<Column> {
        Column::from_name(self.name())
    }

    /// All catalog fields in entry order.
    pub fn all() -> impl Iterator<Item = Field> {
        CATALOG.iter().map(|spec| spec.field)
    }
}

/// Ordered catalog entries for one wizard step.
pub fn fields_for_step(step: Step) -> Vec<&'static FieldSpec> {
    step.fields()
}
