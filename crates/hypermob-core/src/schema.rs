use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::field::FieldKind;

/// Column names of the canonical record table, in schema order.
pub mod column {
    pub const DISEASE: &str = "disease";
    pub const AGE: &str = "age";
    pub const DST: &str = "dst";
    pub const SCORE: &str = "score";
    pub const BMI: &str = "bmi";
    pub const GMS: &str = "gms";
    pub const GMS_CATEGORY: &str = "gms_category";
    pub const BMI_UNDER_25: &str = "bmi_under_25";
    pub const SKIN_LIGHT: &str = "skin_light";
    pub const SKIN_HEAVY: &str = "skin_heavy";
    pub const KELOID: &str = "keloid";
    pub const STRIAE: &str = "striae";
    pub const HEMORRHAGES: &str = "hemorrhages";
    pub const HERNIA: &str = "hernia";
    pub const PTOSIS: &str = "ptosis";
    pub const TMJ_CLICK: &str = "tmj_click";
    pub const PERIODONTOSIS: &str = "periodontosis";
    pub const DOLICHOSTENOMELIA: &str = "dolichostenomelia";
    pub const GMS_LIGHT: &str = "gms_light";
    pub const GMS_EXPRESSED: &str = "gms_expressed";
    pub const KYPHOSIS: &str = "kyphosis";
    pub const CHEST_DEFORMITY: &str = "chest_deformity";
    pub const FLATFEET: &str = "flatfeet";
    pub const VALGUS: &str = "valgus";
    pub const JOINT_CLICK: &str = "joint_click";
    pub const MVP: &str = "mvp";
    pub const VARICOSE_LIGHT: &str = "varicose_light";
    pub const VARICOSE_HEAVY: &str = "varicose_heavy";
    pub const MYOPIA_LIGHT: &str = "myopia_light";
    pub const MYOPIA_HEAVY: &str = "myopia_heavy";
    pub const GALLBLADDER: &str = "gallbladder";
    pub const GERD: &str = "gerd";
    pub const HYPOTENSION: &str = "hypotension";
    pub const HEIGHT_CM: &str = "height_cm";
    pub const WEIGHT_KG: &str = "weight_kg";
    pub const CLINICIAN_ID: &str = "clinician_id";
}

/// A column of the canonical record table.
///
/// [`Column::ALL`] is the schema: every stored row has exactly these columns
/// in exactly this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Column {
    Disease,
    Age,
    Dst,
    Score,
    Bmi,
    Gms,
    GmsCategory,
    BmiUnder25,
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
    GmsLight,
    GmsExpressed,
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
    HeightCm,
    WeightKg,
    ClinicianId,
}

impl Column {
    pub const ALL: [Column; 36] = [
        Column::Disease,
        Column::Age,
        Column::Dst,
        Column::Score,
        Column::Bmi,
        Column::Gms,
        Column::GmsCategory,
        Column::BmiUnder25,
        Column::SkinLight,
        Column::SkinHeavy,
        Column::Keloid,
        Column::Striae,
        Column::Hemorrhages,
        Column::Hernia,
        Column::Ptosis,
        Column::TmjClick,
        Column::Periodontosis,
        Column::Dolichostenomelia,
        Column::GmsLight,
        Column::GmsExpressed,
        Column::Kyphosis,
        Column::ChestDeformity,
        Column::Flatfeet,
        Column::Valgus,
        Column::JointClick,
        Column::Mvp,
        Column::VaricoseLight,
        Column::VaricoseHeavy,
        Column::MyopiaLight,
        Column::MyopiaHeavy,
        Column::Gallbladder,
        Column::Gerd,
        Column::Hypotension,
        Column::HeightCm,
        Column::WeightKg,
        Column::ClinicianId,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Column::Disease => column::DISEASE,
            Column::Age => column::AGE,
            Column::Dst => column::DST,
            Column::Score => column::SCORE,
            Column::Bmi => column::BMI,
            Column::Gms => column::GMS,
            Column::GmsCategory => column::GMS_CATEGORY,
            Column::BmiUnder25 => column::BMI_UNDER_25,
            Column::SkinLight => column::SKIN_LIGHT,
            Column::SkinHeavy => column::SKIN_HEAVY,
            Column::Keloid => column::KELOID,
            Column::Striae => column::STRIAE,
            Column::Hemorrhages => column::HEMORRHAGES,
            Column::Hernia => column::HERNIA,
            Column::Ptosis => column::PTOSIS,
            Column::TmjClick => column::TMJ_CLICK,
            Column::Periodontosis => column::PERIODONTOSIS,
            Column::Dolichostenomelia => column::DOLICHOSTENOMELIA,
            Column::GmsLight => column::GMS_LIGHT,
            Column::GmsExpressed => column::GMS_EXPRESSED,
            Column::Kyphosis => column::KYPHOSIS,
            Column::ChestDeformity => column::CHEST_DEFORMITY,
            Column::Flatfeet => column::FLATFEET,
            Column::Valgus => column::VALGUS,
            Column::JointClick => column::JOINT_CLICK,
            Column::Mvp => column::MVP,
            Column::VaricoseLight => column::VARICOSE_LIGHT,
            Column::VaricoseHeavy => column::VARICOSE_HEAVY,
            Column::MyopiaLight => column::MYOPIA_LIGHT,
            Column::MyopiaHeavy => column::MYOPIA_HEAVY,
            Column::Gallbladder => column::GALLBLADDER,
            Column::Gerd => column::GERD,
            Column::Hypotension => column::HYPOTENSION,
            Column::HeightCm => column::HEIGHT_CM,
            Column::WeightKg => column::WEIGHT_KG,
            Column::ClinicianId => column::CLINICIAN_ID,
        }
    }

    /// Resolve a column from its stable name.
    pub fn from_name(name: &str) -> Option<Column> {
        Column::ALL.into_iter().find(|c| c.name() == name)
    }

    /// Position of this column in the schema.
    pub fn position(self) -> usize {
        self as usize
    }

    /// The value kind stored in this column.
    pub fn kind(self) -> FieldKind {
        match self {
            Column::Bmi | Column::HeightCm | Column::WeightKg => FieldKind::Decimal,
            Column::Age | Column::Score | Column::Gms | Column::GmsCategory | Column::ClinicianId => {
                FieldKind::Integer
            }
            _ => FieldKind::Binary,
        }
    }

    /// Columns computed by derivation rather than entered by a clinician.
    pub fn is_derived(self) -> bool {
        matches!(
            self,
            Column::Disease
                | Column::Score
                | Column::Bmi
                | Column::GmsCategory
                | Column::BmiUnder25
                | Column::GmsLight
                | Column::GmsExpressed
        )
    }

    /// Columns that may be empty in rows loaded from sheets that predate them.
    pub fn is_nullable(self) -> bool {
        matches!(self, Column::HeightCm | Column::WeightKg)
    }
}

/// The header row of the record table, in schema order.
pub fn column_names() -> Vec<&'static str> {
    Column::ALL.iter().map(|c| c.name()).collect()
}
