use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::models::field::{AGE_MAX, AGE_MIN, GMS_MAX, GMS_MIN};
use crate::schema::Column;

/// A single table cell as exchanged with import/export collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Int(i64),
    Decimal(f64),
    Empty,
}

impl CellValue {
    /// Whole-number value. Integral decimals such as `1.0` are accepted since
    /// spreadsheet readers rarely preserve integer typing.
    pub fn as_int(self) -> Option<i64> {
        match self {
            CellValue::Int(v) => Some(v),
            CellValue::Decimal(d) if d.is_finite() && d.fract() == 0.0 => Some(d as i64),
            _ => None,
        }
    }

    pub fn as_decimal(self) -> Option<f64> {
        match self {
            CellValue::Int(v) => Some(v as f64),
            CellValue::Decimal(d) if d.is_finite() => Some(d),
            _ => None,
        }
    }

    /// 0/1 flag value.
    pub fn as_flag(self) -> Option<u8> {
        match self.as_int() {
            Some(0) => Some(0),
            Some(1) => Some(1),
            _ => None,
        }
    }

    pub fn is_empty(self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(v) => write!(f, "{v}"),
            CellValue::Decimal(d) => write!(f, "{d}"),
            CellValue::Empty => Ok(()),
        }
    }
}

/// A committed row of the record table: entered observations plus every
/// value derived from them.
///
/// Field order is the canonical column order ([`Column::ALL`]). Flags are
/// stored as 0/1 so statistics and model-training consumers can read the
/// table without conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DerivedRecord {
    pub disease: u8,
    pub age: u32,
    pub dst: u8,
    /// Symptom score under the scheme in force at commit time.
    pub score: u32,
    pub bmi: f64,
    pub gms: u8,
    /// 1 = within normal range, 2 = light, 3 = expressed.
    pub gms_category: u8,
    pub bmi_under_25: u8,
    pub skin_light: u8,
    pub skin_heavy: u8,
    pub keloid: u8,
    pub striae: u8,
    pub hemorrhages: u8,
    pub hernia: u8,
    pub ptosis: u8,
    pub tmj_click: u8,
    pub periodontosis: u8,
    pub dolichostenomelia: u8,
    pub gms_light: u8,
    pub gms_expressed: u8,
    pub kyphosis: u8,
    pub chest_deformity: u8,
    pub flatfeet: u8,
    pub valgus: u8,
    pub joint_click: u8,
    pub mvp: u8,
    pub varicose_light: u8,
    pub varicose_heavy: u8,
    pub myopia_light: u8,
    pub myopia_heavy: u8,
    pub gallbladder: u8,
    pub gerd: u8,
    pub hypotension: u8,
    /// Empty on rows imported from sheets that only kept BMI.
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub clinician_id: u32,
}

impl DerivedRecord {
    /// Read a column by name-resolved [`Column`].
    pub fn get(&self, column: Column) -> CellValue {
        let flag = |v: u8| CellValue::Int(i64::from(v));
        match column {
            Column::Disease => flag(self.disease),
            Column::Age => CellValue::Int(i64::from(self.age)),
            Column::Dst => flag(self.dst),
            Column::Score => CellValue::Int(i64::from(self.score)),
            Column::Bmi => CellValue::Decimal(self.bmi),
            Column::Gms => CellValue::Int(i64::from(self.gms)),
            Column::GmsCategory => CellValue::Int(i64::from(self.gms_category)),
            Column::BmiUnder25 => flag(self.bmi_under_25),
            Column::SkinLight => flag(self.skin_light),
            Column::SkinHeavy => flag(self.skin_heavy),
            Column::Keloid => flag(self.keloid),
            Column::Striae => flag(self.striae),
            Column::Hemorrhages => flag(self.hemorrhages),
            Column::Hernia => flag(self.hernia),
            Column::Ptosis => flag(self.ptosis),
            Column::TmjClick => flag(self.tmj_click),
            Column::Periodontosis => flag(self.periodontosis),
            Column::Dolichostenomelia => flag(self.dolichostenomelia),
            Column::GmsLight => flag(self.gms_light),
            Column::GmsExpressed => flag(self.gms_expressed),
            Column::Kyphosis => flag(self.kyphosis),
            Column::ChestDeformity => flag(self.chest_deformity),
            Column::Flatfeet => flag(self.flatfeet),
            Column::Valgus => flag(self.valgus),
            Column::JointClick => flag(self.joint_click),
            Column::Mvp => flag(self.mvp),
            Column::VaricoseLight => flag(self.varicose_light),
            Column::VaricoseHeavy => flag(self.varicose_heavy),
            Column::MyopiaLight => flag(self.myopia_light),
            Column::MyopiaHeavy => flag(self.myopia_heavy),
            Column::Gallbladder => flag(self.gallbladder),
            Column::Gerd => flag(self.gerd),
            Column::Hypotension => flag(self.hypotension),
            Column::HeightCm => self.height_cm.map_or(CellValue::Empty, CellValue::Decimal),
            Column::WeightKg => self.weight_kg.map_or(CellValue::Empty, CellValue::Decimal),
            Column::ClinicianId => CellValue::Int(i64::from(self.clinician_id)),
        }
    }

    /// Write a column, enforcing the column's value domain.
    pub fn set(&mut self, column: Column, value: CellValue) -> Result<(), CoreError> {
        match column {
            Column::Disease => self.disease = flag(column, value)?,
            Column::Age => self.age = bounded(column, value, AGE_MIN, AGE_MAX)? as u32,
            Column::Dst => self.dst = flag(column, value)?,
            Column::Score => self.score = bounded(column, value, 0, i64::from(u32::MAX))? as u32,
            Column::Bmi => self.bmi = positive(column, value)?,
            Column::Gms => self.gms = bounded(column, value, GMS_MIN, GMS_MAX)? as u8,
            Column::GmsCategory => self.gms_category = bounded(column, value, 1, 3)? as u8,
            Column::BmiUnder25 => self.bmi_under_25 = flag(column, value)?,
            Column::SkinLight => self.skin_light = flag(column, value)?,
            Column::SkinHeavy => self.skin_heavy = flag(column, value)?,
            Column::Keloid => self.keloid = flag(column, value)?,
            Column::Striae => self.striae = flag(column, value)?,
            Column::Hemorrhages => self.hemorrhages = flag(column, value)?,
            Column::Hernia => self.hernia = flag(column, value)?,
            Column::Ptosis => self.ptosis = flag(column, value)?,
            Column::TmjClick => self.tmj_click = flag(column, value)?,
            Column::Periodontosis => self.periodontosis = flag(column, value)?,
            Column::Dolichostenomelia => self.dolichostenomelia = flag(column, value)?,
            Column::GmsLight => self.gms_light = flag(column, value)?,
            Column::GmsExpressed => self.gms_expressed = flag(column, value)?,
            Column::Kyphosis => self.kyphosis = flag(column, value)?,
            Column::ChestDeformity => self.chest_deformity = flag(column, value)?,
            Column::Flatfeet => self.flatfeet = flag(column, value)?,
            Column::Valgus => self.valgus = flag(column, value)?,
            Column::JointClick => self.joint_click = flag(column, value)?,
            Column::Mvp => self.mvp = flag(column, value)?,
            Column::VaricoseLight => self.varicose_light = flag(column, value)?,
            Column::VaricoseHeavy => self.varicose_heavy = flag(column, value)?,
            Column::MyopiaLight => self.myopia_light = flag(column, value)?,
            Column::MyopiaHeavy => self.myopia_heavy = flag(column, value)?,
            Column::Gallbladder => self.gallbladder = flag(column, value)?,
            Column::Gerd => self.gerd = flag(column, value)?,
            Column::Hypotension => self.hypotension = flag(column, value)?,
            Column::HeightCm => self.height_cm = nullable(column, value)?,
            Column::WeightKg => self.weight_kg = nullable(column, value)?,
            Column::ClinicianId => {
                self.clinician_id = bounded(column, value, 0, i64::from(u32::MAX))? as u32
            }
        }
        Ok(())
    }

    /// Build a record from cells addressed by column name.
    ///
    /// Cells may arrive in any order. Unknown or repeated names, missing
    /// non-nullable columns and out-of-domain values are rejected.
    pub fn from_cells<I, S>(cells: I) -> Result<Self, CoreError>
    where
        I: IntoIterator<Item = (S, CellValue)>,
        S: AsRef<str>,
    {
        let mut record = Self::blank();
        let mut seen = BTreeSet::new();
        for (name, value) in cells {
            let name = name.as_ref();
            let column =
                Column::from_name(name).ok_or_else(|| CoreError::UnknownColumn(name.to_string()))?;
            if !seen.insert(column) {
                return Err(CoreError::DuplicateColumn(name.to_string()));
            }
            record.set(column, value)?;
        }

        if let Some(missing) = Column::ALL
            .iter()
            .find(|c| !c.is_nullable() && !seen.contains(*c))
        {
            return Err(CoreError::MissingColumn(missing.name().to_string()));
        }
        Ok(record)
    }

    /// Every column with its value, in schema order.
    pub fn to_cells(&self) -> Vec<(Column, CellValue)> {
        Column::ALL.iter().map(|c| (*c, self.get(*c))).collect()
    }

    /// Whether the entered height and weight were kept on this row.
    pub fn has_anthropometrics(&self) -> bool {
        self.height_cm.is_some() && self.weight_kg.is_some()
    }

    fn blank() -> Self {
        Self {
            disease: 0,
            age: 0,
            dst: 0,
            score: 0,
            bmi: 0.0,
            gms: 0,
            gms_category: 0,
            bmi_under_25: 0,
            skin_light: 0,
            skin_heavy: 0,
            keloid: 0,
            striae: 0,
            hemorrhages: 0,
            hernia: 0,
            ptosis: 0,
            tmj_click: 0,
            periodontosis: 0,
            dolichostenomelia: 0,
            gms_light: 0,
            gms_expressed: 0,
            kyphosis: 0,
            chest_deformity: 0,
            flatfeet: 0,
            valgus: 0,
            joint_click: 0,
            mvp: 0,
            varicose_light: 0,
            varicose_heavy: 0,
            myopia_light: 0,
            myopia_heavy: 0,
            gallbladder: 0,
            gerd: 0,
            hypotension: 0,
            height_cm: None,
            weight_kg: None,
            clinician_id: 0,
        }
    }
}

fn invalid(column: Column, value: CellValue) -> CoreError {
    CoreError::InvalidCell {
        column: column.name().to_string(),
        value: value.to_string(),
    }
}

fn flag(column: Column, value: CellValue) -> Result<u8, CoreError> {
    value.as_flag().ok_or_else(|| invalid(column, value))
}

fn bounded(column: Column, value: CellValue, min: i64, max: i64) -> Result<i64, CoreError> {
    value
        .as_int()
        .filter(|v| (min..=max).contains(v))
        .ok_or_else(|| invalid(column, value))
}

fn positive(column: Column, value: CellValue) -> Result<f64, CoreError> {
    value
        .as_decimal()
        .filter(|v| *v > 0.0)
        .ok_or_else(|| invalid(column, value))
}

fn nullable(column: Column, value: CellValue) -> Result<Option<f64>, CoreError> {
    if value.is_empty() {
        return Ok(None);
    }
    positive(column, value).map(Some)
}
