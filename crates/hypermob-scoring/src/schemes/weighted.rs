use hypermob_core::schema::Column;

use crate::{ScoringScheme, SymptomWeight};

/// Score at or above which the weighted scheme classifies disease.
pub const WEIGHTED_THRESHOLD: u32 = 8;

const fn w(column: Column, weight: u32) -> SymptomWeight {
    SymptomWeight { column, weight }
}

/// Weights of the weighted scheme. Connective-tissue dysplasia and skin
/// hyperextensibility are recorded but not scored.
pub static WEIGHTED_V2_WEIGHTS: [SymptomWeight; 24] = [
    w(Column::Hernia, 3),
    w(Column::Ptosis, 3),
    w(Column::Dolichostenomelia, 3),
    w(Column::GmsExpressed, 3),
    w(Column::ChestDeformity, 3),
    w(Column::VaricoseHeavy, 3),
    w(Column::Keloid, 2),
    w(Column::Striae, 2),
    w(Column::Hemorrhages, 2),
    w(Column::TmjClick, 2),
    w(Column::GmsLight, 2),
    w(Column::Kyphosis, 2),
    w(Column::Flatfeet, 1),
    w(Column::Mvp, 2),
    w(Column::VaricoseLight, 2),
    w(Column::Gallbladder, 2),
    w(Column::Gerd, 2),
    w(Column::BmiUnder25, 1),
    w(Column::Periodontosis, 1),
    w(Column::Valgus, 1),
    w(Column::JointClick, 1),
    w(Column::MyopiaLight, 1),
    w(Column::MyopiaHeavy, 2),
    w(Column::Hypotension, 1),
];

/// Weighted symptom sum with a threshold of 8. The scheme of record.
pub struct WeightedV2;

impl ScoringScheme for WeightedV2 {
    fn id(&self) -> &str {
        "weighted_v2"
    }

    fn name(&self) -> &str {
        "Weighted symptom score"
    }

    fn version(&self) -> u32 {
        2
    }

    fn weights(&self) -> &[SymptomWeight] {
        &WEIGHTED_V2_WEIGHTS
    }

    fn threshold(&self) -> u32 {
        WEIGHTED_THRESHOLD
    }
}
