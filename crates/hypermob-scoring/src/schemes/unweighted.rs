use hypermob_core::schema::Column;

use crate::{ScoringScheme, SymptomWeight};

/// Count of present symptoms at or above which the unweighted scheme
/// classifies disease.
pub const UNWEIGHTED_THRESHOLD: u32 = 5;

/// Every symptom flag and both joint-mobility degree flags count once.
/// BMI and connective-tissue dysplasia are not counted.
pub static UNWEIGHTED_V1_WEIGHTS: std::sync::LazyLock<Vec<SymptomWeight>> =
    std::sync::LazyLock::new(|| {
        [
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
        ]
        .into_iter()
        .map(|column| SymptomWeight { column, weight: 1 })
        .collect()
    });

/// Unweighted count of present symptoms with a threshold of 5. Kept for
/// deployments whose historical tables were classified this way.
pub struct UnweightedV1;

impl ScoringScheme for UnweightedV1 {
    fn id(&self) -> &str {
        "unweighted_v1"
    }

    fn name(&self) -> &str {
        "Unweighted symptom count"
    }

    fn version(&self) -> u32 {
        1
    }

    fn weights(&self) -> &[SymptomWeight] {
        &UNWEIGHTED_V1_WEIGHTS
    }

    fn threshold(&self) -> u32 {
        UNWEIGHTED_THRESHOLD
    }
}
