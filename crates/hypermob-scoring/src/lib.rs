//! hypermob-scoring
//!
//! Validation rules and the derivation engine. Pure functions over the
//! catalog in `hypermob-core` — no storage, no I/O. Scoring schemes are
//! versioned, named definitions: a deployment picks exactly one.

pub mod derivation;
pub mod error;
pub mod rules;
pub mod schemes;

use hypermob_core::models::record::DerivedRecord;
use hypermob_core::schema::Column;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// The weight one present flag contributes to the symptom score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SymptomWeight {
    pub column: Column,
    pub weight: u32,
}

/// Trait implemented by each symptom scoring scheme.
pub trait ScoringScheme: Send + Sync {
    /// Stable identifier stored in configuration (e.g., "weighted_v2").
    fn id(&self) -> &str;

    /// Human-readable name.
    fn name(&self) -> &str;

    fn version(&self) -> u32;

    /// Flag columns that count toward the score, with their weights.
    fn weights(&self) -> &[SymptomWeight];

    /// Scores at or above this value classify as disease present.
    fn threshold(&self) -> u32;

    /// Sum of weights over the flags set on `record`.
    fn score(&self, record: &DerivedRecord) -> u32 {
        self.contributions(record).iter().map(|w| w.weight).sum()
    }

    /// 1 when `score` reaches the threshold, else 0.
    fn classify(&self, score: u32) -> u8 {
        u8::from(score >= self.threshold())
    }

    /// The weighted flags that are set on `record`, in table order.
    fn contributions(&self, record: &DerivedRecord) -> Vec<SymptomWeight> {
        self.weights()
            .iter()
            .filter(|w| record.get(w.column).as_flag() == Some(1))
            .copied()
            .collect()
    }
}

/// Id of the scheme new deployments use.
pub const DEFAULT_SCHEME_ID: &str = "weighted_v2";

/// Return all registered schemes.
pub fn all_schemes() -> Vec<Box<dyn ScoringScheme>> {
    vec![
        Box::new(schemes::weighted::WeightedV2),
        Box::new(schemes::unweighted::UnweightedV1),
    ]
}

/// Look up a scheme by ID.
pub fn get_scheme(id: &str) -> Option<Box<dyn ScoringScheme>> {
    all_schemes().into_iter().find(|s| s.id() == id)
}
