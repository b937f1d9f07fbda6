use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::field::{self, FieldSpec};

/// A page of the intake wizard.
///
/// Steps are visited in [`Step::ALL`] order. The fields a step collects are
/// declared on the fields themselves in the catalog, so adding or removing a
/// step cannot leave validation and data entry out of step with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Step {
    Anthropometrics,
    ConnectiveTissue,
    JointMobility,
    Skin,
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
    MitralProlapse,
    Varicose,
    Myopia,
    Gallbladder,
    Gerd,
    Hypotension,
}

impl Step {
    pub const ALL: [Step; 23] = [
        Step::Anthropometrics,
        Step::ConnectiveTissue,
        Step::JointMobility,
        Step::Skin,
        Step::Keloid,
        Step::Striae,
        Step::Hemorrhages,
        Step::Hernia,
        Step::Ptosis,
        Step::TmjClick,
        Step::Periodontosis,
        Step::Dolichostenomelia,
        Step::Kyphosis,
        Step::ChestDeformity,
        Step::Flatfeet,
        Step::Valgus,
        Step::JointClick,
        Step::MitralProlapse,
        Step::Varicose,
        Step::Myopia,
        Step::Gallbladder,
        Step::Gerd,
        Step::Hypotension,
    ];

    pub const FIRST: Step = Step::Anthropometrics;
    pub const LAST: Step = Step::Hypotension;

    /// Zero-based position of this step in the wizard.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Step> {
        Step::ALL.get(self.index() + 1).copied()
    }

    pub fn prev(self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Step::ALL[i])
    }

    pub fn is_last(self) -> bool {
        self == Step::LAST
    }

    /// Human-readable page title.
    pub fn title(self) -> &'static str {
        match self {
            Step::Anthropometrics => "Age, height and weight",
            Step::ConnectiveTissue => "Connective tissue dysplasia",
            Step::JointMobility => "Generalized joint hypermobility",
            Step::Skin => "Skin hyperextensibility",
            Step::Keloid => "Keloid scars",
            Step::Striae => "Striae",
            Step::Hemorrhages => "Hemorrhages",
            Step::Hernia => "Hernias",
            Step::Ptosis => "Visceral ptosis",
            Step::TmjClick => "Temporomandibular joint click",
            Step::Periodontosis => "Periodontosis",
            Step::Dolichostenomelia => "Dolichostenomelia",
            Step::Kyphosis => "Kyphosis or lordosis",
            Step::ChestDeformity => "Chest deformity",
            Step::Flatfeet => "Flat feet",
            Step::Valgus => "Valgus foot",
            Step::JointClick => "Joint clicking",
            Step::MitralProlapse => "Mitral valve prolapse",
            Step::Varicose => "Varicose veins",
            Step::Myopia => "Myopia",
            Step::Gallbladder => "Gallbladder anomalies",
            Step::Gerd => "Gastroesophageal reflux",
            Step::Hypotension => "Arterial hypotension",
        }
    }

    /// The catalog entries collected on this step, in catalog order.
    pub fn fields(self) -> Vec<&'static FieldSpec> {
        field::CATALOG.iter().filter(|spec| spec.step == self).collect()
    }
}
