#![allow(dead_code)]

use hypermob_core::models::field::{Field, FieldKind, CATALOG};
use hypermob_core::models::observation::RawObservation;
use hypermob_core::models::record::DerivedRecord;
use hypermob_core::models::step::Step;
use hypermob_intake::error::IntakeError;
use hypermob_intake::session::{NextOutcome, WizardSession};
use hypermob_intake::store::RecordStore;
use hypermob_scoring::derivation::Derivation;

/// Age 30, 170 cm, 85 kg, GMS 3, no symptoms.
pub fn baseline() -> RawObservation {
    let mut raw: RawObservation = CATALOG
        .iter()
        .filter(|s| s.kind == FieldKind::Binary)
        .map(|s| (s.field, "0"))
        .collect();
    raw.set(Field::Age, "30");
    raw.set(Field::HeightCm, "170");
    raw.set(Field::WeightKg, "85");
    raw.set(Field::Gms, "3");
    raw
}

/// The values `raw` holds for the fields collected on `step`.
pub fn inputs_for(step: Step, raw: &RawObservation) -> Vec<(Field, String)> {
    step.fields()
        .iter()
        .filter_map(|spec| raw.get(spec.field).map(|v| (spec.field, v.to_string())))
        .collect()
}

/// Drive a session from its current step through commit.
pub fn finish(
    session: &mut WizardSession,
    raw: &RawObservation,
    store: &mut RecordStore,
    derivation: &Derivation,
) -> Result<NextOutcome, IntakeError> {
    loop {
        let step = session
            .current_step()
            .ok_or(IntakeError::SessionClosed("ended"))?;
        let outcome = session.on_next(inputs_for(step, raw), store, derivation)?;
        if let NextOutcome::Committed { .. } = outcome {
            return Ok(outcome);
        }
    }
}

/// Commit `raw` as a new row through the wizard.
pub fn add_through_wizard(store: &mut RecordStore, raw: &RawObservation) -> DerivedRecord {
    let derivation = Derivation::default();
    let mut session = WizardSession::create(1);
    match finish(&mut session, raw, store, &derivation).unwrap() {
        NextOutcome::Committed { record, .. } => record,
        other => panic!("expected commit, got {other:?}"),
    }
}
