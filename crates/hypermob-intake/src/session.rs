use hypermob_core::models::field::{Field, FieldSpec};
use hypermob_core::models::observation::RawObservation;
use hypermob_core::models::record::DerivedRecord;
use hypermob_core::models::step::Step;
use hypermob_scoring::derivation::Derivation;
use hypermob_scoring::rules::{validate_step, ValidationError};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::commit::{commit, SessionMode};
use crate::edit;
use crate::error::IntakeError;
use crate::store::RecordStore;

/// Where a wizard session is. `Committed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "state", rename_all = "snake_case")]
#[ts(export)]
pub enum SessionState {
    Active { step: Step },
    Committed { index: usize },
    Cancelled,
}

/// User navigation input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Next,
    Back,
    Cancel,
}

/// Outcome of an event before guards run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advance(Step),
    Retreat(Step),
    Stay,
    Commit,
    Cancel,
}

/// The wizard's transition table.
///
/// `Advance` and `Commit` are guarded by validation of the step being left;
/// `Retreat`, `Stay` and `Cancel` are unguarded.
pub fn transition(step: Step, event: Event) -> Transition {
    match event {
        Event::Next => step.next().map_or(Transition::Commit, Transition::Advance),
        Event::Back => step.prev().map_or(Transition::Stay, Transition::Retreat),
        Event::Cancel => Transition::Cancel,
    }
}

/// Result of a successful forward step.
#[derive(Debug, Clone, PartialEq)]
pub enum NextOutcome {
    Advanced(Step),
    Committed { index: usize, record: DerivedRecord },
}

/// One pass through the intake wizard, creating a row or editing one.
///
/// The session owns the entered values until it ends. Validation failures
/// keep the session on its current step with everything entered retained.
#[derive(Debug)]
pub struct WizardSession {
    id: Uuid,
    mode: SessionMode,
    state: SessionState,
    raw: RawObservation,
    clinician_id: u32,
    error: Option<ValidationError>,
    missing_on_open: Vec<Field>,
}

impl WizardSession {
    /// Open a session that appends a new row.
    pub fn create(clinician_id: u32) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            mode: SessionMode::Create,
            state: SessionState::Active { step: Step::FIRST },
            raw: RawObservation::new(),
            clinician_id,
            error: None,
            missing_on_open: Vec::new(),
        };
        tracing::info!(session = %session.id, clinician_id, "create session opened");
        session
    }

    /// Open a session prefilled from the row at `index`. The row is replaced
    /// in place on commit.
    pub fn edit(store: &RecordStore, index: usize, clinician_id: u32) -> Result<Self, IntakeError> {
        let prefill = edit::to_raw_observation(store.get(index)?)?;
        let session = Self {
            id: Uuid::new_v4(),
            mode: SessionMode::Edit {
                index,
                revision: store.revision(),
            },
            state: SessionState::Active { step: Step::FIRST },
            raw: prefill.raw,
            clinician_id,
            error: None,
            missing_on_open: prefill.missing,
        };
        tracing::info!(
            session = %session.id,
            index,
            clinician_id,
            complete = session.missing_on_open.is_empty(),
            "edit session opened"
        );
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn mode(&self) -> SessionMode {
        self.mode
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn list_steps() -> &'static [Step] {
        &Step::ALL
    }

    /// The step on screen, or `None` once the session has ended.
    pub fn current_step(&self) -> Option<Step> {
        match self.state {
            SessionState::Active { step } => Some(step),
            _ => None,
        }
    }

    pub fn fields_for_current_step(&self) -> Vec<&'static FieldSpec> {
        self.current_step().map(Step::fields).unwrap_or_default()
    }

    pub fn raw(&self) -> &RawObservation {
        &self.raw
    }

    /// Fields the edited row did not carry and the user must re-enter.
    pub fn missing_on_open(&self) -> &[Field] {
        &self.missing_on_open
    }

    pub fn can_fully_reconstruct(&self) -> bool {
        self.missing_on_open.is_empty()
    }

    /// Message for the last rejection of the current step, if any.
    pub fn error_for_current_step(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn last_error(&self) -> Option<&ValidationError> {
        self.error.as_ref()
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) -> Result<(), IntakeError> {
        self.active_step()?;
        self.raw.set(field, value);
        Ok(())
    }

    /// Record `inputs`, then validate and leave the current step. On the
    /// last step a successful validation commits to `store`.
    pub fn on_next<I, S>(
        &mut self,
        inputs: I,
        store: &mut RecordStore,
        derivation: &Derivation,
    ) -> Result<NextOutcome, IntakeError>
    where
        I: IntoIterator<Item = (Field, S)>,
        S: Into<String>,
    {
        let step = self.active_step()?;
        for (field, value) in inputs {
            self.raw.set(field, value);
        }

        match transition(step, Event::Next) {
            Transition::Advance(next) => {
                self.guard(step)?;
                self.state = SessionState::Active { step: next };
                tracing::debug!(session = %self.id, from = ?step, to = ?next, "step advanced");
                Ok(NextOutcome::Advanced(next))
            }
            Transition::Commit => {
                self.guard(step)?;
                let (index, record) = commit(store, derivation, &self.raw, self.mode, self.clinician_id)
                    .inspect_err(|e| {
                        tracing::warn!(session = %self.id, error = %e, "commit failed");
                    })?;
                self.state = SessionState::Committed { index };
                self.raw = RawObservation::new();
                tracing::info!(session = %self.id, index, score = record.score, "session committed");
                Ok(NextOutcome::Committed { index, record })
            }
            other => Err(IntakeError::InternalContract(format!(
                "next produced {other:?} on {step:?}"
            ))),
        }
    }

    /// Return to the previous step. Entered values are kept.
    pub fn on_back(&mut self) -> Result<Step, IntakeError> {
        let step = self.active_step()?;
        match transition(step, Event::Back) {
            Transition::Retreat(prev) => {
                self.state = SessionState::Active { step: prev };
                self.error = None;
                Ok(prev)
            }
            _ => Ok(step),
        }
    }

    /// End the session without touching the store.
    pub fn on_cancel(&mut self) -> Result<(), IntakeError> {
        let step = self.active_step()?;
        if transition(step, Event::Cancel) == Transition::Cancel {
            self.state = SessionState::Cancelled;
            self.raw = RawObservation::new();
            self.error = None;
            tracing::info!(session = %self.id, at = ?step, "session cancelled");
        }
        Ok(())
    }

    fn guard(&mut self, step: Step) -> Result<(), IntakeError> {
        match validate_step(step, &self.raw) {
            Ok(()) => {
                self.error = None;
                Ok(())
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e.into())
            }
        }
    }

    fn active_step(&self) -> Result<Step, IntakeError> {
        match self.state {
            SessionState::Active { step } => Ok(step),
            SessionState::Committed { .. } => Err(IntakeError::SessionClosed("committed")),
            SessionState::Cancelled => Err(IntakeError::SessionClosed("cancelled")),
        }
    }
}
