use crate::core::validator::StepValidator;
use crate::domain::model::{ComplaintDraft, ComplaintId, DraftField, Step};

/// Where the filing session is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionPhase {
    Editing,
    /// One submission has been handed to the intake and not yet resolved.
    Submitting,
    Submitted(ComplaintId),
}

/// Outcome of a single `advance` or `back` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Moved { from: Step, to: Step },
    /// The current step's required fields are not filled.
    Blocked { step: Step, missing: Vec<DraftField> },
    /// Already on the first (for `back`) or last (for `advance`) step.
    AtBoundary { step: Step },
    /// The session is submitting or has been submitted.
    Locked { step: Step },
}

impl Transition {
    pub fn moved(&self) -> bool {
        matches!(self, Transition::Moved { .. })
    }
}

/// State of one complaint filing session.
#[derive(Debug, Clone)]
pub struct WizardState {
    step: Step,
    pub(crate) draft: ComplaintDraft,
    pub(crate) phase: SessionPhase,
    /// Bumped on every `begin_submission`; survives `reset`.
    pub(crate) attempt: u64,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    pub fn new() -> Self {
        Self::from_draft(ComplaintDraft::new())
    }

    /// Starts a session on the first step with a pre-filled draft.
    pub fn from_draft(draft: ComplaintDraft) -> Self {
        Self {
            step: Step::FIRST,
            draft,
            phase: SessionPhase::Editing,
            attempt: 0,
        }
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &ComplaintDraft {
        &self.draft
    }

    /// Mutable access to the draft, only while the session is editable.
    pub fn draft_mut(&mut self) -> Option<&mut ComplaintDraft> {
        match self.phase {
            SessionPhase::Editing => Some(&mut self.draft),
            _ => None,
        }
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, SessionPhase::Submitted(_))
    }

    pub fn progress_percent(&self) -> u8 {
        match self.step {
            Step::Category => 25,
            Step::Details => 50,
            Step::Location => 75,
            Step::Contact => 100,
        }
    }

    /// Missing fields of the current step.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        StepValidator::missing_fields(&self.draft, self.step)
    }

    pub fn can_advance(&self) -> bool {
        self.phase == SessionPhase::Editing
            && self.step.next().is_some()
            && StepValidator::is_satisfied(&self.draft, self.step)
    }

    pub fn advance(&mut self) -> Transition {
        if self.phase != SessionPhase::Editing {
            return Transition::Locked { step: self.step };
        }
        let Some(next) = self.step.next() else {
            return Transition::AtBoundary { step: self.step };
        };

        let missing = StepValidator::missing_fields(&self.draft, self.step);
        if !missing.is_empty() {
            tracing::debug!(
                "Step {} blocked, missing: {}",
                self.step,
                missing
                    .iter()
                    .map(|f| f.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            return Transition::Blocked {
                step: self.step,
                missing,
            };
        }

        let from = self.step;
        self.step = next;
        tracing::debug!("Advanced from step {} to {}", from, next);
        Transition::Moved { from, to: next }
    }

    /// Moves one step back. Never validates and never touches the draft.
    pub fn back(&mut self) -> Transition {
        if self.phase != SessionPhase::Editing {
            return Transition::Locked { step: self.step };
        }
        let Some(previous) = self.step.previous() else {
            return Transition::AtBoundary { step: self.step };
        };

        let from = self.step;
        self.step = previous;
        tracing::debug!("Went back from step {} to {}", from, previous);
        Transition::Moved { from, to: previous }
    }

    /// Advances until a gate blocks or the last step is reached.
    ///
    /// Returns the transition that stopped the walk.
    pub fn advance_to_end(&mut self) -> Transition {
        loop {
            let transition = self.advance();
            if !transition.moved() {
                return transition;
            }
        }
    }

    /// Discards the current session and starts a fresh one.
    pub fn reset(&mut self) {
        let attempt = self.attempt;
        *self = Self::new();
        self.attempt = attempt;
    }
}
