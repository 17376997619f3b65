use crate::core::validator::StepValidator;
use crate::core::wizard::{SessionPhase, WizardState};
use crate::domain::model::{ComplaintId, ComplaintRecord, DraftField, Step};
use crate::domain::ports::{ComplaintIntake, IntakeError};
use chrono::Utc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Complaint failed validation: {reason}")]
    ValidationFailed {
        missing: Vec<DraftField>,
        reason: String,
    },

    #[error("Intake service unavailable: {reason}")]
    IntakeUnavailable { reason: String },

    #[error("Submission failed: {reason}")]
    Unknown { reason: String },

    #[error("A submission is already in flight for this session")]
    InFlight,

    #[error("This session has already been submitted")]
    AlreadySubmitted,
}

impl SubmitError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SubmitError::ValidationFailed { .. })
    }

    /// Whether re-submitting the unchanged draft later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            SubmitError::IntakeUnavailable { .. } | SubmitError::Unknown { .. }
        )
    }
}

impl From<IntakeError> for SubmitError {
    fn from(err: IntakeError) -> Self {
        match err {
            IntakeError::Rejected(reason) => SubmitError::ValidationFailed {
                missing: Vec::new(),
                reason,
            },
            IntakeError::Unavailable(reason) => SubmitError::IntakeUnavailable { reason },
            IntakeError::Unknown(reason) => SubmitError::Unknown { reason },
        }
    }
}

/// A frozen record waiting for the intake's answer.
#[derive(Debug)]
pub struct PendingSubmission {
    attempt: u64,
    record: ComplaintRecord,
}

impl PendingSubmission {
    pub fn record(&self) -> &ComplaintRecord {
        &self.record
    }
}

/// Accepted complaint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub complaint_id: ComplaintId,
    pub record: ComplaintRecord,
}

impl WizardState {
    /// Freezes the draft into a record without touching the session.
    ///
    /// Requires the contact step to be current and every step's fields to
    /// be filled.
    pub fn assemble_record(
        &self,
        client_reference: Option<String>,
    ) -> Result<ComplaintRecord, SubmitError> {
        if self.current_step() != Step::LAST {
            return Err(SubmitError::ValidationFailed {
                missing: Vec::new(),
                reason: format!(
                    "the wizard is on step {}, complaints are submitted from step {}",
                    self.current_step(),
                    Step::LAST
                ),
            });
        }

        let missing = StepValidator::missing_through(&self.draft, Step::LAST);
        let category = match (self.draft.category(), missing.is_empty()) {
            (Some(category), true) => category,
            _ => {
                let reason = format!(
                    "missing required fields: {}",
                    missing
                        .iter()
                        .map(|f| f.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                return Err(SubmitError::ValidationFailed { missing, reason });
            }
        };

        let draft = &self.draft;
        Ok(ComplaintRecord {
            category,
            subcategory: draft.subcategory().map(str::to_string),
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            location: draft.location.trim().to_string(),
            contact_name: draft.contact_name.trim().to_string(),
            contact_phone: draft.contact_phone.trim().to_string(),
            contact_email: draft
                .contact_email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
            attachments: draft.attachments.clone(),
            filed_at: Utc::now(),
            client_reference,
        })
    }

    /// Locks the session for one submission and hands back the record to send.
    pub fn begin_submission(
        &mut self,
        client_reference: Option<String>,
    ) -> Result<PendingSubmission, SubmitError> {
        match self.phase {
            SessionPhase::Submitted(_) => return Err(SubmitError::AlreadySubmitted),
            SessionPhase::Submitting => return Err(SubmitError::InFlight),
            SessionPhase::Editing => {}
        }

        let record = self.assemble_record(client_reference)?;
        self.attempt += 1;
        self.phase = SessionPhase::Submitting;
        tracing::debug!("Submission attempt {} started", self.attempt);

        Ok(PendingSubmission {
            attempt: self.attempt,
            record,
        })
    }

    /// Applies the intake's answer to the pending submission.
    ///
    /// On failure the session returns to editing on the same step with the
    /// draft intact.
    pub fn complete_submission(
        &mut self,
        pending: PendingSubmission,
        outcome: Result<ComplaintId, IntakeError>,
    ) -> Result<Submission, SubmitError> {
        if self.phase != SessionPhase::Submitting || pending.attempt != self.attempt {
            return Err(SubmitError::Unknown {
                reason: format!(
                    "submission attempt {} does not belong to this session",
                    pending.attempt
                ),
            });
        }

        match outcome {
            Ok(complaint_id) => {
                tracing::info!("Complaint {} submitted", complaint_id);
                self.phase = SessionPhase::Submitted(complaint_id.clone());
                Ok(Submission {
                    complaint_id,
                    record: pending.record,
                })
            }
            Err(err) => {
                tracing::warn!("Submission attempt {} failed: {}", pending.attempt, err);
                self.phase = SessionPhase::Editing;
                Err(err.into())
            }
        }
    }

    /// Sends the draft to `intake` once. The core never retries.
    pub async fn submit<I>(&mut self, intake: &I) -> Result<Submission, SubmitError>
    where
        I: ComplaintIntake + ?Sized,
    {
        self.submit_with_reference(intake, None).await
    }

    pub async fn submit_with_reference<I>(
        &mut self,
        intake: &I,
        client_reference: Option<String>,
    ) -> Result<Submission, SubmitError>
    where
        I: ComplaintIntake + ?Sized,
    {
        let pending = self.begin_submission(client_reference)?;
        let guard = SubmittingGuard { wizard: self };
        let outcome = intake.submit(pending.record()).await;
        guard.wizard.complete_submission(pending, outcome)
    }

    /// Gives up on the submission in flight and returns to editing.
    ///
    /// Use when the intake call was abandoned (timeout, task abort) or the
    /// `PendingSubmission` was lost. Returns `false` if nothing was pending.
    pub fn cancel_submission(&mut self) -> bool {
        if self.phase != SessionPhase::Submitting {
            return false;
        }
        tracing::warn!("Submission attempt {} cancelled", self.attempt);
        self.phase = SessionPhase::Editing;
        true
    }

    /// Cancels a specific pending submission; stale ones are ignored.
    pub fn abandon_submission(&mut self, pending: PendingSubmission) -> bool {
        pending.attempt == self.attempt && self.cancel_submission()
    }
}

/// Puts the session back into editing if the intake future is dropped
/// before `complete_submission` runs.
struct SubmittingGuard<'a> {
    wizard: &'a mut WizardState,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.wizard.cancel_submission();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{AttachmentRef, ComplaintDraft, Department};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct ScriptedIntake {
        calls: AtomicUsize,
        answers: Mutex<Vec<Result<ComplaintId, IntakeError>>>,
    }

    impl ScriptedIntake {
        fn new(mut answers: Vec<Result<ComplaintId, IntakeError>>) -> Self {
            answers.reverse();
            Self {
                calls: AtomicUsize::new(0),
                answers: Mutex::new(answers),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ComplaintIntake for ScriptedIntake {
        async fn submit(&self, _record: &ComplaintRecord) -> Result<ComplaintId, IntakeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers
                .lock()
                .unwrap()
                .pop()
                .unwrap_or_else(|| Err(IntakeError::Unknown("no scripted answer".to_string())))
        }
    }

    fn id(s: &str) -> ComplaintId {
        ComplaintId::new(s).unwrap()
    }

    fn wizard_on_contact_step() -> WizardState {
        let mut draft = ComplaintDraft::new();
        draft.set_category(Department::Water);
        draft.set_subcategory("पानी की कमी").unwrap();
        draft.title = "No water".to_string();
        draft.description = "3 days no supply".to_string();
        draft.location = "Vijay Nagar".to_string();
        draft.contact_name = "Amit".to_string();
        draft.contact_phone = "9998887777".to_string();
        let mut wizard = WizardState::from_draft(draft);
        wizard.advance_to_end();
        assert_eq!(wizard.current_step(), Step::Contact);
        wizard
    }

    #[tokio::test]
    async fn test_successful_submit_marks_session_submitted() {
        let intake = ScriptedIntake::new(vec![Ok(id("JUN2025001234"))]);
        let mut wizard = wizard_on_contact_step();
        wizard
            .add_files([AttachmentRef::new("leak.jpg", 2048, "image/jpeg")])
            .unwrap();

        let submission = wizard.submit(&intake).await.unwrap();

        assert_eq!(submission.complaint_id.as_str(), "JUN2025001234");
        assert_eq!(submission.record.category, Department::Water);
        assert_eq!(submission.record.subcategory.as_deref(), Some("पानी की कमी"));
        assert_eq!(submission.record.attachments.len(), 1);
        assert_eq!(
            wizard.phase(),
            &SessionPhase::Submitted(id("JUN2025001234"))
        );
        assert_eq!(intake.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_contact_does_not_reach_intake() {
        let intake = ScriptedIntake::new(vec![Ok(id("X1"))]);
        let mut wizard = wizard_on_contact_step();
        wizard.draft_mut().unwrap().contact_phone.clear();

        let err = wizard.submit(&intake).await.unwrap_err();

        assert_eq!(
            err,
            SubmitError::ValidationFailed {
                missing: vec![DraftField::ContactPhone],
                reason: "missing required fields: contact_phone".to_string(),
            }
        );
        assert_eq!(intake.calls(), 0);
        assert_eq!(wizard.current_step(), Step::Contact);
        assert_eq!(wizard.phase(), &SessionPhase::Editing);
    }

    #[tokio::test]
    async fn test_submit_before_last_step_is_rejected() {
        let intake = ScriptedIntake::new(vec![Ok(id("X1"))]);
        let mut wizard = wizard_on_contact_step();
        wizard.back();

        let err = wizard.submit(&intake).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(intake.calls(), 0);
        assert_eq!(wizard.current_step(), Step::Location);
    }

    #[tokio::test]
    async fn test_intake_failure_keeps_draft_for_retry() {
        let intake = ScriptedIntake::new(vec![
            Err(IntakeError::Unavailable("connection refused".to_string())),
            Ok(id("JUN2025001235")),
        ]);
        let mut wizard = wizard_on_contact_step();
        let before = wizard.draft().clone();

        let err = wizard.submit(&intake).await.unwrap_err();
        assert_eq!(
            err,
            SubmitError::IntakeUnavailable {
                reason: "connection refused".to_string()
            }
        );
        assert!(err.is_retryable());
        assert_eq!(wizard.draft(), &before);
        assert_eq!(wizard.current_step(), Step::Contact);
        assert_eq!(wizard.phase(), &SessionPhase::Editing);

        let submission = wizard.submit(&intake).await.unwrap();
        assert_eq!(submission.complaint_id.as_str(), "JUN2025001235");
        assert_eq!(intake.calls(), 2);
    }

    #[tokio::test]
    async fn test_intake_rejection_is_validation_failure() {
        let intake = ScriptedIntake::new(vec![Err(IntakeError::Rejected(
            "phone number must have 10 digits".to_string(),
        ))]);
        let mut wizard = wizard_on_contact_step();

        let err = wizard.submit(&intake).await.unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_second_begin_while_pending_is_rejected() {
        let mut wizard = wizard_on_contact_step();
        let pending = wizard.begin_submission(None).unwrap();

        assert_eq!(wizard.begin_submission(None).unwrap_err(), SubmitError::InFlight);
        assert!(!wizard.advance().moved());

        let submission = wizard
            .complete_submission(pending, Ok(id("JUN2025000001")))
            .unwrap();
        assert_eq!(submission.complaint_id.as_str(), "JUN2025000001");
        assert_eq!(
            wizard.begin_submission(None).unwrap_err(),
            SubmitError::AlreadySubmitted
        );
    }

    #[test]
    fn test_stale_pending_after_reset_is_refused() {
        let mut wizard = wizard_on_contact_step();
        let pending = wizard.begin_submission(Some("kiosk-7".to_string())).unwrap();
        assert_eq!(pending.record().client_reference.as_deref(), Some("kiosk-7"));

        wizard.reset();
        let err = wizard
            .complete_submission(pending, Ok(id("JUN2025000002")))
            .unwrap_err();
        assert!(matches!(err, SubmitError::Unknown { .. }));
        assert!(!wizard.is_submitted());
    }

    struct SlowIntake;

    #[async_trait]
    impl ComplaintIntake for SlowIntake {
        async fn submit(&self, _record: &ComplaintRecord) -> Result<ComplaintId, IntakeError> {
            tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            Ok(ComplaintId::new("JUN2025009999").unwrap())
        }
    }

    #[tokio::test]
    async fn test_timed_out_submit_returns_session_to_editing() {
        let mut wizard = wizard_on_contact_step();
        let before = wizard.draft().clone();

        let timed_out = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            wizard.submit(&SlowIntake),
        )
        .await;
        assert!(timed_out.is_err());

        assert_eq!(wizard.phase(), &SessionPhase::Editing);
        assert_eq!(wizard.current_step(), Step::Contact);
        assert_eq!(wizard.draft(), &before);
        assert!(wizard.draft_mut().is_some());
        assert!(wizard.back().moved());
        wizard.advance();

        let intake = ScriptedIntake::new(vec![Ok(id("JUN2025000003"))]);
        let submission = wizard.submit(&intake).await.unwrap();
        assert_eq!(submission.complaint_id.as_str(), "JUN2025000003");
    }

    #[test]
    fn test_dropped_pending_can_be_cancelled() {
        let mut wizard = wizard_on_contact_step();
        drop(wizard.begin_submission(None).unwrap());
        assert_eq!(wizard.begin_submission(None).unwrap_err(), SubmitError::InFlight);

        assert!(wizard.cancel_submission());
        assert!(!wizard.cancel_submission());
        assert_eq!(wizard.phase(), &SessionPhase::Editing);

        let pending = wizard.begin_submission(None).unwrap();
        assert!(wizard.abandon_submission(pending));
        assert_eq!(wizard.phase(), &SessionPhase::Editing);
        assert_eq!(wizard.current_step(), Step::Contact);
    }

    #[test]
    fn test_cancel_does_not_undo_accepted_submission() {
        let mut wizard = wizard_on_contact_step();
        let pending = wizard.begin_submission(None).unwrap();
        wizard
            .complete_submission(pending, Ok(id("JUN2025000004")))
            .unwrap();
        assert!(!wizard.cancel_submission());
        assert!(wizard.is_submitted());
    }

    #[test]
    fn test_blank_email_is_dropped_from_record() {
        let mut wizard = wizard_on_contact_step();
        wizard.draft_mut().unwrap().contact_email = Some("  ".to_string());
        let record = wizard.assemble_record(None).unwrap();
        assert_eq!(record.contact_email, None);
    }
}
