pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{HttpIntake, InMemoryIntake};
pub use config::{DraftFile, PortalConfig};
pub use crate::core::{
    submission::{PendingSubmission, SubmitError, Submission},
    validator::StepValidator,
    wizard::{SessionPhase, Transition, WizardState},
};
pub use domain::model::{
    AttachmentRef, ComplaintDraft, ComplaintId, ComplaintRecord, Department, DraftField, Step,
};
pub use domain::ports::{ComplaintIntake, IntakeError};
pub use utils::error::{JansunwaiError, Result};
