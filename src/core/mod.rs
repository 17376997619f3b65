pub mod attachments;
pub mod submission;
pub mod validator;
pub mod wizard;

pub use crate::domain::model::{
    AttachmentRef, ComplaintDraft, ComplaintId, ComplaintRecord, Department, DraftField, Step,
};
pub use crate::domain::ports::{ComplaintIntake, IntakeError};
pub use crate::utils::error::Result;
