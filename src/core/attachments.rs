use crate::core::wizard::{SessionPhase, WizardState};
use crate::domain::model::AttachmentRef;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("No attachment at position {index} (staged: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Attachments cannot change once the complaint is being submitted")]
    Locked,
}

// Staging only: no upload, size or media-type checks happen here.
impl WizardState {
    /// Appends `files` after the already staged ones, keeping their order.
    pub fn add_files<I>(&mut self, files: I) -> Result<usize, AttachmentError>
    where
        I: IntoIterator<Item = AttachmentRef>,
    {
        if self.phase != SessionPhase::Editing {
            return Err(AttachmentError::Locked);
        }
        let before = self.draft.attachments.len();
        self.draft.attachments.extend(files);
        let added = self.draft.attachments.len() - before;
        tracing::debug!(
            "Staged {} attachment(s), {} total",
            added,
            self.draft.attachments.len()
        );
        Ok(added)
    }

    /// Removes exactly the entry at `index`.
    ///
    /// An out-of-range index is reported and leaves the list untouched.
    pub fn remove_at(&mut self, index: usize) -> Result<AttachmentRef, AttachmentError> {
        if self.phase != SessionPhase::Editing {
            return Err(AttachmentError::Locked);
        }
        let len = self.draft.attachments.len();
        if index >= len {
            return Err(AttachmentError::IndexOutOfRange { index, len });
        }
        let removed = self.draft.attachments.remove(index);
        tracing::debug!("Removed attachment '{}' at position {}", removed.name, index);
        Ok(removed)
    }

    pub fn attachments(&self) -> &[AttachmentRef] {
        &self.draft.attachments
    }

    pub fn total_attachment_bytes(&self) -> u64 {
        self.draft
            .attachments
            .iter()
            .fold(0u64, |acc, a| acc.saturating_add(a.size_bytes))
    }

    pub fn attachment_count(&self) -> usize {
        self.draft.attachments.len()
    }

    pub fn has_attachments(&self) -> bool {
        !self.draft.attachments.is_empty()
    }
}
