use crate::core::wizard::WizardState;
use crate::domain::model::{AttachmentRef, ComplaintDraft, Department};
use crate::utils::error::{JansunwaiError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complaint described in a TOML file, for non-interactive filing.
///
/// ```toml
/// category = "water"
/// subcategory = "पानी की कमी"
/// title = "No water"
/// description = "3 days no supply"
/// location = "Vijay Nagar"
///
/// [contact]
/// name = "Amit"
/// phone = "9998887777"
///
/// [[attachments]]
/// name = "tap.jpg"
/// size_bytes = 20480
/// media_type = "image/jpeg"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftFile {
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub contact: ContactSection,
    #[serde(default)]
    pub attachments: Vec<AttachmentRef>,
    pub client_reference: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactSection {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    pub email: Option<String>,
}

impl DraftFile {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(JansunwaiError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| JansunwaiError::ConfigParseError {
            field: "draft file".to_string(),
            message: e.to_string(),
        })
    }

    /// Builds a draft through the same setters an interactive client uses,
    /// so category/subcategory consistency is enforced.
    pub fn to_draft(&self) -> Result<ComplaintDraft> {
        let mut draft = ComplaintDraft::new();

        if let Some(code) = self.category.as_deref().filter(|c| !c.trim().is_empty()) {
            draft.set_category(code.parse::<Department>()?);
        }
        if let Some(label) = self.subcategory.as_deref().filter(|s| !s.trim().is_empty()) {
            draft.set_subcategory(label.trim())?;
        }

        draft.title = self.title.clone();
        draft.description = self.description.clone();
        draft.location = self.location.clone();
        draft.contact_name = self.contact.name.clone();
        draft.contact_phone = self.contact.phone.clone();
        draft.contact_email = self.contact.email.clone();
        Ok(draft)
    }

    /// Opens a fresh wizard session seeded with this file's contents.
    pub fn into_wizard(self) -> Result<WizardState> {
        let draft = self.to_draft()?;
        let mut wizard = WizardState::from_draft(draft);
        wizard.add_files(self.attachments)?;
        Ok(wizard)
    }
}
