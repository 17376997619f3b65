use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Municipal department a complaint is filed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Department {
    Water,
    Electricity,
    Roads,
    Sanitation,
    Traffic,
    Housing,
}

impl Department {
    pub const ALL: [Department; 6] = [
        Department::Water,
        Department::Electricity,
        Department::Roads,
        Department::Sanitation,
        Department::Traffic,
        Department::Housing,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Department::Water => "water",
            Department::Electricity => "electricity",
            Department::Roads => "roads",
            Department::Sanitation => "sanitation",
            Department::Traffic => "traffic",
            Department::Housing => "housing",
        }
    }

    pub fn name_hi(self) -> &'static str {
        match self {
            Department::Water => "जल आपूर्ति",
            Department::Electricity => "विद्युत",
            Department::Roads => "सड़क निर्माण",
            Department::Sanitation => "सफाई व्यवस्था",
            Department::Traffic => "ट्रैफिक",
            Department::Housing => "आवास",
        }
    }

    pub fn name_en(self) -> &'static str {
        match self {
            Department::Water => "Water Supply",
            Department::Electricity => "Electricity",
            Department::Roads => "Road Construction",
            Department::Sanitation => "Sanitation",
            Department::Traffic => "Traffic",
            Department::Housing => "Housing",
        }
    }

    /// Allowed subcategory labels, in display order.
    pub fn subcategories(self) -> &'static [&'static str] {
        match self {
            Department::Water => &["पानी की कमी", "पाइप लीकेज", "गंदा पानी", "नल कनेक्शन"],
            Department::Electricity => &["बिजली कटौती", "स्ट्रीट लाइट", "मीटर समस्या", "तार की समस्या"],
            Department::Roads => &["सड़क में गड्ढे", "निर्माण कार्य", "फुटपाथ", "डिवाइडर"],
            Department::Sanitation => &["कूड़ा संग्रह", "सफाई कार्य", "सीवर समस्या", "कीड़े-मकोड़े"],
            Department::Traffic => &["ट्रैफिक जाम", "सिग्नल समस्या", "पार्किंग", "ओवरस्पीड"],
            Department::Housing => &["निर्माण परमिट", "बिल्डिंग गुणवत्ता", "अवैध निर्माण", "नक्शा अनुमोदन"],
        }
    }

    pub fn allows_subcategory(self, label: &str) -> bool {
        self.subcategories().contains(&label)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Department {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Department::ALL
            .into_iter()
            .find(|d| d.code() == s.trim())
            .ok_or_else(|| DraftError::UnknownDepartment(s.to_string()))
    }
}

/// One of the four wizard stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    Category,
    Details,
    Location,
    Contact,
}

impl Step {
    pub const FIRST: Step = Step::Category;
    pub const LAST: Step = Step::Contact;
    pub const COUNT: u8 = 4;

    /// 1-based position of the step.
    pub fn number(self) -> u8 {
        match self {
            Step::Category => 1,
            Step::Details => 2,
            Step::Location => 3,
            Step::Contact => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Step> {
        match n {
            1 => Some(Step::Category),
            2 => Some(Step::Details),
            3 => Some(Step::Location),
            4 => Some(Step::Contact),
            _ => None,
        }
    }

    pub fn next(self) -> Option<Step> {
        Step::from_number(self.number() + 1)
    }

    pub fn previous(self) -> Option<Step> {
        Step::from_number(self.number().checked_sub(1)?)
    }

    pub fn title_hi(self) -> &'static str {
        match self {
            Step::Category => "श्रेणी चुनें",
            Step::Details => "विवरण भरें",
            Step::Location => "स्थान चुनें",
            Step::Contact => "संपर्क जानकारी",
        }
    }

    pub fn title_en(self) -> &'static str {
        match self {
            Step::Category => "Select Category",
            Step::Details => "Fill Details",
            Step::Location => "Select Location",
            Step::Contact => "Contact Info",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title_en())
    }
}

/// Draft fields a step can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftField {
    Category,
    Title,
    Description,
    Location,
    ContactName,
    ContactPhone,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Category => "category",
            DraftField::Title => "title",
            DraftField::Description => "description",
            DraftField::Location => "location",
            DraftField::ContactName => "contact_name",
            DraftField::ContactPhone => "contact_phone",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Handle for a user-selected file staged alongside the complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    pub size_bytes: u64,
    pub media_type: String,
}

impl AttachmentRef {
    pub fn new(name: impl Into<String>, size_bytes: u64, media_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            media_type: media_type.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    #[error("Unknown department code: {0}")]
    UnknownDepartment(String),

    #[error("A department must be selected before choosing a subcategory")]
    SubcategoryWithoutCategory,

    #[error("'{label}' is not a subcategory of {department}")]
    SubcategoryNotAllowed { department: Department, label: String },
}

/// In-progress complaint collected across the wizard steps.
///
/// Text fields are public; `category` and `subcategory` go through setters so
/// the subcategory always belongs to the selected department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintDraft {
    category: Option<Department>,
    subcategory: Option<String>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub(crate) attachments: Vec<AttachmentRef>,
}

impl ComplaintDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(&self) -> Option<Department> {
        self.category
    }

    pub fn subcategory(&self) -> Option<&str> {
        self.subcategory.as_deref()
    }

    /// Selecting a department always clears the previous subcategory.
    pub fn set_category(&mut self, department: Department) {
        self.category = Some(department);
        self.subcategory = None;
    }

    pub fn clear_category(&mut self) {
        self.category = None;
        self.subcategory = None;
    }

    pub fn set_subcategory(&mut self, label: &str) -> Result<(), DraftError> {
        let department = self
            .category
            .ok_or(DraftError::SubcategoryWithoutCategory)?;
        if !department.allows_subcategory(label) {
            return Err(DraftError::SubcategoryNotAllowed {
                department,
                label: label.to_string(),
            });
        }
        self.subcategory = Some(label.to_string());
        Ok(())
    }

    pub fn clear_subcategory(&mut self) {
        self.subcategory = None;
    }

    pub fn attachments(&self) -> &[AttachmentRef] {
        &self.attachments
    }
}

/// Identifier issued by the intake collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComplaintId(String);

impl ComplaintId {
    /// Returns `None` for blank identifiers.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Frozen complaint handed to the intake collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub category: Department,
    pub subcategory: Option<String>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub attachments: Vec<AttachmentRef>,
    pub filed_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_reference: Option<String>,
}
