use crate::domain::model::{ComplaintDraft, DraftField, Step};

/// Per-step required-field rules.
///
/// | step     | required                          |
/// |----------|-----------------------------------|
/// | category | category                          |
/// | details  | title, description                |
/// | location | location                          |
/// | contact  | contact name, contact phone       |
///
/// The subcategory is never required and the email is optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct StepValidator;

impl StepValidator {
    /// Fields of `step` that are still missing, in form order.
    pub fn missing_fields(draft: &ComplaintDraft, step: Step) -> Vec<DraftField> {
        let mut missing = Vec::new();
        match step {
            Step::Category => {
                if draft.category().is_none() {
                    missing.push(DraftField::Category);
                }
            }
            Step::Details => {
                if is_blank(&draft.title) {
                    missing.push(DraftField::Title);
                }
                if is_blank(&draft.description) {
                    missing.push(DraftField::Description);
                }
            }
            Step::Location => {
                if is_blank(&draft.location) {
                    missing.push(DraftField::Location);
                }
            }
            Step::Contact => {
                if is_blank(&draft.contact_name) {
                    missing.push(DraftField::ContactName);
                }
                if is_blank(&draft.contact_phone) {
                    missing.push(DraftField::ContactPhone);
                }
            }
        }
        missing
    }

    pub fn is_satisfied(draft: &ComplaintDraft, step: Step) -> bool {
        Self::missing_fields(draft, step).is_empty()
    }

    /// Missing fields of every step from the first up to and including `last`.
    pub fn missing_through(draft: &ComplaintDraft, last: Step) -> Vec<DraftField> {
        (Step::FIRST.number()..=last.number())
            .filter_map(Step::from_number)
            .flat_map(|step| Self::missing_fields(draft, step))
            .collect()
    }

    /// First step whose requirements are not met, if any.
    pub fn first_incomplete(draft: &ComplaintDraft) -> Option<Step> {
        (Step::FIRST.number()..=Step::LAST.number())
            .filter_map(Step::from_number)
            .find(|step| !Self::is_satisfied(draft, *step))
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
