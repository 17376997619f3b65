use crate::domain::model::{ComplaintId, ComplaintRecord};
use async_trait::async_trait;
use thiserror::Error;

/// Failure classes an intake collaborator can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("intake rejected the complaint: {0}")]
    Rejected(String),

    #[error("intake unavailable: {0}")]
    Unavailable(String),

    #[error("intake failed: {0}")]
    Unknown(String),
}

/// External system that durably records a complaint and issues its identifier.
///
/// Implementations must not be retried by the caller; any retry policy lives
/// inside the implementation.
#[async_trait]
pub trait ComplaintIntake: Send + Sync {
    async fn submit(&self, record: &ComplaintRecord) -> Result<ComplaintId, IntakeError>;
}

#[async_trait]
impl<T: ComplaintIntake + ?Sized> ComplaintIntake for std::sync::Arc<T> {
    async fn submit(&self, record: &ComplaintRecord) -> Result<ComplaintId, IntakeError> {
        (**self).submit(record).await
    }
}

#[async_trait]
impl<T: ComplaintIntake + ?Sized> ComplaintIntake for Box<T> {
    async fn submit(&self, record: &ComplaintRecord) -> Result<ComplaintId, IntakeError> {
        (**self).submit(record).await
    }
}
