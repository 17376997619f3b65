use crate::domain::model::{ComplaintId, ComplaintRecord};
use crate::domain::ports::{ComplaintIntake, IntakeError};
use async_trait::async_trait;
use chrono::Datelike;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub const DEFAULT_PREFIX: &str = "JUN";

/// Intake that keeps complaints in memory.
///
/// Identifiers follow the portal's demo format: prefix, filing year and a
/// six-digit sequence number, e.g. `JUN2025001234`.
#[derive(Debug)]
pub struct InMemoryIntake {
    prefix: String,
    next_sequence: AtomicU64,
    records: Mutex<Vec<(ComplaintId, ComplaintRecord)>>,
}

impl Default for InMemoryIntake {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX, 1)
    }
}

impl InMemoryIntake {
    pub fn new(prefix: impl Into<String>, start_sequence: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next_sequence: AtomicU64::new(start_sequence),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn format_id(&self, year: i32, sequence: u64) -> String {
        format!("{}{}{:06}", self.prefix, year, sequence)
    }

    /// Snapshot of everything recorded so far, oldest first.
    pub fn records(&self) -> Vec<(ComplaintId, ComplaintRecord)> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ComplaintIntake for InMemoryIntake {
    async fn submit(&self, record: &ComplaintRecord) -> Result<ComplaintId, IntakeError> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| IntakeError::Unknown("in-memory intake lock poisoned".to_string()))?;

        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);
        let raw = self.format_id(record.filed_at.year(), sequence);
        let id = ComplaintId::new(raw)
            .ok_or_else(|| IntakeError::Unknown("generated an empty identifier".to_string()))?;

        tracing::debug!("In-memory intake recorded {} ({})", id, record.category);
        records.push((id.clone(), record.clone()));
        Ok(id)
    }
}
