use crate::domain::model::{ComplaintId, ComplaintRecord};
use crate::domain::ports::{ComplaintIntake, IntakeError};
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct IntakeReceipt {
    complaint_id: String,
}

#[derive(Debug, Deserialize)]
struct IntakeErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Intake backed by a JSON-over-HTTP endpoint.
///
/// The record is POSTed as JSON; a 2xx answer must carry `complaint_id`.
#[derive(Debug, Clone)]
pub struct HttpIntake {
    client: Client,
    endpoint: String,
}

impl HttpIntake {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn classify_status(status: StatusCode, reason: String) -> IntakeError {
    match status.as_u16() {
        400 | 422 => IntakeError::Rejected(reason),
        408 | 429 => IntakeError::Unavailable(reason),
        s if s >= 500 => IntakeError::Unavailable(reason),
        _ => IntakeError::Unknown(reason),
    }
}

fn classify_transport(err: &reqwest::Error) -> IntakeError {
    if err.is_timeout() || err.is_connect() {
        IntakeError::Unavailable(err.to_string())
    } else {
        IntakeError::Unknown(err.to_string())
    }
}

fn error_reason(status: StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<IntakeErrorBody>(body)
        .ok()
        .and_then(|b| b.message.or(b.error))
        .unwrap_or_else(|| body.trim().to_string());

    if detail.is_empty() {
        status.to_string()
    } else {
        format!("{}: {}", status, detail)
    }
}

#[async_trait]
impl ComplaintIntake for HttpIntake {
    async fn submit(&self, record: &ComplaintRecord) -> std::result::Result<ComplaintId, IntakeError> {
        tracing::debug!("Posting complaint to intake: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .map_err(|e| classify_transport(&e))?;

        let status = response.status();
        tracing::debug!("Intake response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, error_reason(status, &body)));
        }

        let receipt: IntakeReceipt = response
            .json()
            .await
            .map_err(|e| IntakeError::Unknown(format!("malformed intake receipt: {}", e)))?;

        ComplaintId::new(receipt.complaint_id)
            .ok_or_else(|| IntakeError::Unknown("intake returned an empty complaint id".to_string()))
    }
}
