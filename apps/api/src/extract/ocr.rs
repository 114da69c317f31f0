//! OCR fallback over a third-party HTTP API.
//!
//! Protocol: submit the PDF, receive a task id, poll the text endpoint
//! until the result is ready. Polling is bounded; an exhausted poll is an
//! error, not a hang.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.smallpdf.com/v1";
const POLL_ATTEMPTS: u32 = 10;
const POLL_INTERVAL_MS: u64 = 500;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OCR request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("OCR task {task_id} did not complete after {attempts} polls")]
    Timeout { task_id: String, attempts: u32 },
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "taskId")]
    task_id: String,
}

#[derive(Debug, Deserialize)]
struct TextResponse {
    text: Option<String>,
}

pub struct OcrClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OcrClient {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Runs the full submit-and-poll cycle for one document.
    pub async fn extract_text(&self, pdf_bytes: &[u8]) -> Result<String, OcrError> {
        let task_id = self.submit(pdf_bytes).await?;
        debug!("OCR task submitted: {task_id}");
        self.poll_text(&task_id).await
    }

    async fn submit(&self, pdf_bytes: &[u8]) -> Result<String, OcrError> {
        let response = self
            .client
            .post(format!("{}/ocr", self.base_url))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/pdf")
            .body(pdf_bytes.to_vec())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OcrError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let submitted: SubmitResponse = response.json().await?;
        Ok(submitted.task_id)
    }

    async fn poll_text(&self, task_id: &str) -> Result<String, OcrError> {
        for attempt in 0..POLL_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(POLL_INTERVAL_MS)).await;
            }

            let response = self
                .client
                .get(format!("{}/ocr/{task_id}/text", self.base_url))
                .bearer_auth(&self.api_key)
                .send()
                .await?;

            let status = response.status();
            // 202 = still processing; keep polling.
            if status.as_u16() == 202 {
                continue;
            }
            if !status.is_success() {
                return Err(OcrError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }

            let parsed: TextResponse = response.json().await?;
            if let Some(text) = parsed.text {
                return Ok(text);
            }
        }

        Err(OcrError::Timeout {
            task_id: task_id.to_string(),
            attempts: POLL_ATTEMPTS,
        })
    }
}
