//! Hugging Face Inference API backend.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::services::{GenerateError, TextGenerator};

const INFERENCE_API_URL: &str = "https://api-inference.huggingface.co/models";
/// Instruction-tuned text2text model used for the `generate_text` capability.
const TEXT_MODEL: &str = "google/flan-t5-large";
const MAX_NEW_TOKENS: u32 = 1024;
const TEMPERATURE: f32 = 0.7;

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

#[derive(Debug, Deserialize)]
struct InferenceError {
    error: String,
}

pub struct HuggingFaceClient {
    client: Client,
    api_key: String,
}

impl HuggingFaceClient {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().build()?,
            api_key,
        })
    }
}

#[async_trait]
impl TextGenerator for HuggingFaceClient {
    fn name(&self) -> &'static str {
        "huggingface"
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters: InferenceParameters {
                max_new_tokens: MAX_NEW_TOKENS,
                temperature: TEMPERATURE,
            },
        };

        let url = format!("{INFERENCE_API_URL}/{TEXT_MODEL}");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<InferenceError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(GenerateError::Api {
                status: status.as_u16(),
                message,
            });
        }

        // The inference API returns a list with one entry per input.
        let parsed: Vec<GeneratedText> = response.json().await?;
        let text = parsed
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .filter(|t| !t.is_empty())
            .ok_or(GenerateError::EmptyContent)?;

        debug!("huggingface returned {} chars", text.len());
        Ok(text)
    }
}
