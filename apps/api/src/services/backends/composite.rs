//! Delegating wrapper backing the composite services.
//!
//! `resume_analyzer`, `job_matcher`, and `content_enhancer` have no vendor
//! API of their own: each wraps the first available dependency and passes
//! `generate_text` straight through. The analysis layer builds its
//! domain-specific prompting on top of whatever backend ends up underneath.

use async_trait::async_trait;
use std::sync::Arc;

use crate::services::{GenerateError, TextGenerator};

pub struct DelegatingService {
    name: &'static str,
    inner: Arc<dyn TextGenerator>,
}

impl DelegatingService {
    pub fn new(name: &'static str, inner: Arc<dyn TextGenerator>) -> Self {
        Self { name, inner }
    }

    /// The registry name of the backend actually serving requests.
    pub fn backing(&self) -> &'static str {
        self.inner.name()
    }
}

#[async_trait]
impl TextGenerator for DelegatingService {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError> {
        self.inner.generate_text(prompt).await
    }
}
