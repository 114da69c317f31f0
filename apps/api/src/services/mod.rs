//! AI Service Manager — centralizes access to the generative-AI backends.
//!
//! A static registry maps service names to backend variants, credential
//! sources, and dependency lists. The [`ServiceManager`] resolves
//! availability from configuration and environment, constructs backends
//! lazily, and caches one instance per name for the process lifetime.
//!
//! ARCHITECTURAL RULE: no other module talks to a generative-AI vendor API
//! directly. Callers ask the manager for a named service and use the
//! returned [`TextGenerator`] handle.

pub mod backends;
pub mod manager;
pub mod registry;

pub use manager::{ResolveError, ServiceManager};

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("backend returned empty content")]
    EmptyContent,
}

/// The capability contract every AI service instance satisfies.
///
/// Backends fail by returning an error, never by silently handing back
/// malformed output.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// The registry name of the backend serving this instance.
    fn name(&self) -> &'static str;

    async fn generate_text(&self, prompt: &str) -> Result<String, GenerateError>;
}
