//! Concrete generative-AI backends behind the [`TextGenerator`] contract.
//!
//! One module per vendor plus the delegating wrapper used by composite
//! services. Calls are single-shot: no retries, no backoff; a failed call
//! surfaces as a [`GenerateError`] and is absorbed at the call site.
//!
//! [`TextGenerator`]: crate::services::TextGenerator
//! [`GenerateError`]: crate::services::GenerateError

pub mod composite;
pub mod gemini;
pub mod huggingface;
pub mod openai;
