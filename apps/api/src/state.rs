use std::sync::Arc;

use crate::auth::AuthClient;
use crate::db::ResumeStore;
use crate::events::EventTrigger;
use crate::extract::ocr::OcrClient;
use crate::services::ServiceManager;
use crate::storage::ObjectStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Owns the AI service registry caches; one per process.
    pub services: Arc<ServiceManager>,
    pub store: Arc<ResumeStore>,
    pub auth: Arc<AuthClient>,
    pub storage: Arc<ObjectStore>,
    pub events: Arc<EventTrigger>,
    /// Present only when OCR API credentials are configured.
    pub ocr: Option<Arc<OcrClient>>,
}
