mod analysis;
mod auth;
mod config;
mod db;
mod errors;
mod events;
mod extract;
mod routes;
mod services;
mod state;
mod storage;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::AuthClient;
use crate::config::Config;
use crate::db::ResumeStore;
use crate::events::EventTrigger;
use crate::extract::ocr::OcrClient;
use crate::routes::build_router;
use crate::services::ServiceManager;
use crate::state::AppState;
use crate::storage::ObjectStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // AI service manager owns the availability and instance caches.
    let services = Arc::new(ServiceManager::new(config.api.clone()));
    info!("AI services available: {:?}", services.available_services());

    // Object storage: S3 when configured, local disk fallback otherwise.
    let storage = Arc::new(ObjectStore::from_config(&config.api.aws_s3).await);

    // Live-update trigger: real Pusher or simulated.
    let events = Arc::new(EventTrigger::from_config(&config.api.pusher));

    // OCR fallback is optional; missing credentials degrade extraction.
    let ocr = match (&config.api.smallpdf.api_key, &config.api.smallpdf.api_secret) {
        (Some(api_key), Some(_)) => match OcrClient::new(api_key.clone()) {
            Ok(client) => {
                info!("OCR fallback enabled");
                Some(Arc::new(client))
            }
            Err(e) => {
                tracing::warn!("OCR client initialization failed: {e}");
                None
            }
        },
        _ => None,
    };

    let state = AppState {
        services,
        store: Arc::new(ResumeStore::new()),
        auth: Arc::new(AuthClient::from_config(&config.api.supabase)),
        storage,
        events,
        ocr,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
