pub mod auth;
pub mod health;
pub mod resumes;
pub mod services;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth API (simulated backend)
        .route("/api/v1/auth/signup", post(auth::handle_sign_up))
        .route("/api/v1/auth/signin", post(auth::handle_sign_in))
        .route("/api/v1/auth/signout", post(auth::handle_sign_out))
        .route("/api/v1/auth/user/:id", get(auth::handle_get_user))
        // Resume API
        .route(
            "/api/v1/resumes",
            post(resumes::handle_upload).get(resumes::handle_list),
        )
        .route(
            "/api/v1/resumes/:id",
            get(resumes::handle_get).delete(resumes::handle_delete),
        )
        .route("/api/v1/resumes/:id/file", get(resumes::handle_download))
        .route("/api/v1/resumes/:id/match", post(resumes::handle_match))
        .route("/api/v1/resumes/:id/enhance", post(resumes::handle_enhance))
        .route(
            "/api/v1/resumes/:id/enhancements",
            get(resumes::handle_list_enhancements),
        )
        // Diagnostics
        .route("/api/v1/services", get(services::handle_list_services))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
