use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/v1/auth/signup
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> Result<Json<AuthUser>, AppError> {
    let user = state
        .auth
        .sign_up(&req.email, &req.password, req.name.as_deref())?;
    Ok(Json(user))
}

/// POST /api/v1/auth/signin
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<SignInRequest>,
) -> Result<Json<AuthUser>, AppError> {
    let user = state.auth.sign_in(&req.email, &req.password)?;
    Ok(Json(user))
}

/// POST /api/v1/auth/signout
pub async fn handle_sign_out(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "signed_out": state.auth.sign_out() }))
}

/// GET /api/v1/auth/user/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AuthUser>, AppError> {
    state
        .auth
        .get_user(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {id} not found")))
}
