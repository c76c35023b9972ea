//! Login endpoint.
//!
//! Verifies credentials and returns the user's id and role. No token or
//! session is issued — callers carry the returned identity themselves.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::api::error::ApiError;
use crate::api::types::ApiContext;
use crate::auth::{self, AuthenticatedUser};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// `POST /api/login` — verify a username/password pair.
pub async fn login(
    State(ctx): State<ApiContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthenticatedUser>, ApiError> {
    let conn = ctx.open_db()?;
    let user = auth::authenticate(
        &conn,
        req.username.as_deref().unwrap_or(""),
        req.password.as_deref().unwrap_or(""),
    )?;
    Ok(Json(user))
}
