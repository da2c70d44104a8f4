//! Login and password-change handlers.

use crate::{
    core::{
        authz::AuthUser,
        user::{self, LoginOutcome},
    },
    errors::Result,
    http::AppState,
};
use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

/// Credentials presented at login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plaintext password
    pub password: String,
}

/// `POST /login` - verifies credentials and issues a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginOutcome>> {
    user::authenticate(
        &state.db,
        &request.username,
        &request.password,
        state.session_ttl,
    )
    .await
    .map(Json)
}

/// Old and new passwords for a password change.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password, re-verified before the change
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    /// Replacement password
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// `PUT /users/change-password` - lets the caller rotate their own password.
pub async fn change_password(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<StatusCode> {
    user::change_password(
        &state.db,
        caller.id,
        &request.old_password,
        &request.new_password,
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
