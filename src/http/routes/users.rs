//! User administration handlers.

use crate::{
    core::{
        authz::AuthUser,
        user::{self, NewUserInput, UserView},
    },
    entities::role,
    errors::Result,
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// `GET /users`
pub async fn list(State(state): State<AppState>, caller: AuthUser) -> Result<Json<Vec<UserView>>> {
    user::list_users(&state.db, &caller).await.map(Json)
}

/// `POST /users`
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<NewUserInput>,
) -> Result<(StatusCode, Json<UserView>)> {
    let created = user::create_user(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /users/:id`
pub async fn remove(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    user::delete_user(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /roles`
pub async fn list_roles(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<role::Model>>> {
    user::list_roles(&state.db, &caller).await.map(Json)
}
