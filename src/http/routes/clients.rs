//! Client handlers.

use crate::{
    core::{
        authz::AuthUser,
        client::{self, ClientInput},
    },
    entities::client as client_entity,
    errors::Result,
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// `GET /clientes`
pub async fn list(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<client_entity::Model>>> {
    client::list_clients(&state.db, &caller).await.map(Json)
}

/// `POST /clientes`
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<ClientInput>,
) -> Result<(StatusCode, Json<client_entity::Model>)> {
    let created = client::create_client(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /clientes/:id`
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<ClientInput>,
) -> Result<Json<client_entity::Model>> {
    client::update_client(&state.db, &caller, id, input)
        .await
        .map(Json)
}

/// `DELETE /clientes/:id`
pub async fn remove(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    client::delete_client(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
