//! Sale handlers.

use crate::{
    core::{
        authz::AuthUser,
        sale::{self, SaleInput},
    },
    entities::sale as sale_entity,
    errors::Result,
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// `GET /ventas`
pub async fn list(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<sale_entity::Model>>> {
    sale::list_sales(&state.db, &caller).await.map(Json)
}

/// `POST /ventas`
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<SaleInput>,
) -> Result<(StatusCode, Json<sale_entity::Model>)> {
    let created = sale::create_sale(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /ventas/:id`
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<SaleInput>,
) -> Result<Json<sale_entity::Model>> {
    sale::update_sale(&state.db, &caller, id, input)
        .await
        .map(Json)
}

/// `DELETE /ventas/:id`
pub async fn remove(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    sale::delete_sale(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
