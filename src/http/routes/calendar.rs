//! Calendar-event handlers.

use crate::{
    core::{
        authz::AuthUser,
        calendar::{self, EventInput},
    },
    entities::calendar_event,
    errors::Result,
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

/// `GET /calendarios`
pub async fn list(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<calendar_event::Model>>> {
    calendar::list_events(&state.db, &caller).await.map(Json)
}

/// `POST /calendarios`
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<EventInput>,
) -> Result<(StatusCode, Json<calendar_event::Model>)> {
    let created = calendar::create_event(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Optional completion notes.
#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    /// Notes recorded alongside the completion
    pub observaciones: Option<String>,
}

/// `POST /calendarios/:id/completar` - the body is optional; completing
/// without notes is the common case.
pub async fn complete(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
    body: Option<Json<CompleteRequest>>,
) -> Result<Json<calendar_event::Model>> {
    let observaciones = body.and_then(|Json(request)| request.observaciones);
    calendar::complete_event(&state.db, &caller, id, observaciones)
        .await
        .map(Json)
}
