//! Named-counter handlers.
//!
//! These expose the counters directly for clients that preview the next
//! reference before saving. The payment workflow never goes through here;
//! it increments inside its own transaction.

use crate::{
    core::{
        authz::{self, Action, AuthUser, Resource},
        sequence,
    },
    errors::Result,
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

/// `GET /sequence/:key` - current value, zero if the counter has never been
/// incremented.
pub async fn current(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    authz::authorize(&caller, Resource::Sequences, Action::Read)?;
    let value = sequence::current(&state.db, &key).await?;
    Ok(Json(json!({ "key": key, "value": value })))
}

/// `POST /sequence/:key/increment` - bumps the counter and returns the new
/// value.
pub async fn increment(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(key): Path<String>,
) -> Result<Json<Value>> {
    authz::authorize(&caller, Resource::Sequences, Action::Update)?;
    let value = sequence::increment(&state.db, &key).await?;
    Ok(Json(json!({ "key": key, "value": value })))
}
