//! Expense handlers.

use crate::{
    core::{
        authz::AuthUser,
        expense::{self, ExpenseInput},
    },
    entities::expense as expense_entity,
    errors::Result,
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// `GET /gastos`
pub async fn list(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<expense_entity::Model>>> {
    expense::list_expenses(&state.db, &caller).await.map(Json)
}

/// `POST /gastos`
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<ExpenseInput>,
) -> Result<(StatusCode, Json<expense_entity::Model>)> {
    let created = expense::create_expense(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /gastos/:id`
pub async fn update(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<ExpenseInput>,
) -> Result<Json<expense_entity::Model>> {
    expense::update_expense(&state.db, &caller, id, input)
        .await
        .map(Json)
}

/// `DELETE /gastos/:id`
pub async fn remove(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    expense::delete_expense(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
