//! Payment and reconciliation handlers.

use crate::{
    core::{
        authz::AuthUser,
        expense,
        payment::{self, PaymentInput},
        sale,
    },
    entities::{expense as expense_entity, payment as payment_entity, sale as sale_entity},
    errors::Result,
    http::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

/// `GET /pagos`
pub async fn list(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<payment_entity::Model>>> {
    payment::list_payments(&state.db, &caller).await.map(Json)
}

/// `POST /pagos` - records a payment, assigns its reference, and marks any
/// linked document as paid, all in one transaction.
pub async fn create(
    State(state): State<AppState>,
    caller: AuthUser,
    Json(input): Json<PaymentInput>,
) -> Result<(StatusCode, Json<payment_entity::Model>)> {
    let created = payment::record_payment(&state.db, &caller, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `DELETE /pagos/:id` - removes the payment record only; linked documents
/// keep their paid status.
pub async fn remove(
    State(state): State<AppState>,
    caller: AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    payment::delete_payment(&state.db, &caller, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /ventas-pendientes` - sales still awaiting payment.
pub async fn pending_sales(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<sale_entity::Model>>> {
    sale::list_pending_sales(&state.db, &caller).await.map(Json)
}

/// `GET /gastos-pendientes` - expenses still awaiting payment.
pub async fn pending_expenses(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<Vec<expense_entity::Model>>> {
    expense::list_pending_expenses(&state.db, &caller)
        .await
        .map(Json)
}
