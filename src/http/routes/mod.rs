//! Route table and per-resource handlers.
//!
//! Static segments (`/users/change-password`) take priority over captures
//! (`/users/:id`), so both can coexist.

/// Login and password changes
pub mod auth;
/// Calendar events
pub mod calendar;
/// Clients (owner-scoped)
pub mod clients;
/// Expenses
pub mod expenses;
/// Payments, reconciliation, and pending-document lookups
pub mod payments;
/// Sales (owner-scoped)
pub mod sales;
/// Named counters
pub mod sequences;
/// User administration
pub mod users;

use crate::http::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Builds the route table over the shared state.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/users/change-password", put(auth::change_password))
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", delete(users::remove))
        .route("/roles", get(users::list_roles))
        .route("/pagos", get(payments::list).post(payments::create))
        .route("/pagos/:id", delete(payments::remove))
        .route("/ventas-pendientes", get(payments::pending_sales))
        .route("/gastos-pendientes", get(payments::pending_expenses))
        .route("/sequence/:key", get(sequences::current))
        .route("/sequence/:key/increment", post(sequences::increment))
        .route("/ventas", get(sales::list).post(sales::create))
        .route("/ventas/:id", put(sales::update).delete(sales::remove))
        .route("/gastos", get(expenses::list).post(expenses::create))
        .route("/gastos/:id", put(expenses::update).delete(expenses::remove))
        .route("/clientes", get(clients::list).post(clients::create))
        .route("/clientes/:id", put(clients::update).delete(clients::remove))
        .route("/calendarios", get(calendar::list).post(calendar::create))
        .route("/calendarios/:id/completar", post(calendar::complete))
}
