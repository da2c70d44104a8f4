//! Core business logic - framework-agnostic operations over the entities.
//!
//! Every operation in this module takes the caller's verified identity and
//! runs it through the authorization gate before touching data, so the whole
//! permission model is testable without any HTTP plumbing.

/// Role-permission table and authorization gate
pub mod authz;
/// Calendar event operations
pub mod calendar;
/// Client (customer) operations, owner-scoped
pub mod client;
/// Expense operations
pub mod expense;
/// Payment reconciliation workflow
pub mod payment;
/// Sale operations, owner-scoped
pub mod sale;
/// Atomic named counters and reference formatting
pub mod sequence;
/// Accounts, credentials, and sessions
pub mod user;

/// Payment status of a sale or expense that still awaits settlement.
pub const ESTADO_PENDIENTE: &str = "Pendiente";
/// Payment status of a settled sale or expense.
pub const ESTADO_PAGADO: &str = "Pagado";
/// Status of a finished calendar task.
pub const ESTADO_COMPLETADO: &str = "Completado";
