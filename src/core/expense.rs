//! Expense business logic - CRUD and the pending-expenses lookup.
//!
//! Expenses are role-gated but not owner-scoped. Deletion carries the
//! stricter administrator-only override from the permission table. The
//! pending lookup feeds the reconciliation workflow's Egreso dropdown.

use crate::{
    core::{
        ESTADO_PAGADO, ESTADO_PENDIENTE,
        authz::{self, Action, AuthUser, Resource},
    },
    entities::{Expense, expense},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

/// Caller-supplied fields for creating or updating an expense.
#[derive(Clone, Debug, Deserialize)]
pub struct ExpenseInput {
    /// Expense date
    pub fecha: NaiveDate,
    /// Expense category
    pub categoria: String,
    /// Free-form description
    pub descripcion: Option<String>,
    /// Amount spent
    pub monto: f64,
    /// Payment method
    #[serde(rename = "metodoPago")]
    pub metodo_pago: Option<String>,
    /// Supplier invoice number
    #[serde(rename = "numeroFactura")]
    pub numero_factura: Option<String>,
    /// Supplier name
    pub proveedor: Option<String>,
    /// `"Pendiente"` or `"Pagado"`; defaults to `"Pendiente"`
    #[serde(default)]
    pub estado: Option<String>,
}

fn validate(input: &ExpenseInput) -> Result<String> {
    if input.categoria.trim().is_empty() {
        return Err(Error::InvalidArgument {
            message: "categoria is required".to_string(),
        });
    }

    if !input.monto.is_finite() || input.monto <= 0.0 {
        return Err(Error::InvalidArgument {
            message: format!("monto must be a positive amount, got {}", input.monto),
        });
    }

    let estado = input
        .estado
        .clone()
        .unwrap_or_else(|| ESTADO_PENDIENTE.to_string());
    if estado != ESTADO_PENDIENTE && estado != ESTADO_PAGADO {
        return Err(Error::InvalidArgument {
            message: format!("estado must be Pendiente or Pagado, got '{estado}'"),
        });
    }
    Ok(estado)
}

/// Creates an expense.
pub async fn create_expense(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: ExpenseInput,
) -> Result<expense::Model> {
    authz::authorize(caller, Resource::Expenses, Action::Create)?;
    let estado = validate(&input)?;

    expense::ActiveModel {
        fecha: Set(input.fecha),
        categoria: Set(input.categoria.trim().to_string()),
        descripcion: Set(input.descripcion),
        monto: Set(input.monto),
        metodo_pago: Set(input.metodo_pago),
        numero_factura: Set(input.numero_factura),
        proveedor: Set(input.proveedor),
        estado: Set(estado),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists all expenses, newest first.
pub async fn list_expenses(
    db: &DatabaseConnection,
    caller: &AuthUser,
) -> Result<Vec<expense::Model>> {
    authz::authorize(caller, Resource::Expenses, Action::Read)?;

    Expense::find()
        .order_by_desc(expense::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists expenses that still await payment, oldest first.
pub async fn list_pending_expenses(
    db: &DatabaseConnection,
    caller: &AuthUser,
) -> Result<Vec<expense::Model>> {
    authz::authorize(caller, Resource::Expenses, Action::Read)?;

    Expense::find()
        .filter(expense::Column::Estado.eq(ESTADO_PENDIENTE))
        .order_by_asc(expense::Column::Fecha)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_expense(db: &DatabaseConnection, id: i64) -> Result<expense::Model> {
    Expense::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: format!("gasto {id}"),
        })
}

/// Updates an expense.
pub async fn update_expense(
    db: &DatabaseConnection,
    caller: &AuthUser,
    id: i64,
    input: ExpenseInput,
) -> Result<expense::Model> {
    authz::authorize(caller, Resource::Expenses, Action::Update)?;
    let existing = find_expense(db, id).await?;
    let estado = validate(&input)?;

    let mut expense: expense::ActiveModel = existing.into();
    expense.fecha = Set(input.fecha);
    expense.categoria = Set(input.categoria.trim().to_string());
    expense.descripcion = Set(input.descripcion);
    expense.monto = Set(input.monto);
    expense.metodo_pago = Set(input.metodo_pago);
    expense.numero_factura = Set(input.numero_factura);
    expense.proveedor = Set(input.proveedor);
    expense.estado = Set(estado);
    expense.update(db).await.map_err(Into::into)
}

/// Deletes an expense. Administrator-only, even though all finance roles
/// can read and edit.
pub async fn delete_expense(db: &DatabaseConnection, caller: &AuthUser, id: i64) -> Result<()> {
    authz::authorize(caller, Resource::Expenses, Action::Delete)?;
    let existing = find_expense(db, id).await?;

    existing.delete(db).await?;
    Ok(())
}
