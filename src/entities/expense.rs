//! Expense entity - Operating expenses, optionally tied to a supplier.
//!
//! Follows the same `"Pendiente"` / `"Pagado"` status rule as sales. Deleting
//! an expense is restricted to administrators even though all finance roles
//! may read them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gastos")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Expense date
    pub fecha: Date,
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
    /// Payment status: `"Pendiente"` or `"Pagado"`
    pub estado: String,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An expense may be settled by payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
