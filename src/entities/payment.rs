//! Payment entity - Money movements with a system-generated reference.
//!
//! `referencia` is generated by the sequence generator (`"ING-0008"` /
//! `"EGR-0012"`) and never supplied by the caller. A payment may link to at
//! most one sale (`tipo` Ingreso) or one expense (`tipo` Egreso); unlinked
//! payments cover general income or expense entries such as payroll.
//!
//! Payments are immutable once created, except for deletion. Deleting a
//! payment does NOT reset the linked sale or expense back to `"Pendiente"`;
//! the record of the paid status is preserved as an audit trail.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pagos")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Payment date
    pub fecha: Date,
    /// Direction of the movement: `"Ingreso"` or `"Egreso"`
    pub tipo: String,
    /// What the payment is for
    pub concepto: String,
    /// Amount paid
    pub monto: f64,
    /// Payment method
    pub metodo: String,
    /// Counterparty name (customer, supplier, employee)
    #[serde(rename = "entidadRelacionada")]
    pub entidad_relacionada: Option<String>,
    /// System-generated document reference, e.g. `"ING-0008"`
    pub referencia: String,
    /// Sale this payment settles (Ingreso only)
    pub venta_id: Option<i64>,
    /// Expense this payment settles (Egreso only)
    pub gasto_id: Option<i64>,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An Ingreso payment may settle one sale
    #[sea_orm(
        belongs_to = "super::sale::Entity",
        from = "Column::VentaId",
        to = "super::sale::Column::Id"
    )]
    Sale,
    /// An Egreso payment may settle one expense
    #[sea_orm(
        belongs_to = "super::expense::Entity",
        from = "Column::GastoId",
        to = "super::expense::Column::Id"
    )]
    Expense,
}

impl Related<super::sale::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sale.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
