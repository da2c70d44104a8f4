//! Sale entity - One sale of produce to a customer, owner-scoped.
//!
//! `estado_pago` transitions from `"Pendiente"` to `"Pagado"` either through
//! the payment reconciliation workflow or a direct edit. `total` is trusted
//! from the caller at creation time and not recomputed server-side.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sale database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ventas")]
pub struct Model {
    /// Unique identifier for the sale
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer name
    pub cliente: String,
    /// Product sold
    pub producto: String,
    /// Quantity sold
    pub cantidad: f64,
    /// Price per unit
    #[serde(rename = "precioUnitario")]
    pub precio_unitario: f64,
    /// Total amount (quantity x unit price, as reported by the caller)
    pub total: f64,
    /// Sale date
    pub fecha: Date,
    /// Payment status: `"Pendiente"` or `"Pagado"`
    #[serde(rename = "estadoPago")]
    pub estado_pago: String,
    /// User who created this record (ownership reference)
    pub created_by: i64,
}

/// Defines relationships between Sale and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each sale was created by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    User,
    /// A sale may be settled by payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
