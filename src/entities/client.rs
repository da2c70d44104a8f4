//! Client entity - Customer records, owner-scoped.
//!
//! `created_by` records which user created the row; non-administrator roles
//! may only update or delete clients they created.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Client database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    /// Unique identifier for the client
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Client name
    pub nombre: String,
    /// Phone number
    pub telefono: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Postal address
    pub direccion: Option<String>,
    /// User who created this record (ownership reference)
    pub created_by: i64,
}

/// Defines relationships between Client and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each client record was created by one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
