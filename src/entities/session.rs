//! Session entity - Opaque bearer tokens issued at login.
//!
//! A session row maps a random token to a user and an expiry. Token format is
//! deliberately opaque to callers; authorization only cares about the verified
//! identity the token resolves to.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Random bearer token (UUID v4)
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    /// User this session belongs to
    pub user_id: i64,
    /// When the session was created
    pub created_at: DateTimeUtc,
    /// When the session stops being accepted
    pub expires_at: DateTimeUtc,
}

/// Defines relationships between Session and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each session belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
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
