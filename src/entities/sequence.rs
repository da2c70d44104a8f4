//! Sequence entity - Named monotonic counters for document references.
//!
//! One row per logical counter (`"invoiceNumber"`, `"ref_ingreso"`,
//! `"ref_egreso"`). The value only ever grows, by exactly one per increment,
//! and the increment is a single atomic upsert at the store level.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sequence database model - one named counter
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sequences")]
pub struct Model {
    /// Counter name
    #[sea_orm(primary_key, auto_increment = false)]
    pub key: String,
    /// Current counter value
    pub value: i64,
}

/// `Sequence` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
