//! Calendar event entity - Scheduled farm tasks assigned to collaborators.
//!
//! `completed_at` is set when the event's status becomes `"Completado"`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Calendar event database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "calendarios")]
pub struct Model {
    /// Unique identifier for the event
    #[sea_orm(primary_key)]
    pub id: i64,
    /// When the event record was created
    pub created_at: DateTimeUtc,
    /// Scheduled date of the task
    pub fecha: Date,
    /// Task type (e.g. riego, cosecha, mantenimiento)
    pub tipo: String,
    /// What needs to be done
    pub descripcion: String,
    /// Collaborator assigned to the task
    pub responsable: Option<String>,
    /// Task status: `"Pendiente"`, `"Completado"`, ...
    pub estado: String,
    /// Notes recorded when the task is worked on
    pub observaciones: Option<String>,
    /// When the status became `"Completado"`
    pub completed_at: Option<DateTimeUtc>,
}

/// `CalendarEvent` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
