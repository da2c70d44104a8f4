//! Calendar business logic - scheduled tasks and their completion.
//!
//! Completing an event sets its status to `"Completado"` and stamps the
//! completion time; observations recorded by the collaborator are stored
//! alongside.

use crate::{
    core::{
        ESTADO_COMPLETADO, ESTADO_PENDIENTE,
        authz::{self, Action, AuthUser, Resource},
    },
    entities::{CalendarEvent, calendar_event},
    errors::{Error, Result},
};
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::Deserialize;

/// Caller-supplied fields for creating a calendar event.
#[derive(Clone, Debug, Deserialize)]
pub struct EventInput {
    /// Scheduled date of the task
    pub fecha: NaiveDate,
    /// Task type
    pub tipo: String,
    /// What needs to be done
    pub descripcion: String,
    /// Collaborator assigned to the task
    pub responsable: Option<String>,
}

/// Creates a pending calendar event.
pub async fn create_event(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: EventInput,
) -> Result<calendar_event::Model> {
    authz::authorize(caller, Resource::Calendar, Action::Create)?;

    if input.descripcion.trim().is_empty() {
        return Err(Error::InvalidArgument {
            message: "descripcion is required".to_string(),
        });
    }

    calendar_event::ActiveModel {
        created_at: Set(Utc::now()),
        fecha: Set(input.fecha),
        tipo: Set(input.tipo),
        descripcion: Set(input.descripcion.trim().to_string()),
        responsable: Set(input.responsable),
        estado: Set(ESTADO_PENDIENTE.to_string()),
        observaciones: Set(None),
        completed_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists all events, soonest scheduled date first.
pub async fn list_events(
    db: &DatabaseConnection,
    caller: &AuthUser,
) -> Result<Vec<calendar_event::Model>> {
    authz::authorize(caller, Resource::Calendar, Action::Read)?;

    CalendarEvent::find()
        .order_by_asc(calendar_event::Column::Fecha)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Marks an event as completed, stamping the completion time and recording
/// the collaborator's observations.
pub async fn complete_event(
    db: &DatabaseConnection,
    caller: &AuthUser,
    id: i64,
    observaciones: Option<String>,
) -> Result<calendar_event::Model> {
    authz::authorize(caller, Resource::Calendar, Action::Update)?;

    let existing = CalendarEvent::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: format!("evento {id}"),
        })?;

    let mut event: calendar_event::ActiveModel = existing.into();
    event.estado = Set(ESTADO_COMPLETADO.to_string());
    event.completed_at = Set(Some(Utc::now()));
    if observaciones.is_some() {
        event.observaciones = Set(observaciones);
    }
    event.update(db).await.map_err(Into::into)
}
