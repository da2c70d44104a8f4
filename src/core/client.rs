//! Client business logic - owner-scoped customer records.
//!
//! Same ownership model as sales: the creator (or an administrator) may
//! update or delete a client record; reads are role-gated only.

use crate::{
    core::authz::{self, Action, AuthUser, Resource},
    entities::{Client, client},
    errors::{Error, Result},
};
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
};
use serde::Deserialize;

/// Caller-supplied fields for creating or updating a client.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientInput {
    /// Client name, required
    pub nombre: String,
    /// Phone number
    pub telefono: Option<String>,
    /// Email address
    pub email: Option<String>,
    /// Postal address
    pub direccion: Option<String>,
}

fn validate(input: &ClientInput) -> Result<()> {
    if input.nombre.trim().is_empty() {
        return Err(Error::InvalidArgument {
            message: "nombre is required".to_string(),
        });
    }
    Ok(())
}

/// Creates a client owned by the caller.
pub async fn create_client(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: ClientInput,
) -> Result<client::Model> {
    authz::authorize(caller, Resource::Clients, Action::Create)?;
    validate(&input)?;

    client::ActiveModel {
        nombre: Set(input.nombre.trim().to_string()),
        telefono: Set(input.telefono),
        email: Set(input.email),
        direccion: Set(input.direccion),
        created_by: Set(caller.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists all clients, alphabetically.
pub async fn list_clients(
    db: &DatabaseConnection,
    caller: &AuthUser,
) -> Result<Vec<client::Model>> {
    authz::authorize(caller, Resource::Clients, Action::Read)?;

    Client::find()
        .order_by_asc(client::Column::Nombre)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_client(db: &DatabaseConnection, id: i64) -> Result<client::Model> {
    Client::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: format!("cliente {id}"),
        })
}

/// Updates a client the caller owns (or any client, for administrators).
pub async fn update_client(
    db: &DatabaseConnection,
    caller: &AuthUser,
    id: i64,
    input: ClientInput,
) -> Result<client::Model> {
    authz::authorize(caller, Resource::Clients, Action::Update)?;
    let existing = find_client(db, id).await?;
    authz::authorize_record(caller, Resource::Clients, Action::Update, &existing)?;
    validate(&input)?;

    let mut client: client::ActiveModel = existing.into();
    client.nombre = Set(input.nombre.trim().to_string());
    client.telefono = Set(input.telefono);
    client.email = Set(input.email);
    client.direccion = Set(input.direccion);
    client.update(db).await.map_err(Into::into)
}

/// Deletes a client the caller owns (or any client, for administrators).
pub async fn delete_client(db: &DatabaseConnection, caller: &AuthUser, id: i64) -> Result<()> {
    authz::authorize(caller, Resource::Clients, Action::Delete)?;
    let existing = find_client(db, id).await?;
    authz::authorize_record(caller, Resource::Clients, Action::Delete, &existing)?;

    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::authz::Role,
        test_utils::{caller_with_role, setup_test_db},
    };

    fn input(nombre: &str) -> ClientInput {
        ClientInput {
            nombre: nombre.to_string(),
            telefono: Some("555-0101".to_string()),
            email: None,
            direccion: None,
        }
    }

    #[tokio::test]
    async fn test_create_records_creator() -> Result<()> {
        let db = setup_test_db().await?;
        let vendedor = caller_with_role(7, Role::Vendedor);

        let client = create_client(&db, &vendedor, input("Cafetal SA")).await?;
        assert_eq!(client.created_by, 7);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let vendedor = caller_with_role(7, Role::Vendedor);

        let err = create_client(&db, &vendedor, input("  ")).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_ownership_applies_to_clients_too() -> Result<()> {
        let db = setup_test_db().await?;
        let vendedor = caller_with_role(7, Role::Vendedor);
        let other = caller_with_role(8, Role::Vendedor);
        let record = create_client(&db, &other, input("Finca Vecina")).await?;

        let err = delete_client(&db, &vendedor, record.id).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));

        delete_client(&db, &other, record.id).await?;
        assert!(Client::find_by_id(record.id).one(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_contador_cannot_read_clients() -> Result<()> {
        let db = setup_test_db().await?;
        let contador = caller_with_role(2, Role::Contador);

        let err = list_clients(&db, &contador).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_is_alphabetical() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = caller_with_role(1, Role::Administrador);

        create_client(&db, &admin, input("Zamorano")).await?;
        create_client(&db, &admin, input("Agrícola Sur")).await?;

        let all = list_clients(&db, &admin).await?;
        assert_eq!(all[0].nombre, "Agrícola Sur");
        assert_eq!(all[1].nombre, "Zamorano");
        Ok(())
    }
}
