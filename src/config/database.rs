//! Database connection, table creation, and reference-data seeding.
//!
//! Tables are generated from the entity definitions via `SeaORM`'s
//! `Schema::create_table_from_entity`, so the schema always matches the Rust
//! structs. Seeding inserts the six fixed roles and the initial administrator
//! account; both steps are idempotent and safe to run on every startup.

use crate::{
    config::AppConfig,
    core::{authz::Role as RoleName, user::hash_password},
    entities::{
        CalendarEvent, Client, Expense, Payment, Role, Sale, Sequence, Session, User, role, user,
    },
    errors::Result,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, Schema, Set,
};
use tracing::info;

/// Establishes a connection to the database named by `url`.
pub async fn create_connection(url: &str) -> Result<DatabaseConnection> {
    Database::connect(url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
///
/// Creation order respects foreign keys: roles before users, users before
/// sessions and the owner-scoped tables, sales and expenses before payments.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    db.execute(builder.build(&schema.create_table_from_entity(Role)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(User)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Session)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Client)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Sale)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Expense)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Payment)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(Sequence)))
        .await?;
    db.execute(builder.build(&schema.create_table_from_entity(CalendarEvent)))
        .await?;

    Ok(())
}

/// Inserts the six fixed roles if the table is empty.
pub async fn seed_roles(db: &DatabaseConnection) -> Result<()> {
    if Role::find().count(db).await? > 0 {
        return Ok(());
    }

    for role in RoleName::ALL {
        role::ActiveModel {
            nombre: Set(role.name().to_string()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        info!(role = role.name(), "seeded role");
    }
    Ok(())
}

/// Creates the initial administrator account if it does not exist yet.
pub async fn seed_admin_user(db: &DatabaseConnection, config: &AppConfig) -> Result<()> {
    let exists = User::find()
        .filter(user::Column::Username.eq(config.admin_username.as_str()))
        .one(db)
        .await?
        .is_some();
    if exists {
        return Ok(());
    }

    let admin_role = Role::find()
        .filter(role::Column::Nombre.eq(RoleName::Administrador.name()))
        .one(db)
        .await?
        .ok_or_else(|| crate::errors::Error::Config {
            message: "administrator role is not seeded".to_string(),
        })?;

    user::ActiveModel {
        username: Set(config.admin_username.clone()),
        nombre: Set("Administrador".to_string()),
        password: Set(hash_password(&config.admin_password)?),
        role_id: Set(admin_role.id),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(username = %config.admin_username, "seeded administrator account");
    Ok(())
}
