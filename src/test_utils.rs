//! Shared test utilities for Agrolibro.
//!
//! Provides an in-memory SQLite database with tables and reference data in
//! place, plus helpers for building callers and records with sensible
//! defaults.

use crate::{
    config::database::{create_tables, seed_roles},
    core::{
        ESTADO_PENDIENTE,
        authz::{AuthUser, Role},
        payment::PaymentInput,
        sale::SaleInput,
    },
    entities::{expense, sale, user},
    errors::Result,
};
use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ConnectOptions, DatabaseConnection, Set};

/// Creates an in-memory SQLite database with all tables created, roles
/// seeded, and a fixed set of test users inserted.
///
/// The pool is capped at one connection: a pooled in-memory SQLite database
/// would otherwise hand each new connection its own empty database.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);
    let db = sea_orm::Database::connect(options).await?;

    create_tables(&db).await?;
    seed_roles(&db).await?;
    seed_standard_users(&db).await?;
    Ok(db)
}

/// The fixed users available in every test database. Ids line up with the
/// callers returned by [`caller_with_role`] in the test modules:
/// 1 admin, 2 contador, 5 supervisor, 6 colaborador, 7 and 8 vendedores.
async fn seed_standard_users(db: &DatabaseConnection) -> Result<()> {
    let users: [(i64, &str, Role); 6] = [
        (1, "admin", Role::Administrador),
        (2, "contador", Role::Contador),
        (5, "supervisor", Role::Supervisor),
        (6, "colaborador", Role::Colaborador),
        (7, "vendedor", Role::Vendedor),
        (8, "vendedor2", Role::Vendedor),
    ];

    for (id, username, role) in users {
        user::ActiveModel {
            id: Set(id),
            username: Set(username.to_string()),
            nombre: Set(username.to_string()),
            // Not a valid hash; tests that verify credentials create their
            // own users via `create_test_user`.
            password: Set("unusable".to_string()),
            role_id: Set(role_id(role)),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

/// The id a role receives from `seed_roles` (insertion order of `Role::ALL`).
pub fn role_id(role: Role) -> i64 {
    Role::ALL
        .iter()
        .position(|r| *r == role)
        .map_or(0, |index| index as i64 + 1)
}

/// A caller with the given id and role, as if their token had been resolved.
pub fn caller_with_role(id: i64, role: Role) -> AuthUser {
    let username = match id {
        1 => "admin",
        2 => "contador",
        5 => "supervisor",
        6 => "colaborador",
        8 => "vendedor2",
        _ => "vendedor",
    };
    AuthUser {
        id,
        username: username.to_string(),
        role: Some(role),
    }
}

/// An authenticated caller whose stored role name is not in the permission
/// table; the gate must deny everything.
pub fn caller_without_role(id: i64) -> AuthUser {
    AuthUser {
        id,
        username: "misterioso".to_string(),
        role: None,
    }
}

/// Creates a user with a real (argon2-hashed) credential for login tests.
pub async fn create_test_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: Role,
) -> Result<user::Model> {
    user::ActiveModel {
        username: Set(username.to_string()),
        nombre: Set(username.to_string()),
        password: Set(crate::core::user::hash_password(password)?),
        role_id: Set(role_id(role)),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 15).unwrap_or_default()
}

/// Inserts a pending sale owned by `created_by`, bypassing the gate.
pub async fn create_test_sale(db: &DatabaseConnection, created_by: i64) -> Result<sale::Model> {
    sale::ActiveModel {
        cliente: Set("Finca El Roble".to_string()),
        producto: Set("Café".to_string()),
        cantidad: Set(10.0),
        precio_unitario: Set(5.0),
        total: Set(50.0),
        fecha: Set(test_date()),
        estado_pago: Set(ESTADO_PENDIENTE.to_string()),
        created_by: Set(created_by),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Inserts a pending expense, bypassing the gate.
pub async fn create_test_expense(db: &DatabaseConnection) -> Result<expense::Model> {
    expense::ActiveModel {
        fecha: Set(test_date()),
        categoria: Set("insumos".to_string()),
        descripcion: Set(Some("Fertilizante".to_string())),
        monto: Set(80.0),
        metodo_pago: Set(Some("efectivo".to_string())),
        numero_factura: Set(Some("F-0042".to_string())),
        proveedor: Set(Some("Agroinsumos SA".to_string())),
        estado: Set(ESTADO_PENDIENTE.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// An unlinked payment input of the given tipo with sensible defaults.
pub fn payment_input(tipo: &str) -> PaymentInput {
    PaymentInput {
        fecha: test_date(),
        tipo: tipo.to_string(),
        concepto: "Pago de prueba".to_string(),
        monto: 50.0,
        metodo: "efectivo".to_string(),
        entidad_relacionada: Some("Finca El Roble".to_string()),
        venta_id: None,
        gasto_id: None,
    }
}

/// A sale input with sensible defaults and no explicit estado.
pub fn sale_input() -> SaleInput {
    SaleInput {
        cliente: "Finca El Roble".to_string(),
        producto: "Café".to_string(),
        cantidad: 10.0,
        precio_unitario: 5.0,
        total: 50.0,
        fecha: test_date(),
        estado_pago: None,
    }
}

/// An expense input with sensible defaults and no explicit estado.
pub fn expense_input() -> crate::core::expense::ExpenseInput {
    crate::core::expense::ExpenseInput {
        fecha: test_date(),
        categoria: "insumos".to_string(),
        descripcion: Some("Fertilizante".to_string()),
        monto: 80.0,
        metodo_pago: Some("efectivo".to_string()),
        numero_factura: None,
        proveedor: Some("Agroinsumos SA".to_string()),
        estado: None,
    }
}
