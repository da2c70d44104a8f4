//! Sale business logic - owner-scoped CRUD and the pending-sales lookup.
//!
//! Sales carry a creator reference: vendedores may update or delete only the
//! sales they created, while administrators may touch any record. The pending
//! lookup feeds the reconciliation workflow's Ingreso dropdown.

use crate::{
    core::{
        ESTADO_PAGADO, ESTADO_PENDIENTE,
        authz::{self, Action, AuthUser, Resource},
    },
    entities::{Sale, sale},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;

/// Caller-supplied fields for creating or updating a sale.
#[derive(Clone, Debug, Deserialize)]
pub struct SaleInput {
    /// Customer name
    pub cliente: String,
    /// Product sold
    pub producto: String,
    /// Quantity sold
    pub cantidad: f64,
    /// Price per unit
    #[serde(rename = "precioUnitario")]
    pub precio_unitario: f64,
    /// Total amount; trusted from the caller, not recomputed
    pub total: f64,
    /// Sale date
    pub fecha: NaiveDate,
    /// `"Pendiente"` or `"Pagado"`; defaults to `"Pendiente"`
    #[serde(rename = "estadoPago", default)]
    pub estado_pago: Option<String>,
}

fn validate(input: &SaleInput) -> Result<String> {
    if input.cliente.trim().is_empty() || input.producto.trim().is_empty() {
        return Err(Error::InvalidArgument {
            message: "cliente and producto are required".to_string(),
        });
    }

    for (field, value) in [
        ("cantidad", input.cantidad),
        ("precioUnitario", input.precio_unitario),
        ("total", input.total),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidArgument {
                message: format!("{field} must be a non-negative amount, got {value}"),
            });
        }
    }

    let estado = input
        .estado_pago
        .clone()
        .unwrap_or_else(|| ESTADO_PENDIENTE.to_string());
    if estado != ESTADO_PENDIENTE && estado != ESTADO_PAGADO {
        return Err(Error::InvalidArgument {
            message: format!("estadoPago must be Pendiente or Pagado, got '{estado}'"),
        });
    }
    Ok(estado)
}

/// Creates a sale owned by the caller.
pub async fn create_sale(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: SaleInput,
) -> Result<sale::Model> {
    authz::authorize(caller, Resource::Sales, Action::Create)?;
    let estado = validate(&input)?;

    sale::ActiveModel {
        cliente: Set(input.cliente.trim().to_string()),
        producto: Set(input.producto.trim().to_string()),
        cantidad: Set(input.cantidad),
        precio_unitario: Set(input.precio_unitario),
        total: Set(input.total),
        fecha: Set(input.fecha),
        estado_pago: Set(estado),
        created_by: Set(caller.id),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Lists all sales, newest first.
pub async fn list_sales(db: &DatabaseConnection, caller: &AuthUser) -> Result<Vec<sale::Model>> {
    authz::authorize(caller, Resource::Sales, Action::Read)?;

    Sale::find()
        .order_by_desc(sale::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Lists sales that still await payment, oldest first, for the
/// reconciliation dropdown.
pub async fn list_pending_sales(
    db: &DatabaseConnection,
    caller: &AuthUser,
) -> Result<Vec<sale::Model>> {
    authz::authorize(caller, Resource::Sales, Action::Read)?;

    Sale::find()
        .filter(sale::Column::EstadoPago.eq(ESTADO_PENDIENTE))
        .order_by_asc(sale::Column::Fecha)
        .all(db)
        .await
        .map_err(Into::into)
}

async fn find_sale(db: &DatabaseConnection, id: i64) -> Result<sale::Model> {
    Sale::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: format!("venta {id}"),
        })
}

/// Updates a sale the caller owns (or any sale, for administrators).
pub async fn update_sale(
    db: &DatabaseConnection,
    caller: &AuthUser,
    id: i64,
    input: SaleInput,
) -> Result<sale::Model> {
    // Role check before the fetch: a caller whose role cannot update sales
    // learns nothing about which ids exist.
    authz::authorize(caller, Resource::Sales, Action::Update)?;
    let existing = find_sale(db, id).await?;
    authz::authorize_record(caller, Resource::Sales, Action::Update, &existing)?;
    let estado = validate(&input)?;

    let mut sale: sale::ActiveModel = existing.into();
    sale.cliente = Set(input.cliente.trim().to_string());
    sale.producto = Set(input.producto.trim().to_string());
    sale.cantidad = Set(input.cantidad);
    sale.precio_unitario = Set(input.precio_unitario);
    sale.total = Set(input.total);
    sale.fecha = Set(input.fecha);
    sale.estado_pago = Set(estado);
    sale.update(db).await.map_err(Into::into)
}

/// Deletes a sale the caller owns (or any sale, for administrators).
pub async fn delete_sale(db: &DatabaseConnection, caller: &AuthUser, id: i64) -> Result<()> {
    authz::authorize(caller, Resource::Sales, Action::Delete)?;
    let existing = find_sale(db, id).await?;
    authz::authorize_record(caller, Resource::Sales, Action::Delete, &existing)?;

    existing.delete(db).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::{
        core::authz::Role,
        test_utils::{caller_with_role, create_test_sale, sale_input, setup_test_db},
    };

    #[tokio::test]
    async fn test_create_sale_records_creator_and_defaults_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let vendedor = caller_with_role(7, Role::Vendedor);

        let sale = create_sale(&db, &vendedor, sale_input()).await?;
        assert_eq!(sale.created_by, 7);
        assert_eq!(sale.estado_pago, ESTADO_PENDIENTE);
        Ok(())
    }

    #[tokio::test]
    async fn test_create_sale_rejects_bad_estado() -> Result<()> {
        let db = setup_test_db().await?;
        let vendedor = caller_with_role(7, Role::Vendedor);

        let mut input = sale_input();
        input.estado_pago = Some("Vencido".to_string());
        let err = create_sale(&db, &vendedor, input).await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_contador_reads_but_cannot_create() -> Result<()> {
        let db = setup_test_db().await?;
        let contador = caller_with_role(2, Role::Contador);

        let err = create_sale(&db, &contador, sale_input()).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));
        assert!(list_sales(&db, &contador).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_vendedor_deletes_own_sale_but_not_anothers() -> Result<()> {
        let db = setup_test_db().await?;
        let vendedor = caller_with_role(7, Role::Vendedor);
        let own = create_test_sale(&db, 7).await?;
        let foreign = create_test_sale(&db, 8).await?;

        let err = delete_sale(&db, &vendedor, foreign.id).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden { .. }));

        delete_sale(&db, &vendedor, own.id).await?;
        assert!(Sale::find_by_id(own.id).one(&db).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_administrator_updates_any_sale() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = caller_with_role(1, Role::Administrador);
        let sale = create_test_sale(&db, 7).await?;

        let mut input = sale_input();
        input.estado_pago = Some(ESTADO_PAGADO.to_string());
        let updated = update_sale(&db, &admin, sale.id, input).await?;
        assert_eq!(updated.estado_pago, ESTADO_PAGADO);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_sale_is_not_found_before_ownership() -> Result<()> {
        let db = setup_test_db().await?;
        let vendedor = caller_with_role(7, Role::Vendedor);

        let err = delete_sale(&db, &vendedor, 999).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        Ok(())
    }

    #[tokio::test]
    async fn test_pending_lookup_filters_paid_sales() -> Result<()> {
        let db = setup_test_db().await?;
        let admin = caller_with_role(1, Role::Administrador);
        let pending = create_test_sale(&db, 7).await?;
        let paid = create_test_sale(&db, 7).await?;

        let mut input = sale_input();
        input.estado_pago = Some(ESTADO_PAGADO.to_string());
        update_sale(&db, &admin, paid.id, input).await?;

        let result = list_pending_sales(&db, &admin).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id, pending.id);
        Ok(())
    }
}
