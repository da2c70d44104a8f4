//! Payment reconciliation workflow.
//!
//! Recording a payment is a four-step unit: pick the counter for the payment
//! kind, increment it and format the document reference, insert the payment
//! row, and mark the linked sale or expense as paid. All four run inside one
//! database transaction, so a failure at any step (bad record id, constraint
//! violation, lost connection) rolls back everything: no payment exists
//! without a reference and no reference is consumed without its payment.
//!
//! Deleting a payment is deliberately outside that protection and does not
//! reset the linked record to `"Pendiente"`; see [`delete_payment`].

use crate::{
    core::{
        ESTADO_PAGADO,
        authz::{self, Action, AuthUser, Resource},
        sequence,
    },
    entities::{Expense, Payment, Sale, expense, payment, sale},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryOrder, Set,
    TransactionTrait,
};
use serde::Deserialize;
use tracing::info;

/// Direction of a payment: income from a sale or outflow for an expense.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PaymentKind {
    /// Money coming in, may settle a sale
    Ingreso,
    /// Money going out, may settle an expense
    Egreso,
}

impl PaymentKind {
    /// Parses the wire value of `tipo`. Anything else is a caller error.
    pub fn parse(tipo: &str) -> Option<Self> {
        match tipo {
            "Ingreso" => Some(Self::Ingreso),
            "Egreso" => Some(Self::Egreso),
            _ => None,
        }
    }

    /// The stored value of `tipo`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ingreso => "Ingreso",
            Self::Egreso => "Egreso",
        }
    }

    /// The sequence counter this kind draws references from.
    pub const fn counter_key(self) -> &'static str {
        match self {
            Self::Ingreso => "ref_ingreso",
            Self::Egreso => "ref_egreso",
        }
    }

    /// The document reference prefix for this kind.
    pub const fn reference_prefix(self) -> &'static str {
        match self {
            Self::Ingreso => "ING-",
            Self::Egreso => "EGR-",
        }
    }
}

/// Caller-supplied fields for a new payment. `referencia` is always generated
/// server-side and therefore absent here.
#[derive(Clone, Debug, Deserialize)]
pub struct PaymentInput {
    /// Payment date
    pub fecha: NaiveDate,
    /// `"Ingreso"` or `"Egreso"`
    pub tipo: String,
    /// What the payment is for
    pub concepto: String,
    /// Amount paid
    pub monto: f64,
    /// Payment method
    pub metodo: String,
    /// Counterparty name
    #[serde(rename = "entidadRelacionada")]
    pub entidad_relacionada: Option<String>,
    /// Sale to settle (Ingreso only)
    pub venta_id: Option<i64>,
    /// Expense to settle (Egreso only)
    pub gasto_id: Option<i64>,
}

/// Validates the kind/link pairing and the amount, before anything touches
/// the store. Ingreso pairs only with a sale, Egreso only with an expense.
fn validate(input: &PaymentInput) -> Result<PaymentKind> {
    let kind = PaymentKind::parse(&input.tipo).ok_or_else(|| Error::InvalidArgument {
        message: format!("unknown payment tipo '{}'", input.tipo),
    })?;

    if !input.monto.is_finite() || input.monto <= 0.0 {
        return Err(Error::InvalidArgument {
            message: format!("monto must be a positive amount, got {}", input.monto),
        });
    }

    match kind {
        PaymentKind::Ingreso if input.gasto_id.is_some() => Err(Error::InvalidArgument {
            message: "an Ingreso payment cannot reference a gasto".to_string(),
        }),
        PaymentKind::Egreso if input.venta_id.is_some() => Err(Error::InvalidArgument {
            message: "an Egreso payment cannot reference a venta".to_string(),
        }),
        _ => Ok(kind),
    }
}

/// Runs the payment reconciliation workflow and returns the created payment,
/// including its generated reference.
///
/// The unlinked path (`venta_id` and `gasto_id` both absent) records general
/// income or expense entries (payroll, utilities) and skips only the status
/// update step.
pub async fn record_payment(
    db: &DatabaseConnection,
    caller: &AuthUser,
    input: PaymentInput,
) -> Result<payment::Model> {
    authz::authorize(caller, Resource::Payments, Action::Create)?;
    let kind = validate(&input)?;

    // All four steps in one transaction: an early return before commit rolls
    // back the payment row and the consumed counter value alike.
    let txn = db.begin().await?;

    let value = sequence::increment(&txn, kind.counter_key()).await?;
    let referencia = sequence::format_reference(kind.reference_prefix(), value);

    // Resolve linked records up front so a bad id surfaces as NotFound
    // rather than a foreign-key violation on the insert below.
    let linked_sale = match input.venta_id {
        Some(venta_id) => Some(Sale::find_by_id(venta_id).one(&txn).await?.ok_or_else(
            || Error::NotFound {
                what: format!("venta {venta_id}"),
            },
        )?),
        None => None,
    };
    let linked_expense = match input.gasto_id {
        Some(gasto_id) => Some(Expense::find_by_id(gasto_id).one(&txn).await?.ok_or_else(
            || Error::NotFound {
                what: format!("gasto {gasto_id}"),
            },
        )?),
        None => None,
    };

    let created = payment::ActiveModel {
        fecha: Set(input.fecha),
        tipo: Set(kind.as_str().to_string()),
        concepto: Set(input.concepto),
        monto: Set(input.monto),
        metodo: Set(input.metodo),
        entidad_relacionada: Set(input.entidad_relacionada),
        referencia: Set(referencia),
        venta_id: Set(input.venta_id),
        gasto_id: Set(input.gasto_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    if let Some(sale) = linked_sale {
        let mut sale: sale::ActiveModel = sale.into();
        sale.estado_pago = Set(ESTADO_PAGADO.to_string());
        sale.update(&txn).await?;
    }

    if let Some(expense) = linked_expense {
        let mut expense: expense::ActiveModel = expense.into();
        expense.estado = Set(ESTADO_PAGADO.to_string());
        expense.update(&txn).await?;
    }

    txn.commit().await?;

    info!(
        payment_id = created.id,
        referencia = %created.referencia,
        tipo = %created.tipo,
        "payment recorded"
    );

    Ok(created)
}

/// Lists all payments, newest first.
pub async fn list_payments(
    db: &DatabaseConnection,
    caller: &AuthUser,
) -> Result<Vec<payment::Model>> {
    authz::authorize(caller, Resource::Payments, Action::Read)?;

    Payment::find()
        .order_by_desc(payment::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes a payment.
///
/// This intentionally does NOT reverse the linked sale or expense back to
/// `"Pendiente"`: the original system preserved the paid status as an audit
/// trail, and that behavior is kept as-is rather than silently corrected.
pub async fn delete_payment(db: &DatabaseConnection, caller: &AuthUser, id: i64) -> Result<()> {
    authz::authorize(caller, Resource::Payments, Action::Delete)?;

    let payment = Payment::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            what: format!("pago {id}"),
        })?;

    payment.delete(db).await?;
    Ok(())
}
