//! Atomic named counters and document reference formatting.
//!
//! Counters back the human-readable references on payments and invoices. The
//! increment must be a single store-level upsert: a read-then-write pair from
//! the application layer would let two concurrent callers observe the same
//! prior value and hand out the same document reference.

use crate::{
    entities::{Sequence, sequence},
    errors::Result,
};
use sea_orm::{
    ConnectionTrait, EntityTrait, Set,
    sea_query::{Expr, OnConflict},
};

/// Increments the counter named `key` and returns the new value.
///
/// A missing counter is initialized to 1. The whole operation is one
/// `INSERT .. ON CONFLICT DO UPDATE SET value = value + 1 RETURNING` statement,
/// so concurrent callers on the same key are serialized by the store and never
/// observe the same post-increment value.
///
/// Accepts any connection, including an open transaction: incrementing inside
/// a transaction means a rollback also un-consumes the counter value.
pub async fn increment<C>(db: &C, key: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    let row = sequence::ActiveModel {
        key: Set(key.to_string()),
        value: Set(1),
    };

    let model = Sequence::insert(row)
        .on_conflict(
            OnConflict::column(sequence::Column::Key)
                .value(
                    sequence::Column::Value,
                    Expr::col(sequence::Column::Value).add(1),
                )
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;

    Ok(model.value)
}

/// Returns the current value of the counter named `key` without incrementing.
/// A counter that has never been incremented reads as 0.
pub async fn current<C>(db: &C, key: &str) -> Result<i64>
where
    C: ConnectionTrait,
{
    let value = Sequence::find_by_id(key)
        .one(db)
        .await?
        .map_or(0, |model| model.value);

    Ok(value)
}

/// Formats a document reference from a prefix and a counter value,
/// zero-padding the value to four digits (`"ING-0008"`).
pub fn format_reference(prefix: &str, value: i64) -> String {
    format!("{prefix}{value:04}")
}
