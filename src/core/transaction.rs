//! Gallon transaction log - append-only withdrawal history.
//!
//! Rows are written only by [`crate::core::ledger::take_gallons`], inside the same database
//! transaction as the quota decrement. There is no update or delete here: history goes away
//! only together with its employee.

use crate::{
    entities::{GallonTransaction, gallon_transaction},
    errors::Result,
};
use chrono::{DateTime, Utc};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, prelude::*};
use tracing::debug;

/// Number of transactions shown on an employee's detail view.
pub const RECENT_TRANSACTION_LIMIT: u64 = 10;

/// Appends one withdrawal record.
///
/// `remaining_quota_after` must be the employee's quota right after the decrement this
/// record belongs to. Call this on the same connection or transaction that applied it.
pub async fn record_withdrawal<C>(
    db: &C,
    employee_id: i32,
    quantity: i32,
    remaining_quota_after: i32,
    taken_at: DateTime<Utc>,
) -> Result<gallon_transaction::Model>
where
    C: ConnectionTrait,
{
    let record = gallon_transaction::ActiveModel {
        employee_id: Set(employee_id),
        quantity: Set(quantity),
        remaining_quota_after: Set(remaining_quota_after),
        taken_at: Set(taken_at),
        created_at: Set(taken_at),
        ..Default::default()
    };

    let inserted = record.insert(db).await?;
    debug!(
        transaction_id = inserted.id,
        employee_id, quantity, remaining_quota_after, "Recorded gallon withdrawal"
    );
    Ok(inserted)
}

/// Retrieves every transaction of an employee, newest first.
pub async fn get_transactions_for_employee(
    db: &DatabaseConnection,
    employee_id: i32,
) -> Result<Vec<gallon_transaction::Model>> {
    GallonTransaction::find()
        .filter(gallon_transaction::Column::EmployeeId.eq(employee_id))
        .order_by_desc(gallon_transaction::Column::TakenAt)
        .order_by_desc(gallon_transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the `limit` most recent transactions of an employee, newest first.
pub async fn get_recent_transactions(
    db: &DatabaseConnection,
    employee_id: i32,
    limit: u64,
) -> Result<Vec<gallon_transaction::Model>> {
    GallonTransaction::find()
        .filter(gallon_transaction::Column::EmployeeId.eq(employee_id))
        .order_by_desc(gallon_transaction::Column::TakenAt)
        .order_by_desc(gallon_transaction::Column::Id)
        .limit(limit)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Counts the transactions recorded for an employee.
pub async fn count_transactions_for_employee(
    db: &DatabaseConnection,
    employee_id: i32,
) -> Result<u64> {
    GallonTransaction::find()
        .filter(gallon_transaction::Column::EmployeeId.eq(employee_id))
        .count(db)
        .await
        .map_err(Into::into)
}
