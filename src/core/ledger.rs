//! Quota ledger - applies the monthly reset and performs guarded withdrawals.
//!
//! A withdrawal runs as one database transaction: reset check, conditional decrement
//! (`remaining_quota >= quantity` in the `WHERE` clause), then the history row. If any step
//! fails the whole unit rolls back, so a decrement is never visible without its record.
//! The conditional update is the concurrency guard: two racing withdrawals cannot both
//! pass it when together they would overdraw the quota.

use crate::{
    core::{clock::Clock, policy, transaction},
    entities::{Employee, employee, gallon_transaction},
    errors::{Error, Result},
};
use chrono::NaiveDate;
use sea_orm::{TransactionTrait, prelude::*, sea_query::Expr};
use tracing::{info, instrument, warn};

/// Result of a successful withdrawal: the ledger state afterwards and the record it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Withdrawal {
    /// Employee ledger after the decrement
    pub employee: employee::Model,
    /// History row written for this withdrawal
    pub transaction: gallon_transaction::Model,
}

/// Applies the monthly reset to `employee` if one is due on `today`, returning the current state.
///
/// The update only matches rows whose reset date is still in a prior month, so two callers
/// racing on the first access of a month cannot reset twice and wipe out a withdrawal made
/// in between.
#[instrument(skip(db, employee), fields(employee_id = employee.id))]
pub async fn check_and_reset_if_due<C>(
    db: &C,
    employee: employee::Model,
    today: NaiveDate,
) -> Result<employee::Model>
where
    C: ConnectionTrait,
{
    if !policy::is_reset_due(employee.quota_last_reset, today) {
        return Ok(employee);
    }

    let target = policy::reset_target(today);
    let result = Employee::update_many()
        .col_expr(employee::Column::RemainingQuota, Expr::value(target.quota))
        .col_expr(
            employee::Column::QuotaLastReset,
            Expr::value(target.reset_date),
        )
        .filter(employee::Column::Id.eq(employee.id))
        .filter(employee::Column::QuotaLastReset.lt(target.reset_date))
        .exec(db)
        .await?;

    if result.rows_affected > 0 {
        info!(
            scan_code = %employee.scan_code,
            previous_quota = employee.remaining_quota,
            reset_date = %target.reset_date,
            "Monthly quota reset applied"
        );
    }

    reload(db, employee.id).await
}

/// Takes `quantity` gallons from the employee's quota and records the withdrawal.
///
/// Fails with [`Error::InsufficientQuota`] (carrying the post-reset quota) when the
/// employee has fewer than `quantity` gallons left; nothing is decremented or recorded
/// in that case. The upper bound on `quantity` is the caller's concern.
#[instrument(skip(db, clock))]
pub async fn take_gallons(
    db: &DatabaseConnection,
    employee_id: i32,
    quantity: i32,
    clock: &dyn Clock,
) -> Result<Withdrawal> {
    if quantity < 1 {
        return Err(Error::validation("Quantity must be at least 1 gallon."));
    }

    let now = clock.now();
    let txn = db.begin().await?;

    let employee = Employee::find_by_id(employee_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::EmployeeNotFound {
            identifier: employee_id.to_string(),
        })?;
    let employee = check_and_reset_if_due(&txn, employee, clock.today()).await?;

    let decremented = Employee::update_many()
        .col_expr(
            employee::Column::RemainingQuota,
            Expr::col(employee::Column::RemainingQuota).sub(quantity),
        )
        .col_expr(employee::Column::UpdatedAt, Expr::value(now))
        .filter(employee::Column::Id.eq(employee_id))
        .filter(employee::Column::RemainingQuota.gte(quantity))
        .exec(&txn)
        .await?;

    if decremented.rows_affected == 0 {
        let remaining = reload(&txn, employee_id).await?.remaining_quota;
        // Keep a reset applied above; only the withdrawal is refused.
        txn.commit().await?;
        warn!(
            scan_code = %employee.scan_code,
            remaining, requested = quantity, "Withdrawal refused: insufficient quota"
        );
        return Err(Error::InsufficientQuota {
            remaining,
            requested: quantity,
        });
    }

    let employee = reload(&txn, employee_id).await?;
    let record = transaction::record_withdrawal(
        &txn,
        employee_id,
        quantity,
        employee.remaining_quota,
        now,
    )
    .await?;

    txn.commit().await?;

    info!(
        scan_code = %employee.scan_code,
        quantity,
        remaining = employee.remaining_quota,
        "Gallons taken"
    );

    Ok(Withdrawal {
        employee,
        transaction: record,
    })
}

async fn reload<C>(db: &C, employee_id: i32) -> Result<employee::Model>
where
    C: ConnectionTrait,
{
    Employee::find_by_id(employee_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::EmployeeNotFound {
            identifier: employee_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::transaction::{
        count_transactions_for_employee, get_transactions_for_employee,
    };
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_take_gallons_rejects_non_positive_quantity() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let clock = test_clock();

        for quantity in [0, -3] {
            let result = take_gallons(&db, 1, quantity, &clock).await;
            assert!(matches!(result, Err(Error::Validation { .. })));
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_check_and_reset_noop_within_month() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_employee_with_reset(&db, "TI001", 8, date(2024, 3, 1)).await?;

        let checked = check_and_reset_if_due(&db, employee.clone(), date(2024, 3, 31)).await?;
        assert_eq!(checked, employee);
        Ok(())
    }

    #[tokio::test]
    async fn test_check_and_reset_applies_after_rollover() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_employee_with_reset(&db, "TI001", 3, date(2024, 1, 1)).await?;

        let checked = check_and_reset_if_due(&db, employee.clone(), date(2024, 3, 15)).await?;
        assert_eq!(checked.remaining_quota, policy::DEFAULT_QUOTA);
        assert_eq!(checked.quota_last_reset, date(2024, 3, 1));

        let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        assert_eq!(stored, checked);
        Ok(())
    }

    #[tokio::test]
    async fn test_check_and_reset_with_stale_snapshot_does_not_reset_twice() -> Result<()> {
        let db = setup_test_db().await?;
        let stale = create_employee_with_reset(&db, "TI001", 3, date(2024, 2, 1)).await?;
        let clock = clock_at(2024, 3, 5);

        check_and_reset_if_due(&db, stale.clone(), clock.today()).await?;
        take_gallons(&db, stale.id, 4, &clock).await?;

        // A second caller still holding the February snapshot must not restore the quota
        let checked = check_and_reset_if_due(&db, stale, clock.today()).await?;
        assert_eq!(checked.remaining_quota, 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_take_gallons_success() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "TEST002", 8).await?;
        let clock = test_clock();

        let withdrawal = take_gallons(&db, employee.id, 2, &clock).await?;

        assert_eq!(withdrawal.employee.remaining_quota, 6);
        assert_eq!(withdrawal.transaction.quantity, 2);
        assert_eq!(withdrawal.transaction.remaining_quota_after, 6);
        assert_eq!(withdrawal.transaction.employee_id, employee.id);
        assert_eq!(withdrawal.transaction.taken_at, clock.now());

        let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        assert_eq!(stored.remaining_quota, 6);
        assert_eq!(count_transactions_for_employee(&db, employee.id).await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_take_gallons_each_quantity_up_to_remaining() -> Result<()> {
        let db = setup_test_db().await?;
        let clock = test_clock();

        for quantity in 1..=8 {
            let employee = create_test_employee(&db, &format!("Q{quantity}"), 8).await?;
            let withdrawal = take_gallons(&db, employee.id, quantity, &clock).await?;
            assert_eq!(withdrawal.employee.remaining_quota, 8 - quantity);
            assert_eq!(withdrawal.transaction.remaining_quota_after, 8 - quantity);
            assert_eq!(count_transactions_for_employee(&db, employee.id).await?, 1);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_take_gallons_can_drain_to_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "TI001", 3).await?;
        let clock = test_clock();

        let withdrawal = take_gallons(&db, employee.id, 3, &clock).await?;
        assert_eq!(withdrawal.employee.remaining_quota, 0);

        let result = take_gallons(&db, employee.id, 1, &clock).await;
        assert!(matches!(
            result,
            Err(Error::InsufficientQuota {
                remaining: 0,
                requested: 1
            })
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_take_gallons_insufficient_quota_changes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "TEST003", 2).await?;
        let clock = test_clock();

        let err = take_gallons(&db, employee.id, 5, &clock).await.unwrap_err();
        assert_eq!(err.to_string(), "Insufficient quota. Only 2 gallons remaining.");

        let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        assert_eq!(stored.remaining_quota, 2);
        assert_eq!(count_transactions_for_employee(&db, employee.id).await?, 0);

        // Failing again is idempotent
        assert!(take_gallons(&db, employee.id, 5, &clock).await.is_err());
        let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        assert_eq!(stored.remaining_quota, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_take_gallons_resets_before_checking_quota() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_employee_with_reset(&db, "TI004", 1, date(2024, 1, 1)).await?;
        let clock = clock_at(2024, 3, 15);

        let withdrawal = take_gallons(&db, employee.id, 4, &clock).await?;
        assert_eq!(withdrawal.employee.remaining_quota, 6);
        assert_eq!(withdrawal.employee.quota_last_reset, date(2024, 3, 1));
        assert_eq!(withdrawal.transaction.remaining_quota_after, 6);
        Ok(())
    }

    #[tokio::test]
    async fn test_refused_withdrawal_keeps_reset() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_employee_with_reset(&db, "TI004", 0, date(2024, 2, 1)).await?;
        let clock = clock_at(2024, 3, 2);

        // Quota resets to 10, which is still short of an 11-gallon request
        let result = take_gallons(&db, employee.id, 11, &clock).await;
        assert!(matches!(
            result,
            Err(Error::InsufficientQuota {
                remaining: 10,
                requested: 11
            })
        ));

        let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        assert_eq!(stored.remaining_quota, 10);
        assert_eq!(stored.quota_last_reset, date(2024, 3, 1));
        assert_eq!(count_transactions_for_employee(&db, employee.id).await?, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_take_gallons_unknown_employee() -> Result<()> {
        let db = setup_test_db().await?;
        let result = take_gallons(&db, 999, 1, &test_clock()).await;
        assert!(matches!(result, Err(Error::EmployeeNotFound { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn test_storage_failure_rolls_back_decrement() -> Result<()> {
        let db = setup_test_db().await?;
        let employee = create_test_employee(&db, "TI001", 8).await?;

        // Recording the withdrawal fails after the decrement has run
        db.execute_unprepared("DROP TABLE gallon_transactions")
            .await?;

        let result = take_gallons(&db, employee.id, 2, &test_clock()).await;
        assert!(matches!(result, Err(Error::Database(_))));

        let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        assert_eq!(stored.remaining_quota, 8);
        Ok(())
    }

    /// Spawns one `take_gallons` task per quantity and returns how many succeeded.
    async fn race_withdrawals(
        db: &DatabaseConnection,
        employee_id: i32,
        quantities: &[i32],
        clock: FixedClock,
    ) -> usize {
        let handles: Vec<_> = quantities
            .iter()
            .map(|&quantity| {
                // `DatabaseConnection` is not `Clone` under sea-orm's `mock` feature,
                // so share the underlying pool handle directly.
                let DatabaseConnection::SqlxSqlitePoolConnection(pool) = db else {
                    panic!("race_withdrawals requires a SQLite pool connection");
                };
                let db = DatabaseConnection::SqlxSqlitePoolConnection(pool.clone());
                tokio::spawn(async move { take_gallons(&db, employee_id, quantity, &clock).await })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            // Refusals and lock contention errors are both acceptable outcomes here
            if handle.await.unwrap().is_ok() {
                successes += 1;
            }
        }
        successes
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_withdrawals_cannot_overdraw() -> Result<()> {
        let (_dir, db) = setup_file_test_db(4).await?;
        let clock = test_clock();

        for round in 0..20 {
            let employee = create_test_employee(&db, &format!("RACE{round}"), 10).await?;

            let successes = race_withdrawals(&db, employee.id, &[4, 4, 4, 4], clock).await;
            assert!(successes <= 2, "round {round}: {successes} withdrawals succeeded");

            let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
            let taken = i32::try_from(successes).unwrap() * 4;
            assert_eq!(stored.remaining_quota, 10 - taken);
            assert!(stored.remaining_quota >= 0);

            let history = get_transactions_for_employee(&db, employee.id).await?;
            assert_eq!(history.len(), successes);
            assert!(history.iter().all(|t| t.remaining_quota_after >= 0));
        }
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_withdrawals_at_rollover_reset_once() -> Result<()> {
        let (_dir, db) = setup_file_test_db(4).await?;
        let employee = create_employee_with_reset(&db, "TI001", 0, date(2024, 2, 1)).await?;
        let clock = clock_at(2024, 3, 1);

        let successes = race_withdrawals(&db, employee.id, &[3; 6], clock).await;
        assert!(successes <= 3, "{successes} withdrawals succeeded");

        let stored = Employee::find_by_id(employee.id).one(&db).await?.unwrap();
        if successes > 0 {
            assert_eq!(stored.quota_last_reset, date(2024, 3, 1));
            // A second reset would have restored gallons already taken
            let taken = i32::try_from(successes).unwrap() * 3;
            assert_eq!(stored.remaining_quota, policy::DEFAULT_QUOTA - taken);
        }
        assert_eq!(
            count_transactions_for_employee(&db, employee.id).await?,
            u64::try_from(successes).unwrap()
        );
        Ok(())
    }
}
