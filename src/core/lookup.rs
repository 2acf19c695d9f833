//! Scan station operations: look an employee up by scan code, then withdraw gallons.
//!
//! These are two separate calls. A front end shows the [`LedgerView`] returned by [`lookup`]
//! and later calls [`withdraw`] with the employee's numeric id.

use crate::{
    core::{clock::Clock, employee, ledger, validation},
    entities::{employee as employee_entity, gallon_transaction},
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::{debug, instrument};

/// What a scan station displays about an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    /// Numeric employee id, used for the follow-up withdrawal
    pub id: i32,
    /// Badge scan code
    pub scan_code: String,
    /// Display name
    pub name: String,
    /// Gallons left this month
    pub remaining_quota: i32,
}

impl From<&employee_entity::Model> for LedgerView {
    fn from(model: &employee_entity::Model) -> Self {
        Self {
            id: model.id,
            scan_code: model.scan_code.clone(),
            name: model.name.clone(),
            remaining_quota: model.remaining_quota,
        }
    }
}

/// A completed withdrawal as reported back to the scan station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithdrawalOutcome {
    /// Ledger state after the withdrawal
    pub view: LedgerView,
    /// History row written for the withdrawal
    pub transaction: gallon_transaction::Model,
}

impl WithdrawalOutcome {
    /// Confirmation shown after a successful withdrawal.
    #[must_use]
    pub fn success_message(&self) -> String {
        format!(
            "Successfully taken {} gallon(s). Remaining quota: {}",
            self.transaction.quantity, self.view.remaining_quota
        )
    }
}

/// Resolves a scan code to the employee's current ledger, applying any due monthly reset.
///
/// Matching is exact. An unknown code yields [`Error::EmployeeNotFound`].
#[instrument(skip(db, clock))]
pub async fn lookup(
    db: &DatabaseConnection,
    scan_code: &str,
    clock: &dyn Clock,
) -> Result<LedgerView> {
    let scan_code = validation::validate_scan_code(scan_code)?;

    let Some(found) = employee::get_employee_by_scan_code(db, &scan_code).await? else {
        debug!("No employee for scan code");
        return Err(Error::EmployeeNotFound {
            identifier: scan_code,
        });
    };

    let current = ledger::check_and_reset_if_due(db, found, clock.today()).await?;
    Ok(LedgerView::from(&current))
}

/// Withdraws `quantity` gallons (1..=10) for the employee with the given numeric id.
#[instrument(skip(db, clock))]
pub async fn withdraw(
    db: &DatabaseConnection,
    employee_id: i32,
    quantity: i32,
    clock: &dyn Clock,
) -> Result<WithdrawalOutcome> {
    let quantity = validation::validate_quantity(quantity)?;
    let withdrawal = ledger::take_gallons(db, employee_id, quantity, clock).await?;

    Ok(WithdrawalOutcome {
        view: LedgerView::from(&withdrawal.employee),
        transaction: withdrawal.transaction,
    })
}
