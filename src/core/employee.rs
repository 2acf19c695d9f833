//! Employee administration - registering, editing, removing, and listing employees.
//!
//! Every read that exposes a quota runs the monthly reset first, so administrators
//! never see last month's balance.

use crate::{
    core::{clock::Clock, ledger, policy, transaction, validation},
    entities::{Employee, GallonTransaction, employee, gallon_transaction},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use tracing::{info, instrument};

/// Employees shown per admin list page.
pub const EMPLOYEES_PER_PAGE: u64 = 20;
/// Maximum scan codes returned for autocomplete.
pub const MAX_SCAN_CODE_SUGGESTIONS: u64 = 25;

/// Input for registering a new employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEmployee {
    /// Badge scan code; must be unique
    pub scan_code: String,
    /// Display name
    pub name: String,
    /// Starting quota; defaults to [`policy::DEFAULT_QUOTA`]
    pub remaining_quota: Option<i32>,
}

/// Full replacement of an employee's editable fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeUpdate {
    /// Badge scan code; must stay unique
    pub scan_code: String,
    /// Display name
    pub name: String,
    /// Quota to set, overriding the current balance
    pub remaining_quota: i32,
}

/// An employee together with their most recent withdrawals.
#[derive(Debug, Clone)]
pub struct EmployeeDetails {
    /// Current ledger state
    pub employee: employee::Model,
    /// Up to ten most recent transactions, newest first
    pub recent_transactions: Vec<gallon_transaction::Model>,
    /// Total number of transactions on record
    pub transaction_count: u64,
}

/// One page of the admin employee listing.
#[derive(Debug, Clone)]
pub struct EmployeePage {
    /// Employees on this page, most recently registered first
    pub employees: Vec<employee::Model>,
    /// 1-based page number
    pub page: u64,
    /// Number of pages available
    pub total_pages: u64,
    /// Number of employees overall
    pub total: u64,
}

/// Finds an employee by exact scan code without applying the monthly reset.
pub async fn get_employee_by_scan_code(
    db: &DatabaseConnection,
    scan_code: &str,
) -> Result<Option<employee::Model>> {
    Employee::find()
        .filter(employee::Column::ScanCode.eq(scan_code))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a new employee with the current month as their reset date.
#[instrument(skip(db, clock))]
pub async fn create_employee(
    db: &DatabaseConnection,
    new_employee: NewEmployee,
    clock: &dyn Clock,
) -> Result<employee::Model> {
    let scan_code = validation::validate_scan_code(&new_employee.scan_code)?;
    let name = validation::validate_name(&new_employee.name)?;
    let remaining_quota = validation::validate_quota(
        new_employee
            .remaining_quota
            .unwrap_or(policy::DEFAULT_QUOTA),
    )?;

    if get_employee_by_scan_code(db, &scan_code).await?.is_some() {
        return Err(Error::validation("This Employee ID is already registered."));
    }

    let now = clock.now();
    let model = employee::ActiveModel {
        scan_code: Set(scan_code),
        name: Set(name),
        remaining_quota: Set(remaining_quota),
        quota_last_reset: Set(policy::first_of_month(clock.today())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = model.insert(db).await?;
    info!(employee_id = created.id, scan_code = %created.scan_code, "Employee created");
    Ok(created)
}

/// Replaces an employee's scan code, name, and quota.
#[instrument(skip(db, clock))]
pub async fn update_employee(
    db: &DatabaseConnection,
    employee_id: i32,
    update: EmployeeUpdate,
    clock: &dyn Clock,
) -> Result<employee::Model> {
    let scan_code = validation::validate_scan_code(&update.scan_code)?;
    let name = validation::validate_name(&update.name)?;
    let remaining_quota = validation::validate_quota(update.remaining_quota)?;

    let existing = find_by_id(db, employee_id).await?;

    let taken = Employee::find()
        .filter(employee::Column::ScanCode.eq(scan_code.as_str()))
        .filter(employee::Column::Id.ne(employee_id))
        .one(db)
        .await?;
    if taken.is_some() {
        return Err(Error::validation(
            "This Employee ID is already registered to another employee.",
        ));
    }

    let mut model: employee::ActiveModel = existing.into();
    model.scan_code = Set(scan_code);
    model.name = Set(name);
    model.remaining_quota = Set(remaining_quota);
    model.updated_at = Set(clock.now());

    let updated = model.update(db).await?;
    info!(employee_id, "Employee updated");
    Ok(updated)
}

/// Deletes an employee together with their whole transaction history.
#[instrument(skip(db))]
pub async fn delete_employee(db: &DatabaseConnection, employee_id: i32) -> Result<employee::Model> {
    let txn = db.begin().await?;

    let existing = find_by_id(&txn, employee_id).await?;

    let removed = GallonTransaction::delete_many()
        .filter(gallon_transaction::Column::EmployeeId.eq(employee_id))
        .exec(&txn)
        .await?;
    Employee::delete_by_id(employee_id).exec(&txn).await?;

    txn.commit().await?;

    info!(
        employee_id,
        scan_code = %existing.scan_code,
        transactions_removed = removed.rows_affected,
        "Employee deleted"
    );
    Ok(existing)
}

/// Retrieves an employee by id, applying any due monthly reset.
pub async fn get_employee(
    db: &DatabaseConnection,
    employee_id: i32,
    clock: &dyn Clock,
) -> Result<employee::Model> {
    let existing = find_by_id(db, employee_id).await?;
    ledger::check_and_reset_if_due(db, existing, clock.today()).await
}

/// Retrieves an employee by id along with their last ten withdrawals.
pub async fn get_employee_details(
    db: &DatabaseConnection,
    employee_id: i32,
    clock: &dyn Clock,
) -> Result<EmployeeDetails> {
    let employee = get_employee(db, employee_id, clock).await?;
    let recent_transactions =
        transaction::get_recent_transactions(db, employee_id, transaction::RECENT_TRANSACTION_LIMIT)
            .await?;
    let transaction_count = transaction::count_transactions_for_employee(db, employee_id).await?;

    Ok(EmployeeDetails {
        employee,
        recent_transactions,
        transaction_count,
    })
}

/// Lists employees, newest first, [`EMPLOYEES_PER_PAGE`] per page.
///
/// `page` is 1-based; 0 is treated as 1. Pages past the end are empty.
pub async fn list_employees(
    db: &DatabaseConnection,
    page: u64,
    clock: &dyn Clock,
) -> Result<EmployeePage> {
    let page = page.max(1);
    let paginator = Employee::find()
        .order_by_desc(employee::Column::CreatedAt)
        .order_by_desc(employee::Column::Id)
        .paginate(db, EMPLOYEES_PER_PAGE);

    let totals = paginator.num_items_and_pages().await?;
    let fetched = paginator.fetch_page(page - 1).await?;

    let today = clock.today();
    let mut employees = Vec::with_capacity(fetched.len());
    for model in fetched {
        employees.push(ledger::check_and_reset_if_due(db, model, today).await?);
    }

    Ok(EmployeePage {
        employees,
        page,
        total_pages: totals.number_of_pages,
        total: totals.number_of_items,
    })
}

/// Suggests scan codes starting with `partial`, sorted alphabetically.
pub async fn suggest_scan_codes(db: &DatabaseConnection, partial: &str) -> Result<Vec<String>> {
    let employees = Employee::find()
        .filter(employee::Column::ScanCode.starts_with(partial.trim()))
        .order_by_asc(employee::Column::ScanCode)
        .limit(MAX_SCAN_CODE_SUGGESTIONS)
        .all(db)
        .await?;

    Ok(employees.into_iter().map(|e| e.scan_code).collect())
}

/// Registers every employee whose scan code is not yet known. Returns how many were added.
#[instrument(skip_all, fields(count = seeds.len()))]
pub async fn seed_employees(
    db: &DatabaseConnection,
    seeds: Vec<NewEmployee>,
    clock: &dyn Clock,
) -> Result<usize> {
    let mut created = 0;
    for seed in seeds {
        if get_employee_by_scan_code(db, seed.scan_code.trim())
            .await?
            .is_some()
        {
            continue;
        }
        create_employee(db, seed, clock).await?;
        created += 1;
    }
    Ok(created)
}

async fn find_by_id<C>(db: &C, employee_id: i32) -> Result<employee::Model>
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
