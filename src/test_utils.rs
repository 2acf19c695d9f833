//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test employees with sensible defaults.

#![allow(clippy::unwrap_used)]

use crate::{
    core::{
        clock::{Clock, FixedClock},
        employee::{self, NewEmployee},
    },
    entities,
    errors::Result,
};
use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{ActiveModelTrait, ConnectOptions, DatabaseConnection, Set};
use tempfile::TempDir;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a file-backed `SQLite` database in a fresh temporary directory with a pool of
/// `max_connections`, so concurrent tests get real contention between connections.
/// Keep the returned `TempDir` alive for as long as the database is used.
pub async fn setup_file_test_db(max_connections: u32) -> Result<(TempDir, DatabaseConnection)> {
    let dir = tempfile::tempdir()?;
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("gallon_quota.sqlite").display()
    );
    let mut options = ConnectOptions::new(url);
    options.max_connections(max_connections).min_connections(1);

    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok((dir, db))
}

/// Shorthand for a calendar date.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Clock frozen at noon UTC on the given day.
pub fn clock_at(year: i32, month: u32, day: u32) -> FixedClock {
    FixedClock::new(Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap())
}

/// Default clock for tests: 2024-03-15 12:00 UTC.
pub fn test_clock() -> FixedClock {
    clock_at(2024, 3, 15)
}

/// Registers a test employee named "Test Employee" through the normal create path,
/// with the reset date set to the month of [`test_clock`].
pub async fn create_test_employee(
    db: &DatabaseConnection,
    scan_code: &str,
    remaining_quota: i32,
) -> Result<entities::employee::Model> {
    employee::create_employee(
        db,
        NewEmployee {
            scan_code: scan_code.to_string(),
            name: "Test Employee".to_string(),
            remaining_quota: Some(remaining_quota),
        },
        &test_clock(),
    )
    .await
}

/// Inserts an employee with an arbitrary reset date, bypassing validation.
/// Use this to simulate ledgers last touched in an earlier month.
pub async fn create_employee_with_reset(
    db: &DatabaseConnection,
    scan_code: &str,
    remaining_quota: i32,
    quota_last_reset: NaiveDate,
) -> Result<entities::employee::Model> {
    let now = test_clock().now();
    let model = entities::employee::ActiveModel {
        scan_code: Set(scan_code.to_string()),
        name: Set("Test Employee".to_string()),
        remaining_quota: Set(remaining_quota),
        quota_last_reset: Set(quota_last_reset),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Sets up a complete test environment with one employee holding the default quota.
/// Returns (db, employee) for common test scenarios.
pub async fn setup_with_employee() -> Result<(DatabaseConnection, entities::employee::Model)> {
    let db = setup_test_db().await?;
    let employee = create_test_employee(&db, "TI001", 10).await?;
    Ok((db, employee))
}
