//! Employee entity - The quota-bearing ledger for one employee.
//!
//! Each employee is identified internally by a numeric `id` and externally by a
//! unique `scan_code` printed on their badge (e.g. `"TI001"`). The ledger columns
//! are `remaining_quota` and `quota_last_reset`, which is always the first day of a month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Employee database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    /// Unique numeric identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Badge/barcode identifier used at the scan station
    #[sea_orm(unique)]
    pub scan_code: String,
    /// Display name
    pub name: String,
    /// Gallons still available this month (0..=50)
    pub remaining_quota: i32,
    /// First day of the month in which the quota was last reset
    pub quota_last_reset: Date,
    /// When the employee was registered
    pub created_at: DateTimeUtc,
    /// When the employee was last modified
    pub updated_at: DateTimeUtc,
}

/// Defines relationships between Employee and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One employee has many gallon transactions
    #[sea_orm(has_many = "super::gallon_transaction::Entity")]
    GallonTransactions,
}

impl Related<super::gallon_transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GallonTransactions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
