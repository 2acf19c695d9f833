//! Gallon transaction entity - Immutable audit record of one withdrawal.
//!
//! `remaining_quota_after` is a snapshot of the employee's quota right after the
//! withdrawal was applied. It is never recomputed.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Gallon transaction database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "gallon_transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i32,
    /// ID of the employee who took the gallons
    pub employee_id: i32,
    /// Number of gallons taken (at least 1)
    pub quantity: i32,
    /// Employee's remaining quota immediately after this withdrawal
    pub remaining_quota_after: i32,
    /// When the gallons were taken
    pub taken_at: DateTimeUtc,
    /// When the row was written
    pub created_at: DateTimeUtc,
}

/// Defines relationships between `GallonTransaction` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one employee
    #[sea_orm(
        belongs_to = "super::employee::Entity",
        from = "Column::EmployeeId",
        to = "super::employee::Column::Id",
        on_delete = "Cascade"
    )]
    Employee,
}

impl Related<super::employee::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employee.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
