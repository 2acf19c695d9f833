//! Quota engine - framework-agnostic policy, ledger, transaction log, lookup, and admin CRUD.

/// Time source abstraction
pub mod clock;
/// Employee administration (create, update, delete, get, list)
pub mod employee;
/// Guarded withdrawals and monthly reset application
pub mod ledger;
/// Scan-code lookup and withdrawal orchestration
pub mod lookup;
/// Monthly reset policy
pub mod policy;
/// Append-only withdrawal history
pub mod transaction;
/// Input validation shared by the front ends
pub mod validation;
