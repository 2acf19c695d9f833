//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Employee administration commands
pub mod employee;

/// General utility commands
pub mod general;

/// Scan station commands
pub mod scan;

// Export commands
pub use employee::*;
pub use general::*;
pub use scan::*;
