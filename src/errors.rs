//! Unified error type for the quota engine, configuration, and the Discord front end.
//!
//! The `Display` text of [`Error::EmployeeNotFound`] and [`Error::InsufficientQuota`] is the
//! exact message shown to the person at the scan station.

use poise::serenity_prelude as serenity;
use sea_orm::DbErr;
use thiserror::Error;

/// All errors produced by this crate
#[derive(Debug, Error)]
pub enum Error {
    /// No employee matches the given scan code or id
    #[error("Employee not found. Please check the ID and try again.")]
    EmployeeNotFound {
        /// The scan code or numeric id that was looked up
        identifier: String,
    },

    /// The requested withdrawal exceeds the remaining monthly quota
    #[error("Insufficient quota. Only {remaining} gallons remaining.")]
    InsufficientQuota {
        /// Quota left after any pending monthly reset was applied
        remaining: i32,
        /// Quantity the caller asked for
        requested: i32,
    },

    /// Malformed caller input (scan code, name, quota, or quantity)
    #[error("{message}")]
    Validation {
        /// User-facing description of the problem
        message: String,
    },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Storage failure; any open database transaction is rolled back
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or invalid environment variable
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Failure while formatting a reply
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Serenity/Poise framework error
    #[error("Discord framework error: {0}")]
    Framework(Box<serenity::Error>),
}

impl Error {
    /// Builds a [`Error::Validation`] from any message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether this error is an expected outcome the user should simply be told about,
    /// as opposed to an operational failure.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::EmployeeNotFound { .. } | Self::InsufficientQuota { .. } | Self::Validation { .. }
        )
    }
}

impl From<serenity::Error> for Error {
    fn from(value: serenity::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
