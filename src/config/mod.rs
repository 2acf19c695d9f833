/// Database configuration and connection management
pub mod database;

/// Seed employee configuration loading from config.toml
pub mod employees;
