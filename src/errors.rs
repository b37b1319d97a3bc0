//! Unified application error type.
//! All modules (db, store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Storage
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Validation
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid import row: {0}")]
    InvalidRow(String),

    #[error("Invalid range: {0}")]
    InvalidRange(String),

    #[error("This operation needs a user: pass --user EMAIL or set default_user")]
    MissingUser,

    // ---------------------------
    // Lookup
    // ---------------------------
    #[error("Expense #{0} not found")]
    NotFound(i64),

    #[error("User #{0} not found")]
    UserNotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),
}

impl AppError {
    /// Errors caused by bad user input. They block the offending operation
    /// and are reported as-is, never treated as storage failures.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::InvalidDate(_)
                | AppError::InvalidAmount(_)
                | AppError::InvalidEmail(_)
                | AppError::InvalidCategory(_)
                | AppError::InvalidRow(_)
                | AppError::InvalidRange(_)
                | AppError::MissingUser
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
