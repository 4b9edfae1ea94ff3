//! Unified application error type.
//! All modules (db, core, cli, config) return AppError to keep the error
//! handling consistent. Validators never return AppError: a bad token is a
//! `Rejection`, recovered by re-prompting.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// File system failure on the database side (its directory or file).
    #[error("Storage I/O error: {0}")]
    Storage(io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("Entry #{0} not found")]
    NotFound(i64),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,
}

impl AppError {
    /// Storage failures end the session; everything else is reported and survived.
    /// Console I/O (`Io`) is not storage.
    pub fn is_storage(&self) -> bool {
        matches!(self, AppError::Storage(_) | AppError::Db(_))
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// A user-entered token that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct Rejection {
    pub reason: String,
}

impl Rejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
