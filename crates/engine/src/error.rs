//! The module contains the errors the engine can throw.
//!
//! The errors are:
//!
//! - [`Storage`] thrown when the database cannot be opened, migrated or written.
//! - [`DataIntegrity`] thrown when a stored row cannot be read back as an [`Expense`].
//! - [`InvalidAmount`] and [`InvalidCategory`] thrown when a new expense is rejected.
//!
//!  [`Storage`]: EngineError::Storage
//!  [`DataIntegrity`]: EngineError::DataIntegrity
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidCategory`]: EngineError::InvalidCategory
//!  [`Expense`]: super::Expense
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Storage error: {0}")]
    Storage(#[from] DbErr),
    #[error("Corrupted data: {0}")]
    DataIntegrity(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Storage(a), Self::Storage(b)) => a.to_string() == b.to_string(),
            (Self::DataIntegrity(a), Self::DataIntegrity(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            _ => false,
        }
    }
}

/// Returned when a string is not one of the known [`Period`] names.
///
/// [`Period`]: super::Period
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown period \"{0}\", expected one of daily, weekly, monthly, all")]
pub struct ParsePeriodError(pub String);
