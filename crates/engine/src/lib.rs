//! Storage and reporting for personal expenses.
//!
//! [`Engine`] appends expenses to a single SQLite table and folds them into a
//! [`Summary`] for a reporting [`Period`].
use chrono::{Local, NaiveDate};

pub use error::{EngineError, ParsePeriodError};
pub use expenses::Expense;
pub use ops::{DEFAULT_DATABASE_PATH, Engine, EngineBuilder};
pub use period::Period;
pub use summary::Summary;

mod error;
mod expenses;
mod ops;
mod period;
mod summary;

type ResultEngine<T> = Result<T, EngineError>;

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
