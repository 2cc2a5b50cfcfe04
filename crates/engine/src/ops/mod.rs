use std::path::{Path, PathBuf};

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::{EngineError, ResultEngine};

mod expenses;
mod reports;

/// Default location of the expenses database, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "expenses.db";

/// Run a block against a fresh connection, closing it once the block is done.
///
/// The connection is migrated before use, so every operation starts from an
/// initialized schema.
macro_rules! with_connection {
    ($self:expr, |$db:ident| $body:expr) => {{
        let $db = $self.connect().await?;
        let result = async {
            let value: ResultEngine<_> = { $body };
            value
        }
        .await;
        $db.close().await?;
        result
    }};
}

pub(crate) use with_connection;

/// Entry point for storage and reporting.
///
/// Holds only the location of the database: no connection outlives the call
/// that opened it.
#[derive(Debug, Clone)]
pub struct Engine {
    path: PathBuf,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Path of the SQLite file backing this engine.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.path.display())
    }

    async fn connect(&self) -> ResultEngine<DatabaseConnection> {
        tracing::debug!("opening database {}", self.path.display());
        let db = Database::connect(self.database_url()).await?;
        Migrator::up(&db, None).await?;
        Ok(db)
    }
}

fn validate_category(value: &str) -> ResultEngine<()> {
    if value.trim().is_empty() {
        return Err(EngineError::InvalidCategory(
            "category must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_amount(value: f64) -> ResultEngine<()> {
    if !value.is_finite() {
        return Err(EngineError::InvalidAmount(format!(
            "{value} is not a finite number"
        )));
    }
    Ok(())
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    path: Option<PathBuf>,
}

impl EngineBuilder {
    /// Pass the path of the SQLite file, created on first use.
    pub fn database(mut self, path: impl Into<PathBuf>) -> EngineBuilder {
        self.path = Some(path.into());
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            path: self
                .path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH)),
        }
    }
}
