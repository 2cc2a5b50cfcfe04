use std::collections::BTreeMap;

use chrono::NaiveDate;
use sea_orm::{QueryOrder, QuerySelect, prelude::*, sea_query::Expr};

use crate::{Expense, ResultEngine, expenses, today};

use super::{Engine, validate_amount, validate_category, with_connection};

impl Engine {
    /// Make sure the `expenses` table exists.
    ///
    /// Idempotent. Every other operation does it on its own, calling this is
    /// only useful to create an empty database.
    pub async fn initialize(&self) -> ResultEngine<()> {
        with_connection!(self, |_db| Ok(()))
    }

    /// Append an expense, dated today when `date` is `None`.
    ///
    /// Returns the stored record.
    pub async fn add_expense(
        &self,
        amount: f64,
        category: &str,
        date: Option<NaiveDate>,
    ) -> ResultEngine<Expense> {
        validate_amount(amount)?;
        validate_category(category)?;
        let expense = Expense::new(amount, category, date.unwrap_or_else(today));

        with_connection!(self, |db| {
            let model = expenses::ActiveModel::from(&expense).insert(&db).await?;
            tracing::debug!("stored expense {} ({expense})", model.id);
            Ok(expense)
        })
    }

    /// Every stored expense, oldest identifier first.
    pub async fn expenses(&self) -> ResultEngine<Vec<Expense>> {
        with_connection!(self, |db| {
            let models = expenses::Entity::find()
                .order_by_asc(expenses::Column::Id)
                .all(&db)
                .await?;
            models.into_iter().map(Expense::try_from).collect()
        })
    }

    /// Sum of the amounts of every stored expense, grouped by category.
    ///
    /// Aggregation runs in the database; categories without expenses are absent.
    pub async fn totals_by_category(&self) -> ResultEngine<BTreeMap<String, f64>> {
        with_connection!(self, |db| {
            let rows: Vec<(String, f64)> = expenses::Entity::find()
                .select_only()
                .column(expenses::Column::Category)
                .column_as(Expr::col(expenses::Column::Amount).sum(), "total")
                .group_by(expenses::Column::Category)
                .into_tuple()
                .all(&db)
                .await?;
            Ok(rows.into_iter().collect())
        })
    }
}
