//! The module contains the `Expense` type and the `expenses` table model.
use core::fmt;

use chrono::NaiveDate;
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// A single recorded expenditure.
///
/// The row identifier is a storage detail and is not carried here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(amount: f64, category: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            category: category.into(),
            date,
        }
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.amount, self.category, self.date)
    }
}

impl TryFrom<Model> for Expense {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let date = model.date.parse::<NaiveDate>().map_err(|_| {
            EngineError::DataIntegrity(format!(
                "expense {} has an invalid date: \"{}\"",
                model.id, model.date
            ))
        })?;
        Ok(Self {
            amount: model.amount,
            category: model.category,
            date,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub category: String,
    pub date: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Expense> for ActiveModel {
    fn from(expense: &Expense) -> Self {
        Self {
            id: ActiveValue::NotSet,
            amount: ActiveValue::Set(expense.amount),
            category: ActiveValue::Set(expense.category.clone()),
            date: ActiveValue::Set(expense.date.to_string()),
        }
    }
}
