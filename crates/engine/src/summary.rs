use std::{collections::BTreeMap, ops};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Expense, Period};

/// Aggregated view of the expenses that fall in one [`Period`].
///
/// Field order is the serialization order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub period: Period,
    /// Number of expenses registered, not part of the report.
    #[serde(skip)]
    pub count: usize,
    pub total: f64,
    pub by_category: BTreeMap<String, f64>,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl Summary {
    /// A summary with nothing registered yet.
    pub fn empty(period: Period) -> Self {
        Self {
            period,
            count: 0,
            total: 0.0,
            by_category: BTreeMap::new(),
            first_date: None,
            last_date: None,
        }
    }

    /// Filter `expenses` through the window of `period` as seen from `today`
    /// and fold what remains.
    pub fn fold<'e, I>(period: Period, expenses: I, today: NaiveDate) -> Self
    where
        I: IntoIterator<Item = &'e Expense>,
    {
        expenses
            .into_iter()
            .filter(|expense| period.contains(expense.date, today))
            .fold(Self::empty(period), |mut summary, expense| {
                summary += expense;
                summary
            })
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl ops::AddAssign<&Expense> for Summary {
    fn add_assign(&mut self, expense: &Expense) {
        self.count += 1;
        self.total += expense.amount;
        *self
            .by_category
            .entry(expense.category.clone())
            .or_insert(0.0) += expense.amount;
        self.first_date = Some(
            self.first_date
                .map_or(expense.date, |first| first.min(expense.date)),
        );
        self.last_date = Some(
            self.last_date
                .map_or(expense.date, |last| last.max(expense.date)),
        );
    }
}
