use chrono::NaiveDate;

use crate::{Period, ResultEngine, Summary, today};

use super::Engine;

impl Engine {
    /// Summarize the expenses of `period`, counting back from today.
    pub async fn report(&self, period: Period) -> ResultEngine<Summary> {
        self.report_at(period, today()).await
    }

    /// Summarize the expenses of `period`, counting back from `today`.
    ///
    /// Fails with [`EngineError::DataIntegrity`] when a stored date cannot be
    /// parsed, whichever window is requested.
    ///
    /// [`EngineError::DataIntegrity`]: crate::EngineError::DataIntegrity
    pub async fn report_at(&self, period: Period, today: NaiveDate) -> ResultEngine<Summary> {
        let expenses = self.expenses().await?;
        let summary = Summary::fold(period, &expenses, today);
        tracing::debug!(
            "{period} report over {} of {} expenses",
            summary.count,
            expenses.len()
        );
        Ok(summary)
    }
}
