//! Daily sales report generation.

use crate::order::ports::{OrderRepository, OrderRepositoryError};
use crate::reporting::domain::DailySalesSummary;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for report generation.
#[derive(Debug, Error)]
pub enum ReportServiceError {
    /// The date is not a valid `YYYY-MM-DD` calendar date.
    #[error("invalid report date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
    /// Order repository operation failed.
    #[error(transparent)]
    Repository(#[from] OrderRepositoryError),
}

/// Result type for report generation.
pub type ReportServiceResult<T> = Result<T, ReportServiceError>;

/// Sales reporting service for the manager role.
#[derive(Clone)]
pub struct SalesReportService<O>
where
    O: OrderRepository,
{
    orders: Arc<O>,
    top_items: usize,
}

impl<O> SalesReportService<O>
where
    O: OrderRepository,
{
    /// Creates a report service listing up to `top_items` best sellers.
    #[must_use]
    pub const fn new(orders: Arc<O>, top_items: usize) -> Self {
        Self { orders, top_items }
    }

    /// Builds the sales summary for a `YYYY-MM-DD` date string.
    ///
    /// # Errors
    ///
    /// Returns [`ReportServiceError::InvalidDate`] for malformed dates and
    /// repository errors.
    pub async fn daily_sales_summary(&self, date: &str) -> ReportServiceResult<DailySalesSummary> {
        let day = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| ReportServiceError::InvalidDate(date.to_owned()))?;
        self.summary_for(day).await
    }

    /// Builds the sales summary for a calendar day (UTC).
    ///
    /// # Errors
    ///
    /// Returns [`ReportServiceError::InvalidDate`] for days at the end of
    /// the supported calendar range and repository errors.
    pub async fn summary_for(&self, day: NaiveDate) -> ReportServiceResult<DailySalesSummary> {
        let invalid = || ReportServiceError::InvalidDate(day.to_string());
        let start = day.and_hms_opt(0, 0, 0).ok_or_else(invalid)?.and_utc();
        let end = day
            .succ_opt()
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .ok_or_else(invalid)?
            .and_utc();

        let orders = self.orders.list_created_between(start, end).await?;
        let summary = DailySalesSummary::from_orders(day, &orders, self.top_items);
        debug!(
            %day,
            orders = summary.order_count,
            revenue = %summary.total_revenue,
            "daily sales summary built"
        );
        Ok(summary)
    }
}
