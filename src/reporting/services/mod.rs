//! Application services for manager reporting.

mod sales;

pub use sales::{ReportServiceError, ReportServiceResult, SalesReportService};
