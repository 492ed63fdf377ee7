//! Monthly report DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Period;
use infra_db::SummaryRow;

use crate::error::ApiError;

/// Query string for the monthly report endpoints
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ReportQuery {
    pub year: i32,
    pub month: u32,
}

impl ReportQuery {
    /// Validates and converts into a reporting period
    pub fn period(&self) -> Result<Period, ApiError> {
        Period::new(self.year, self.month).map_err(|e| ApiError::BadRequest(e.to_string()))
    }
}

/// Expected-vs-paid totals for one month
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummaryResponse {
    pub period: String,
    pub expected: Decimal,
    pub paid: Decimal,
    pub count: i64,
}

impl PeriodSummaryResponse {
    pub fn new(period: Period, row: SummaryRow) -> Self {
        Self {
            period: period.to_string(),
            expected: row.expected,
            paid: row.paid,
            count: row.count,
        }
    }
}

/// Per-group totals for one month (coverage type or payment method)
#[derive(Debug, Clone, Serialize)]
pub struct GroupedSummaryResponse {
    pub period: String,
    pub groups: Vec<SummaryGroup>,
}

/// One group's totals
#[derive(Debug, Clone, Serialize)]
pub struct SummaryGroup {
    pub key: String,
    pub expected: Decimal,
    pub paid: Decimal,
    pub count: i64,
}

impl GroupedSummaryResponse {
    pub fn new(period: Period, rows: Vec<SummaryRow>) -> Self {
        Self {
            period: period.to_string(),
            groups: rows
                .into_iter()
                .map(|row| SummaryGroup {
                    key: row.key,
                    expected: row.expected,
                    paid: row.paid,
                    count: row.count,
                })
                .collect(),
        }
    }
}
