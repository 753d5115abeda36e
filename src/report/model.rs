use chrono::NaiveDate;
use serde::Serialize;

use crate::detail::InstitutionDetail;
use crate::directory::InstitutionRecord;
use crate::financials::FinancialSeries;
use crate::sba::LoanStatsReport;

/// Result of the optional loan-statistics stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum LoanStatsOutcome {
    /// No bank name was supplied.
    NotRequested,
    Ready(LoanStatsReport),
    /// The stage failed; the rest of the report is unaffected.
    Failed(String),
}

impl LoanStatsOutcome {
    #[must_use]
    pub const fn stats(&self) -> Option<&LoanStatsReport> {
        match self {
            Self::Ready(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// Everything known about one bank for one query.
///
/// The mandatory parts (institution, locations, detail, financials) are always
/// populated together; a report is never handed out with one of them missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BankReport {
    pub certificate_number: u64,
    pub start_date: NaiveDate,
    pub institution: InstitutionRecord,
    pub location_count: usize,
    pub state_count: usize,
    /// Distinct state names, sorted.
    pub states: Vec<String>,
    pub detail: InstitutionDetail,
    /// Quarterly rows, most recent first. Empty means no data was available.
    pub financials: FinancialSeries,
    pub loan_stats: LoanStatsOutcome,
}
