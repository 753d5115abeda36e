use serde::Serialize;

/// Which extract a loan record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Vintage {
    /// The fixed historical extract, restricted to one fiscal year.
    Historical,
    /// The rolling recent-years extract.
    Recent,
}

/// One SBA 7(a) loan approval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoanRecord {
    /// Lender's FDIC certificate number; often missing in the historical extract.
    pub bank_fdic_number: Option<u64>,
    pub bank_name: String,
    pub approval_fiscal_year: i32,
    /// Gross approved amount in whole dollars; blank or malformed amounts are zero.
    pub gross_approval: u64,
    /// SBA-guaranteed portion in whole dollars; blank or malformed amounts are zero.
    pub sba_guaranteed_approval: u64,
    pub borrower_name: String,
    pub borrower_state: String,
    pub vintage: Vintage,
}

/// How a bank name is compared against the extract's `BankName` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    /// Case-sensitive, byte-for-byte equality.
    #[default]
    Exact,
    /// Case-folded, punctuation stripped, whitespace collapsed.
    Normalized,
}

/// The single predicate loan records are filtered with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchStrategy {
    /// `BankFDICNumber` equals the certificate number.
    FdicNumber(u64),
    /// `BankName` equals the name under the given comparison.
    Name { name: String, mode: NameMatch },
}

impl MatchStrategy {
    #[must_use]
    pub fn matches(&self, rec: &LoanRecord) -> bool {
        match self {
            Self::FdicNumber(n) => rec.bank_fdic_number == Some(*n),
            Self::Name {
                name,
                mode: NameMatch::Exact,
            } => rec.bank_name == *name,
            Self::Name {
                name,
                mode: NameMatch::Normalized,
            } => normalize_name(&rec.bank_name) == normalize_name(name),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> MatchKind {
        match self {
            Self::FdicNumber(_) => MatchKind::FdicNumber,
            Self::Name { .. } => MatchKind::Name,
        }
    }
}

/// Which strategy produced a bank's loan records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchKind {
    FdicNumber,
    Name,
}

/// Lowercases, turns punctuation into spaces and collapses runs of whitespace.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect();
    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Aggregate loan statistics for one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyLoanStats {
    pub year: i32,
    /// Sum of gross approvals.
    pub total_loan_volume: u64,
    pub loan_count: usize,
    pub average_loan_size: f64,
    pub median_loan_size: f64,
    /// Share of loans with gross approval below 500 000, as a percentage.
    pub percent_under_500k: f64,
    /// Share of loans with gross approval below 100 000, as a percentage.
    pub percent_under_100k: f64,
    /// Sum of SBA-guaranteed amounts.
    pub total_sba_guaranteed: u64,
}

/// A single `{year, value}` chart point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub year: i32,
    pub value: f64,
}

/// Chart-ready series derived from yearly stats, one point per year in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoanCharts {
    pub total_volume: Vec<ChartPoint>,
    pub loan_count: Vec<ChartPoint>,
    pub average_size: Vec<ChartPoint>,
    pub median_size: Vec<ChartPoint>,
}

/// Loan statistics for one bank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanStatsReport {
    /// `BankName` of the first matched record.
    pub resolved_bank_name: String,
    pub matched_by: MatchKind,
    /// One entry per fiscal year present, ascending.
    pub yearly: Vec<YearlyLoanStats>,
    pub charts: LoanCharts,
}
