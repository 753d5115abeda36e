use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::core::{BankError, wire::parse_fdic_date};

/// A start date as supplied: already typed, or text validated when the request is built.
#[derive(Debug, Clone)]
pub(crate) enum StartDate {
    Date(NaiveDate),
    Raw(String),
}

impl StartDate {
    pub(crate) fn resolve(&self) -> Result<NaiveDate, BankError> {
        match self {
            Self::Date(d) => Ok(*d),
            Self::Raw(s) => parse_fdic_date(s)
                .ok_or_else(|| BankError::InvalidParams(format!("start date {s:?} is not a date"))),
        }
    }
}

/// A call-report metric requested from the financials endpoint.
///
/// Each variant knows its raw BankFind code and the business name it is reported under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum FinancialMetric {
    NoOfEmployees,
    NetIncome,
    NetInterestMargin,
    TotalAssets,
    Aum,
    EffectiveEfficiencyRatio,
    TotalDeposits,
    NetLoanLeases,
    InterestIncome,
    YieldOnEarningAssets,
    ReturnOnAssets,
    ReturnOnEquity,
    NetLoanAndLeasesToDeposits,
    NetLoanAndLeasesToCoreDeposits,
}

impl FinancialMetric {
    /// Every metric, in request order.
    pub const ALL: [Self; 14] = [
        Self::NoOfEmployees,
        Self::NetIncome,
        Self::NetInterestMargin,
        Self::TotalAssets,
        Self::Aum,
        Self::EffectiveEfficiencyRatio,
        Self::TotalDeposits,
        Self::NetLoanLeases,
        Self::InterestIncome,
        Self::YieldOnEarningAssets,
        Self::ReturnOnAssets,
        Self::ReturnOnEquity,
        Self::NetLoanAndLeasesToDeposits,
        Self::NetLoanAndLeasesToCoreDeposits,
    ];

    /// The raw BankFind field code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NoOfEmployees => "NUMEMP",
            Self::NetIncome => "NETINC",
            Self::NetInterestMargin => "NIMY",
            Self::TotalAssets => "ASSET",
            Self::Aum => "TFRA",
            Self::EffectiveEfficiencyRatio => "EEFFR",
            Self::TotalDeposits => "DEPDOM",
            Self::NetLoanLeases => "LNLSNET",
            Self::InterestIncome => "INTINC",
            Self::YieldOnEarningAssets => "INTINCY",
            Self::ReturnOnAssets => "ROA",
            Self::ReturnOnEquity => "ROE",
            Self::NetLoanAndLeasesToDeposits => "LNLSDEPR",
            Self::NetLoanAndLeasesToCoreDeposits => "IDLNCORR",
        }
    }

    /// The name the metric is reported under.
    #[must_use]
    pub const fn business_name(self) -> &'static str {
        match self {
            Self::NoOfEmployees => "No_Of_Employees",
            Self::NetIncome => "Net_Income",
            Self::NetInterestMargin => "Net_Interest_Margin",
            Self::TotalAssets => "Total_Assets",
            Self::Aum => "AUM",
            Self::EffectiveEfficiencyRatio => "Effective_Efficiency_Ratio",
            Self::TotalDeposits => "Total_Deposits",
            Self::NetLoanLeases => "Net_Loan_Leases",
            Self::InterestIncome => "Interest_Income",
            Self::YieldOnEarningAssets => "Yield_On_Earning_Assets",
            Self::ReturnOnAssets => "Return_On_Assets",
            Self::ReturnOnEquity => "Return_On_Equity",
            Self::NetLoanAndLeasesToDeposits => "Net_Loan_And_Leases_to_Deposits",
            Self::NetLoanAndLeasesToCoreDeposits => "Net_Loan_And_Leases_to_Core_Deposits",
        }
    }

    /// Looks a metric up by its raw code (case-insensitive).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for FinancialMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.business_name())
    }
}

/// Which identifier the financials filter keys on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdKind {
    /// Federal Reserve RSSD identifier (`RSSDID`).
    #[default]
    Rssd,
    /// FDIC certificate number (`CERT`).
    Cert,
}

impl IdKind {
    pub(crate) const fn filter_field(self) -> &'static str {
        match self {
            Self::Rssd => "RSSDID",
            Self::Cert => "CERT",
        }
    }
}

/// Number of quarterly reports needed to reach back from `today` to `start`, inclusive.
///
/// Computed as `((today.year - start.year) * 12 + (today.month - start.month)) div 3 + 1`,
/// so the quarter containing `start` is always covered.
///
/// # Errors
///
/// Returns [`BankError::InvalidParams`] when `start` lies in a later month than `today`.
pub fn quarter_count(today: NaiveDate, start: NaiveDate) -> Result<u32, BankError> {
    let months = (i64::from(today.year()) - i64::from(start.year())) * 12
        + (i64::from(today.month()) - i64::from(start.month()));
    let count = months.div_euclid(3) + 1;
    if count < 1 {
        return Err(BankError::InvalidParams(format!(
            "start date {start} is after {today}"
        )));
    }
    u32::try_from(count)
        .map_err(|_| BankError::InvalidParams(format!("start date {start} is too far back")))
}
