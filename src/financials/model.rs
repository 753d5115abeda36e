use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::ser::{Serialize, SerializeMap, Serializer};

use super::params::FinancialMetric;

/// A calendar quarter, e.g. `2024Q1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Quarter {
    pub year: i32,
    /// 1 through 4.
    pub quarter: u8,
}

impl Quarter {
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        let q = date.month0() / 3 + 1;
        Self {
            year: date.year(),
            // month0 is below 12, so q is at most 4.
            quarter: u8::try_from(q).unwrap_or(4),
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

/// One quarter-end report for one institution, keyed by business metric name.
///
/// Raw BankFind codes never surface: values are addressed through [`FinancialMetric`],
/// and serialization emits only `FederalReserveID`, `ReportDate` and business names.
#[derive(Debug, Clone, PartialEq)]
pub struct FinancialMetricRow {
    pub federal_reserve_id: u64,
    pub report_date: NaiveDate,
    pub(crate) values: BTreeMap<FinancialMetric, Option<f64>>,
}

impl FinancialMetricRow {
    /// Builds a row from already-named values.
    #[must_use]
    pub fn new(
        federal_reserve_id: u64,
        report_date: NaiveDate,
        values: impl IntoIterator<Item = (FinancialMetric, Option<f64>)>,
    ) -> Self {
        Self {
            federal_reserve_id,
            report_date,
            values: values.into_iter().collect(),
        }
    }

    /// The value of `metric`; `None` when the metric was not requested or was blank.
    #[must_use]
    pub fn get(&self, metric: FinancialMetric) -> Option<f64> {
        self.values.get(&metric).copied().flatten()
    }

    /// Metrics present on this row (requested columns), blank or not.
    pub fn metrics(&self) -> impl Iterator<Item = FinancialMetric> + '_ {
        self.values.keys().copied()
    }

    #[must_use]
    pub fn quarter(&self) -> Quarter {
        Quarter::from_date(self.report_date)
    }

    /// Every key this row serializes under, in output order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&'static str> {
        let mut cols = vec!["FederalReserveID", "ReportDate"];
        cols.extend(self.values.keys().map(|m| m.business_name()));
        cols
    }
}

impl Serialize for FinancialMetricRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 2))?;
        map.serialize_entry("FederalReserveID", &self.federal_reserve_id)?;
        map.serialize_entry("ReportDate", &self.report_date)?;
        for (metric, value) in &self.values {
            map.serialize_entry(metric.business_name(), value)?;
        }
        map.end()
    }
}

/// Quarterly rows for one institution, most recent first (the order BankFind returns).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct FinancialSeries {
    rows: Vec<FinancialMetricRow>,
}

impl FinancialSeries {
    #[must_use]
    pub fn new(rows: Vec<FinancialMetricRow>) -> Self {
        Self { rows }
    }

    /// Rows in source order (report date descending).
    #[must_use]
    pub fn rows(&self) -> &[FinancialMetricRow] {
        &self.rows
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<FinancialMetricRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The most recent report.
    #[must_use]
    pub fn latest(&self) -> Option<&FinancialMetricRow> {
        self.rows.iter().max_by_key(|r| r.report_date)
    }

    /// Rows ordered oldest first.
    #[must_use]
    pub fn chronological(&self) -> Vec<&FinancialMetricRow> {
        let mut out: Vec<&FinancialMetricRow> = self.rows.iter().collect();
        out.sort_by_key(|r| r.report_date);
        out
    }

    /// Distinct quarters covered, most recent first.
    #[must_use]
    pub fn quarters(&self) -> Vec<Quarter> {
        let mut qs: Vec<Quarter> = self.rows.iter().map(FinancialMetricRow::quarter).collect();
        qs.sort_unstable_by(|a, b| b.cmp(a));
        qs.dedup();
        qs
    }

    /// Rows reported within `quarter`.
    #[must_use]
    pub fn for_quarter(&self, quarter: Quarter) -> Vec<&FinancialMetricRow> {
        self.rows.iter().filter(|r| r.quarter() == quarter).collect()
    }

    /// `(report_date, value)` pairs for one metric, oldest first, skipping blanks.
    #[must_use]
    pub fn metric_series(&self, metric: FinancialMetric) -> Vec<(NaiveDate, f64)> {
        self.chronological()
            .into_iter()
            .filter_map(|r| r.get(metric).map(|v| (r.report_date, v)))
            .collect()
    }
}
