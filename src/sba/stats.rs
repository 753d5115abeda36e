use std::collections::BTreeMap;

use super::model::{ChartPoint, LoanCharts, LoanRecord, YearlyLoanStats};

const UNDER_500K: u64 = 500_000;
const UNDER_100K: u64 = 100_000;

/// Median of `values`; the mean of the two middle values for an even count.
///
/// Sorts `values` in place. Returns `0.0` for an empty slice.
#[allow(clippy::cast_precision_loss)]
pub fn median(values: &mut [u64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    } else {
        values[mid] as f64
    }
}

#[allow(clippy::cast_precision_loss)]
fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Groups records by approval fiscal year and aggregates gross approvals.
///
/// Years come out ascending; a year appears only when it has at least one record.
#[allow(clippy::cast_precision_loss)]
pub fn yearly_stats<'a>(records: impl IntoIterator<Item = &'a LoanRecord>) -> Vec<YearlyLoanStats> {
    let mut by_year: BTreeMap<i32, (Vec<u64>, u64)> = BTreeMap::new();
    for rec in records {
        let entry = by_year.entry(rec.approval_fiscal_year).or_default();
        entry.0.push(rec.gross_approval);
        entry.1 = entry.1.saturating_add(rec.sba_guaranteed_approval);
    }

    by_year
        .into_iter()
        .map(|(year, (mut amounts, guaranteed))| {
            let count = amounts.len();
            let total: u64 = amounts.iter().fold(0u64, |acc, &a| acc.saturating_add(a));
            let under_500k = amounts.iter().filter(|&&a| a < UNDER_500K).count();
            let under_100k = amounts.iter().filter(|&&a| a < UNDER_100K).count();
            YearlyLoanStats {
                year,
                total_loan_volume: total,
                loan_count: count,
                average_loan_size: total as f64 / count as f64,
                median_loan_size: median(&mut amounts),
                percent_under_500k: percent(under_500k, count),
                percent_under_100k: percent(under_100k, count),
                total_sba_guaranteed: guaranteed,
            }
        })
        .collect()
}

impl LoanCharts {
    /// Projects yearly stats into the four `{year, value}` series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_stats(stats: &[YearlyLoanStats]) -> Self {
        let series = |f: fn(&YearlyLoanStats) -> f64| -> Vec<ChartPoint> {
            stats
                .iter()
                .map(|s| ChartPoint {
                    year: s.year,
                    value: f(s),
                })
                .collect()
        };
        Self {
            total_volume: series(|s| s.total_loan_volume as f64),
            loan_count: series(|s| s.loan_count as f64),
            average_size: series(|s| s.average_loan_size),
            median_size: series(|s| s.median_loan_size),
        }
    }
}
