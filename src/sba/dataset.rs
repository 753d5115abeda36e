use super::model::{LoanCharts, LoanRecord, LoanStatsReport, MatchStrategy, NameMatch};
use super::stats::yearly_stats;
use crate::core::BankError;

/// The merged SBA 7(a) extracts: the historical fiscal-year slice followed by the recent extract.
///
/// Loaded once, then queried for as many banks as needed.
#[derive(Debug, Clone, Default)]
pub struct LoanDataset {
    records: Vec<LoanRecord>,
    dropped_rows: usize,
}

impl LoanDataset {
    /// Wraps records already in merge order.
    #[must_use]
    pub fn from_records(records: Vec<LoanRecord>) -> Self {
        Self::with_dropped(records, 0)
    }

    pub(crate) fn with_dropped(records: Vec<LoanRecord>, dropped_rows: usize) -> Self {
        Self {
            records,
            dropped_rows,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[LoanRecord] {
        &self.records
    }

    /// Rows discarded while loading because their fiscal year was unreadable.
    #[must_use]
    pub const fn dropped_rows(&self) -> usize {
        self.dropped_rows
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records satisfying `strategy`, in dataset order.
    #[must_use]
    pub fn filter(&self, strategy: &MatchStrategy) -> Vec<&LoanRecord> {
        self.records.iter().filter(|r| strategy.matches(r)).collect()
    }

    /// Tries each strategy in turn and returns the first non-empty match.
    fn first_match<'s>(
        &self,
        strategies: impl IntoIterator<Item = &'s MatchStrategy>,
    ) -> Option<(&'s MatchStrategy, Vec<&LoanRecord>)> {
        strategies.into_iter().find_map(|s| {
            let hits = self.filter(s);
            (!hits.is_empty()).then_some((s, hits))
        })
    }

    /// Yearly loan statistics for a bank, matched by FDIC number with an exact-name fallback.
    ///
    /// # Errors
    ///
    /// See [`LoanDataset::yearly_stats_matching`].
    pub fn yearly_stats(&self, fdic_number: u64, bank_name: &str) -> Result<LoanStatsReport, BankError> {
        self.yearly_stats_matching(fdic_number, bank_name, NameMatch::Exact)
    }

    /// Yearly loan statistics for a bank.
    ///
    /// Records are selected by `BankFDICNumber == fdic_number`; when that matches nothing,
    /// by `BankName` compared with `name_match`. A zero number or blank name skips that step.
    /// Dataset names are trimmed on load, so `bank_name` is trimmed before comparing.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InvalidParams`] when both the number and the name are missing,
    /// and [`BankError::NotFound`] when neither strategy matches a record.
    pub fn yearly_stats_matching(
        &self,
        fdic_number: u64,
        bank_name: &str,
        name_match: NameMatch,
    ) -> Result<LoanStatsReport, BankError> {
        let mut strategies = Vec::with_capacity(2);
        if fdic_number != 0 {
            strategies.push(MatchStrategy::FdicNumber(fdic_number));
        }
        let bank_name = bank_name.trim();
        if !bank_name.is_empty() {
            strategies.push(MatchStrategy::Name {
                name: bank_name.to_string(),
                mode: name_match,
            });
        }
        if strategies.is_empty() {
            return Err(BankError::InvalidParams(
                "a certificate number or bank name is required".into(),
            ));
        }

        let (strategy, hits) = self.first_match(&strategies).ok_or_else(|| {
            BankError::NotFound(format!(
                "no SBA loans for certificate {fdic_number} or bank name {bank_name:?}"
            ))
        })?;

        let resolved_bank_name = hits[0].bank_name.clone();
        tracing::debug!(
            matched_by = ?strategy.kind(),
            loans = hits.len(),
            bank = %resolved_bank_name,
            "loan records selected"
        );

        let yearly = yearly_stats(hits);
        let charts = LoanCharts::from_stats(&yearly);
        Ok(LoanStatsReport {
            resolved_bank_name,
            matched_by: strategy.kind(),
            yearly,
            charts,
        })
    }
}
