//! SBA 7(a) loan approvals, cross-referenced to banks and summarised per fiscal year.

mod api;
mod dataset;
mod model;
mod stats;
mod wire;

pub use dataset::LoanDataset;
pub use model::{
    ChartPoint, LoanCharts, LoanRecord, LoanStatsReport, MatchKind, MatchStrategy, NameMatch,
    Vintage, YearlyLoanStats, normalize_name,
};
pub use stats::{median, yearly_stats};

use crate::{
    BankClient, BankError,
    core::client::{CacheMode, RetryConfig},
};

/// A builder for loading the SBA loan extracts configured on the client.
pub struct SbaBuilder {
    client: BankClient,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl SbaBuilder {
    /// Creates a new `SbaBuilder`.
    pub fn new(client: &BankClient) -> Self {
        Self {
            client: client.clone(),
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Sets the cache mode for this specific API call.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for this specific API call.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Downloads both extracts and merges them, historical slice first.
    ///
    /// # Errors
    ///
    /// Returns an upstream error if either download fails or a CSV cannot be decoded.
    #[tracing::instrument(skip(self), err)]
    pub async fn load(&self) -> Result<LoanDataset, BankError> {
        api::load_dataset(&self.client, self.cache_mode, self.retry_override.as_ref()).await
    }

    /// Loads the extracts and computes yearly stats for one bank.
    ///
    /// # Errors
    ///
    /// Any load error, or the errors of [`LoanDataset::yearly_stats`].
    pub async fn yearly_stats(&self, fdic_number: u64, bank_name: &str) -> Result<LoanStatsReport, BankError> {
        self.load().await?.yearly_stats(fdic_number, bank_name)
    }
}
