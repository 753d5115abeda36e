//! Composes the directory, location, detail, financial and loan lookups into one report.

mod assemble;
mod model;

pub use model::{BankReport, LoanStatsOutcome};

use chrono::NaiveDate;

use crate::{
    BankClient, BankError,
    core::client::{CacheMode, RetryConfig},
    directory::InstitutionDirectory,
    financials::StartDate,
    sba::{LoanDataset, NameMatch},
};

/// Builds a [`BankReport`] for a certificate number and start date.
///
/// Shorthand for [`ReportBuilder`] with default settings.
///
/// # Errors
///
/// See [`ReportBuilder::fetch`].
pub async fn assemble(
    client: &BankClient,
    cert: u64,
    start: NaiveDate,
    bank_name: Option<&str>,
) -> Result<BankReport, BankError> {
    let mut builder = ReportBuilder::new(client, cert, start);
    if let Some(name) = bank_name {
        builder = builder.bank_name(name);
    }
    builder.fetch().await
}

/// A builder for one bank report.
///
/// The directory lookup, location listing and history detail are fetched concurrently;
/// the financial series follows once the Federal Reserve ID is known. Loan statistics
/// are computed only when a bank name is supplied, and their failure never aborts the
/// report.
///
/// # Example
///
/// ```no_run
/// # use bankfind_rs::{BankClient, ReportBuilder};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BankClient::new()?;
/// let report = ReportBuilder::with_start_str(&client, 3511, "2023-01-01")
///     .bank_name("Wells Fargo Bank, National Association")
///     .fetch()
///     .await?;
/// println!("{} has {} branches in {} states", report.institution.name,
///     report.location_count, report.state_count);
/// # Ok(())
/// # }
/// ```
pub struct ReportBuilder<'a> {
    client: BankClient,
    cert: u64,
    start: StartDate,
    bank_name: Option<String>,
    name_match: NameMatch,
    directory: Option<&'a InstitutionDirectory>,
    loans: Option<&'a LoanDataset>,
    as_of: Option<NaiveDate>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a new `ReportBuilder`.
    pub fn new(client: &BankClient, cert: u64, start: NaiveDate) -> Self {
        Self::with_start(client, cert, StartDate::Date(start))
    }

    /// Creates a builder from a textual start date, validated on fetch.
    pub fn with_start_str(client: &BankClient, cert: u64, start: impl Into<String>) -> Self {
        Self::with_start(client, cert, StartDate::Raw(start.into()))
    }

    fn with_start(client: &BankClient, cert: u64, start: StartDate) -> Self {
        Self {
            client: client.clone(),
            cert,
            start,
            bank_name: None,
            name_match: NameMatch::Exact,
            directory: None,
            loans: None,
            as_of: None,
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Requests SBA loan statistics, falling back to this name when the certificate has no loans.
    #[must_use]
    pub fn bank_name(mut self, name: impl Into<String>) -> Self {
        self.bank_name = Some(name.into());
        self
    }

    /// How the fallback bank name is compared. Default: [`NameMatch::Exact`].
    #[must_use]
    pub const fn name_match(mut self, mode: NameMatch) -> Self {
        self.name_match = mode;
        self
    }

    /// Resolves the institution from an already-loaded directory instead of fetching.
    #[must_use]
    pub const fn directory(mut self, directory: &'a InstitutionDirectory) -> Self {
        self.directory = Some(directory);
        self
    }

    /// Computes loan statistics from an already-loaded dataset instead of downloading.
    #[must_use]
    pub const fn loan_dataset(mut self, loans: &'a LoanDataset) -> Self {
        self.loans = Some(loans);
        self
    }

    /// Date the quarter count is measured from. Default: today (local time).
    #[must_use]
    pub const fn as_of(mut self, today: NaiveDate) -> Self {
        self.as_of = Some(today);
        self
    }

    /// Sets the cache mode for every request made by this report.
    #[must_use]
    pub const fn cache_mode(mut self, mode: CacheMode) -> Self {
        self.cache_mode = mode;
        self
    }

    /// Overrides the default retry policy for every request made by this report.
    #[must_use]
    pub fn retry_policy(mut self, cfg: Option<RetryConfig>) -> Self {
        self.retry_override = cfg;
        self
    }

    /// Assembles the report.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InvalidParams`] for a zero certificate or a malformed/future start
    /// date, [`BankError::NotFound`] when the certificate is not in the directory, and any
    /// upstream error from the directory, location or detail lookups. Financial-series and
    /// loan-statistics failures do not fail the report.
    #[tracing::instrument(skip(self), err, fields(cert = self.cert))]
    pub async fn fetch(&self) -> Result<BankReport, BankError> {
        let start = self.start.resolve()?;
        let plan = assemble::Plan {
            client: &self.client,
            cert: self.cert,
            start,
            today: self
                .as_of
                .unwrap_or_else(|| chrono::Local::now().date_naive()),
            bank_name: self.bank_name.as_deref(),
            name_match: self.name_match,
            directory: self.directory,
            loans: self.loans,
            cache_mode: self.cache_mode,
            retry_override: self.retry_override.as_ref(),
        };
        assemble::assemble(plan).await
    }
}
