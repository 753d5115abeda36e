//! Quarterly call-report metrics from the BankFind financials endpoint.

mod api;
mod model;
mod params;
mod wire;

pub use model::{FinancialMetricRow, FinancialSeries, Quarter};
pub use params::{FinancialMetric, IdKind, quarter_count};
pub(crate) use params::StartDate;

use chrono::NaiveDate;

use crate::{
    BankClient, BankError,
    core::client::{CacheMode, RetryConfig},
};

/// Fetches the quarterly financial series for one institution since `start`.
///
/// Shorthand for `FinancialsBuilder::new(client, federal_reserve_id).start(start).fetch()`.
///
/// # Errors
///
/// Returns [`BankError::InvalidParams`] for a zero identifier or a future start date.
/// Upstream failures degrade to an empty series.
pub async fn fetch_series(
    client: &BankClient,
    federal_reserve_id: u64,
    start: NaiveDate,
) -> Result<FinancialSeries, BankError> {
    FinancialsBuilder::new(client, federal_reserve_id)
        .start(start)
        .fetch()
        .await
}

/// A builder for quarterly financial-metric requests.
///
/// By default the request filters on the RSSD identifier, asks for every
/// [`FinancialMetric`], and sizes the row limit from the start date with
/// [`quarter_count`]. Without a start date only the latest report is requested.
///
/// # Example
///
/// ```no_run
/// # use bankfind_rs::{BankClient, FinancialsBuilder, FinancialMetric};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BankClient::new()?;
/// let series = FinancialsBuilder::new(&client, 451_965)
///     .start_str("2023-01-01")
///     .fetch()
///     .await?;
/// for (date, assets) in series.metric_series(FinancialMetric::TotalAssets) {
///     println!("{date}: {assets}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FinancialsBuilder {
    client: BankClient,
    id: u64,
    id_kind: IdKind,
    start: Option<StartDate>,
    end: Option<NaiveDate>,
    limit: Option<u32>,
    metrics: Vec<FinancialMetric>,
    as_of: Option<NaiveDate>,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl FinancialsBuilder {
    /// Creates a builder keyed on a Federal Reserve RSSD identifier.
    pub fn new(client: &BankClient, federal_reserve_id: u64) -> Self {
        Self {
            client: client.clone(),
            id: federal_reserve_id,
            id_kind: IdKind::Rssd,
            start: None,
            end: None,
            limit: None,
            metrics: FinancialMetric::ALL.to_vec(),
            as_of: None,
            cache_mode: CacheMode::Use,
            retry_override: None,
        }
    }

    /// Filters on an FDIC certificate number instead of the RSSD identifier.
    pub fn by_cert(client: &BankClient, cert: u64) -> Self {
        Self::new(client, cert).id_kind(IdKind::Cert)
    }

    #[must_use]
    pub const fn id_kind(mut self, kind: IdKind) -> Self {
        self.id_kind = kind;
        self
    }

    /// Earliest report date to include.
    #[must_use]
    pub fn start(mut self, date: NaiveDate) -> Self {
        self.start = Some(StartDate::Date(date));
        self
    }

    /// Earliest report date as text (`YYYY-MM-DD`, `YYYYMMDD` or `MM/DD/YYYY`), validated on fetch.
    #[must_use]
    pub fn start_str(mut self, date: impl Into<String>) -> Self {
        self.start = Some(StartDate::Raw(date.into()));
        self
    }

    /// Latest report date to include. Default: unbounded.
    #[must_use]
    pub const fn end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
        self
    }

    /// Overrides the derived row limit.
    #[must_use]
    pub const fn limit(mut self, n: u32) -> Self {
        self.limit = Some(n);
        self
    }

    /// Restricts the request to a subset of metrics.
    #[must_use]
    pub fn metrics(mut self, metrics: impl IntoIterator<Item = FinancialMetric>) -> Self {
        self.metrics = metrics.into_iter().collect();
        self
    }

    /// Date the quarter count is measured from. Default: today (local time).
    #[must_use]
    pub const fn as_of(mut self, today: NaiveDate) -> Self {
        self.as_of = Some(today);
        self
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

    /// Validates the arguments and derives the row limit.
    fn request(&self) -> Result<api::SeriesRequest<'_>, BankError> {
        if self.id == 0 {
            return Err(BankError::InvalidParams(format!(
                "{} must be a positive integer",
                self.id_kind.filter_field()
            )));
        }
        if self.metrics.is_empty() {
            return Err(BankError::InvalidParams("no metrics requested".into()));
        }
        let start = self.start.as_ref().map(StartDate::resolve).transpose()?;
        if let (Some(s), Some(e)) = (start, self.end)
            && s > e
        {
            return Err(BankError::InvalidParams(format!(
                "start date {s} is after end date {e}"
            )));
        }

        let limit = match (self.limit, start) {
            (Some(0), _) => return Err(BankError::InvalidParams("limit must be positive".into())),
            (Some(n), _) => n,
            (None, Some(s)) => {
                let today = self
                    .as_of
                    .unwrap_or_else(|| chrono::Local::now().date_naive());
                quarter_count(today, s)?
            }
            (None, None) => 1,
        };

        Ok(api::SeriesRequest {
            id: self.id,
            id_kind: self.id_kind,
            start,
            end: self.end,
            limit,
            metrics: &self.metrics,
        })
    }

    /// Fetches the series, propagating every failure.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InvalidParams`] for bad arguments and an upstream error when the
    /// request fails or the CSV cannot be decoded.
    #[tracing::instrument(skip(self), err, fields(id = self.id, kind = ?self.id_kind))]
    pub async fn try_fetch(&self) -> Result<FinancialSeries, BankError> {
        let req = self.request()?;
        api::fetch_series(
            &self.client,
            &req,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Fetches the series, degrading upstream failures to an empty series.
    ///
    /// Callers should read an empty series as "no data available". The two causes
    /// (request failed, no rows reported) are logged separately.
    ///
    /// # Errors
    ///
    /// Only argument validation fails: [`BankError::InvalidParams`].
    pub async fn fetch(&self) -> Result<FinancialSeries, BankError> {
        match self.try_fetch().await {
            Ok(series) => {
                if series.is_empty() {
                    tracing::debug!(id = self.id, "financials request returned no rows");
                }
                Ok(series)
            }
            Err(e @ BankError::InvalidParams(_)) => Err(e),
            Err(e) => {
                tracing::warn!(id = self.id, error = %e, "financials request failed; returning empty series");
                Ok(FinancialSeries::default())
            }
        }
    }
}
