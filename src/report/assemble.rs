use chrono::NaiveDate;

use super::model::{BankReport, LoanStatsOutcome};
use crate::{
    BankClient, BankError,
    core::client::{CacheMode, RetryConfig},
    detail::{DetailBuilder, InstitutionDetail},
    directory::{DirectoryBuilder, InstitutionDirectory, InstitutionRecord},
    financials::{FinancialSeries, FinancialsBuilder, quarter_count},
    locations::{Locations, LocationsBuilder},
    sba::{LoanDataset, LoanStatsReport, NameMatch, SbaBuilder},
};

/// Borrowed inputs for one assembly run.
pub(super) struct Plan<'a> {
    pub(super) client: &'a BankClient,
    pub(super) cert: u64,
    pub(super) start: NaiveDate,
    pub(super) today: NaiveDate,
    pub(super) bank_name: Option<&'a str>,
    pub(super) name_match: NameMatch,
    pub(super) directory: Option<&'a InstitutionDirectory>,
    pub(super) loans: Option<&'a LoanDataset>,
    pub(super) cache_mode: CacheMode,
    pub(super) retry_override: Option<&'a RetryConfig>,
}

impl Plan<'_> {
    async fn institution(&self) -> Result<InstitutionRecord, BankError> {
        if let Some(dir) = self.directory {
            return dir.resolve(self.cert).cloned();
        }
        DirectoryBuilder::new(self.client)
            .cache_mode(self.cache_mode)
            .retry_policy(self.retry_override.cloned())
            .lookup(self.cert)
            .await?
            .resolve(self.cert)
            .cloned()
    }

    async fn locations(&self) -> Result<Locations, BankError> {
        LocationsBuilder::new(self.client, self.cert)
            .cache_mode(self.cache_mode)
            .retry_policy(self.retry_override.cloned())
            .fetch()
            .await
    }

    async fn detail(&self) -> Result<InstitutionDetail, BankError> {
        DetailBuilder::new(self.client, self.cert)
            .cache_mode(self.cache_mode)
            .retry_policy(self.retry_override.cloned())
            .fetch()
            .await
    }

    async fn financials(&self, federal_reserve_id: u64) -> Result<FinancialSeries, BankError> {
        FinancialsBuilder::new(self.client, federal_reserve_id)
            .start(self.start)
            .as_of(self.today)
            .cache_mode(self.cache_mode)
            .retry_policy(self.retry_override.cloned())
            .fetch()
            .await
    }

    async fn loan_stats(&self, bank_name: &str) -> Result<LoanStatsReport, BankError> {
        match self.loans {
            Some(ds) => ds.yearly_stats_matching(self.cert, bank_name, self.name_match),
            None => SbaBuilder::new(self.client)
                .cache_mode(self.cache_mode)
                .retry_policy(self.retry_override.cloned())
                .load()
                .await?
                .yearly_stats_matching(self.cert, bank_name, self.name_match),
        }
    }
}

pub(super) async fn assemble(plan: Plan<'_>) -> Result<BankReport, BankError> {
    if plan.cert == 0 {
        return Err(BankError::InvalidParams(
            "certificate number must be a positive integer".into(),
        ));
    }
    // Reject a future start before any request goes out.
    quarter_count(plan.today, plan.start)?;

    let (institution, locations, detail) =
        tokio::try_join!(plan.institution(), plan.locations(), plan.detail())?;

    let financials = plan.financials(institution.federal_reserve_id).await?;

    let loan_stats = match plan.bank_name.filter(|n| !n.trim().is_empty()) {
        None => LoanStatsOutcome::NotRequested,
        Some(name) => match plan.loan_stats(name).await {
            Ok(stats) => LoanStatsOutcome::Ready(stats),
            Err(e) => {
                tracing::warn!(cert = plan.cert, bank = name, error = %e, "loan statistics unavailable");
                LoanStatsOutcome::Failed(e.to_string())
            }
        },
    };

    Ok(BankReport {
        certificate_number: plan.cert,
        start_date: plan.start,
        location_count: locations.location_count(),
        state_count: locations.state_count(),
        states: locations.states().into_iter().map(str::to_string).collect(),
        institution,
        detail,
        financials,
        loan_stats,
    })
}
