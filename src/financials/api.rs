use chrono::NaiveDate;

use super::model::FinancialSeries;
use super::params::{FinancialMetric, IdKind};
use super::wire::parse_financials_csv;
use crate::core::{
    BankClient, BankError,
    client::{CacheMode, RetryConfig},
    fdic::FdicQuery,
    net,
};

/// A fully validated financials request.
pub(crate) struct SeriesRequest<'a> {
    pub(crate) id: u64,
    pub(crate) id_kind: IdKind,
    pub(crate) start: Option<NaiveDate>,
    pub(crate) end: Option<NaiveDate>,
    pub(crate) limit: u32,
    pub(crate) metrics: &'a [FinancialMetric],
}

fn filters(req: &SeriesRequest<'_>) -> String {
    let mut f = format!("{}:{}", req.id_kind.filter_field(), req.id);
    if let Some(start) = req.start {
        let end = req
            .end
            .map_or_else(|| "*".to_string(), |d| d.format("%Y%m%d").to_string());
        f.push_str(&format!(" AND REPDTE:[{} TO {end}]", start.format("%Y%m%d")));
    }
    f
}

pub(super) async fn fetch_series(
    client: &BankClient,
    req: &SeriesRequest<'_>,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<FinancialSeries, BankError> {
    let mut fields: Vec<&str> = vec!["RSSDID", "REPDTE"];
    fields.extend(req.metrics.iter().map(|m| m.code()));

    let q = FdicQuery::new("financials")
        .filters(filters(req))
        .fields(&fields)
        .sort("REPDTE", "DESC")
        .format("csv");
    let url = q.url(client, req.limit, 0)?;

    let key = format!("{}-{}", req.id_kind.filter_field(), req.id);
    let body = net::fetch_text(client, &url, "financials", &key, "csv", cache_mode, retry_override)
        .await?;

    let rows = parse_financials_csv(&body)?;
    Ok(FinancialSeries::new(rows))
}
