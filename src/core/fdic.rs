//! Shared request plumbing for the BankFind endpoints.

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use url::Url;

use crate::core::{
    BankClient, BankError,
    client::{CacheMode, RetryConfig},
    net,
    wire::FdicEnvelope,
};

/// One BankFind query, minus the paging window.
#[derive(Debug, Clone)]
pub(crate) struct FdicQuery<'a> {
    pub(crate) endpoint: &'a str,
    pub(crate) filters: Option<String>,
    pub(crate) fields: Option<String>,
    pub(crate) sort_by: Option<&'a str>,
    pub(crate) sort_order: Option<&'a str>,
    pub(crate) format: Option<&'a str>,
}

impl<'a> FdicQuery<'a> {
    pub(crate) const fn new(endpoint: &'a str) -> Self {
        Self {
            endpoint,
            filters: None,
            fields: None,
            sort_by: None,
            sort_order: None,
            format: None,
        }
    }

    pub(crate) fn filters(mut self, f: impl Into<String>) -> Self {
        self.filters = Some(f.into());
        self
    }

    pub(crate) fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.join(","));
        self
    }

    pub(crate) const fn sort(mut self, by: &'a str, order: &'a str) -> Self {
        self.sort_by = Some(by);
        self.sort_order = Some(order);
        self
    }

    pub(crate) const fn format(mut self, format: &'a str) -> Self {
        self.format = Some(format);
        self
    }

    pub(crate) fn url(&self, client: &BankClient, limit: u32, offset: u64) -> Result<Url, BankError> {
        let mut url = client.base_fdic().join(self.endpoint)?;
        {
            let mut qp = url.query_pairs_mut();
            if let Some(f) = &self.filters {
                qp.append_pair("filters", f);
            }
            if let Some(f) = &self.fields {
                qp.append_pair("fields", f);
            }
            if let Some(s) = self.sort_by {
                qp.append_pair("sort_by", s);
            }
            if let Some(o) = self.sort_order {
                qp.append_pair("sort_order", o);
            }
            qp.append_pair("limit", &limit.to_string());
            qp.append_pair("offset", &offset.to_string());
            if let Some(fmt) = self.format {
                qp.append_pair("format", fmt);
            }
        }
        Ok(url)
    }
}

/// Fetches a single JSON page and decodes the `data[].data` envelope.
pub(crate) async fn fetch_page<T: DeserializeOwned>(
    client: &BankClient,
    query: &FdicQuery<'_>,
    limit: u32,
    offset: u64,
    key: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<FdicEnvelope<T>, BankError> {
    let url = query.url(client, limit, offset)?;
    let endpoint = if offset == 0 {
        query.endpoint.to_string()
    } else {
        format!("{}_{offset}", query.endpoint)
    };
    let body = net::fetch_text(client, &url, &endpoint, key, "json", cache_mode, retry_override).await?;
    serde_json::from_str(&body).map_err(BankError::Json)
}

/// Pages through a JSON listing until `meta.total` rows (or a short page) have been read.
///
/// Once the first page reports a total, the remaining pages are requested concurrently
/// and stitched back together in offset order.
pub(crate) async fn fetch_all<T: DeserializeOwned>(
    client: &BankClient,
    query: &FdicQuery<'_>,
    key: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Vec<T>, BankError> {
    let limit = client.page_size();
    let stride = u64::from(limit);

    let first: FdicEnvelope<T> =
        fetch_page(client, query, limit, 0, key, cache_mode, retry_override).await?;
    let total = first.meta.as_ref().and_then(|m| m.total);
    let mut offset = first.data.len() as u64;
    let mut out: Vec<T> = first.data.into_iter().map(|item| item.data).collect();

    if offset == stride {
        match total {
            Some(total) => {
                let offsets = (1..).map(|i| i * stride).take_while(|&o| o < total);
                let pages = try_join_all(offsets.map(|o| {
                    fetch_page::<T>(client, query, limit, o, key, cache_mode, retry_override)
                }))
                .await?;
                for page in pages {
                    out.extend(page.data.into_iter().map(|item| item.data));
                }
            }
            None => loop {
                let page: FdicEnvelope<T> =
                    fetch_page(client, query, limit, offset, key, cache_mode, retry_override)
                        .await?;
                let got = page.data.len() as u64;
                out.extend(page.data.into_iter().map(|item| item.data));
                offset += got;
                if got < stride {
                    break;
                }
            },
        }
    }

    if let Some(total) = total
        && out.len() as u64 != total
    {
        tracing::debug!(endpoint = query.endpoint, total, rows = out.len(), "listing size differs from meta.total");
    }
    tracing::debug!(endpoint = query.endpoint, rows = out.len(), "listing complete");
    Ok(out)
}
