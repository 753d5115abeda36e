//! Public client surface + builder.
//! Internals are split into `retry` (backoff/cache policy) and `constants` (UA + defaults).

mod constants;
mod retry;

pub use retry::{Backoff, CacheMode, RetryConfig};

use crate::core::BankError;
use constants::{
    DEFAULT_BASE_FDIC, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PAGE_SIZE, DEFAULT_SBA_HISTORICAL,
    DEFAULT_SBA_HISTORICAL_YEAR, DEFAULT_SBA_RECENT, USER_AGENT,
};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use url::Url;

#[derive(Debug)]
struct CacheEntry {
    body: Arc<str>,
    expires_at: Instant,
}

#[derive(Debug)]
struct CacheStore {
    map: RwLock<HashMap<String, CacheEntry>>,
    default_ttl: Duration,
}

/// Shared handle to the FDIC BankFind API and the SBA loan extracts.
///
/// Cloning is cheap; clones share the HTTP connection pool and the response cache.
#[derive(Debug, Clone)]
pub struct BankClient {
    http: Client,
    base_fdic: Url,
    sba_historical_url: Url,
    sba_recent_url: Url,
    sba_historical_year: i32,
    page_size: u32,
    retry: RetryConfig,

    cache: Option<Arc<CacheStore>>,
}

impl BankClient {
    /// Create a new builder.
    pub fn builder() -> BankClientBuilder {
        BankClientBuilder::default()
    }

    /// Builds a client with every default.
    ///
    /// # Errors
    ///
    /// Fails only if the TLS backend cannot be initialised.
    pub fn new() -> Result<Self, BankError> {
        Self::builder().build()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn base_fdic(&self) -> &Url {
        &self.base_fdic
    }
    pub(crate) fn sba_historical_url(&self) -> &Url {
        &self.sba_historical_url
    }
    pub(crate) fn sba_recent_url(&self) -> &Url {
        &self.sba_recent_url
    }
    pub(crate) const fn sba_historical_year(&self) -> i32 {
        self.sba_historical_year
    }
    pub(crate) const fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Drops every cached response. A no-op when caching is disabled.
    pub async fn clear_cache(&self) {
        if let Some(store) = &self.cache {
            store.map.write().await.clear();
        }
    }

    pub(crate) async fn cache_get(&self, url: &Url) -> Option<Arc<str>> {
        let store = self.cache.as_ref()?;
        let guard = store.map.read().await;
        if let Some(entry) = guard.get(url.as_str())
            && Instant::now() <= entry.expires_at
        {
            return Some(entry.body.clone());
        }
        None
    }

    pub(crate) async fn cache_put(&self, url: &Url, body: Arc<str>, ttl_override: Option<Duration>) {
        let store = match &self.cache {
            Some(s) => s.clone(),
            None => return,
        };
        let ttl = ttl_override.unwrap_or(store.default_ttl);
        let entry = CacheEntry {
            body,
            expires_at: Instant::now() + ttl,
        };
        let mut guard = store.map.write().await;
        guard.insert(url.as_str().to_string(), entry);
    }

    /// Sends a GET for `url`, retrying according to `retry_override` (or the client policy).
    ///
    /// The final response is returned whatever its status; callers map non-2xx themselves.
    pub(crate) async fn send_with_retry(
        &self,
        url: &Url,
        retry_override: Option<&RetryConfig>,
    ) -> Result<reqwest::Response, BankError> {
        let cfg = retry_override.unwrap_or(&self.retry);
        let mut attempt: u32 = 0;
        loop {
            let can_retry = cfg.enabled && attempt < cfg.max_retries;
            match self.http.get(url.clone()).send().await {
                Ok(resp) => {
                    let status = resp.status().as_u16();
                    if can_retry && cfg.should_retry_status(status) {
                        tracing::debug!(%url, status, attempt, "retrying after status");
                    } else {
                        return Ok(resp);
                    }
                }
                Err(e) => {
                    if can_retry && cfg.should_retry_error(&e) {
                        tracing::debug!(%url, error = %e, attempt, "retrying after transport error");
                    } else {
                        return Err(BankError::Http(e));
                    }
                }
            }
            tokio::time::sleep(cfg.backoff.delay(attempt)).await;
            attempt += 1;
        }
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct BankClientBuilder {
    user_agent: Option<String>,
    base_fdic: Option<Url>,
    sba_historical_url: Option<Url>,
    sba_recent_url: Option<Url>,
    sba_historical_year: Option<i32>,
    page_size: Option<u32>,
    retry: Option<RetryConfig>,

    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    cache_ttl: Option<Duration>,
}

impl BankClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the BankFind API root (e.g., `https://banks.data.fdic.gov/api/`).
    ///
    /// A trailing slash is appended when missing so endpoint names join beneath it.
    #[must_use]
    pub fn base_fdic(mut self, url: Url) -> Self {
        self.base_fdic = Some(url);
        self
    }

    /// Override the historical SBA 7(a) extract URL.
    #[must_use]
    pub fn sba_historical_url(mut self, url: Url) -> Self {
        self.sba_historical_url = Some(url);
        self
    }

    /// Override the rolling recent-years SBA 7(a) extract URL.
    #[must_use]
    pub fn sba_recent_url(mut self, url: Url) -> Self {
        self.sba_recent_url = Some(url);
        self
    }

    /// Fiscal year kept from the historical extract. Default: 2019.
    #[must_use]
    pub const fn sba_historical_year(mut self, year: i32) -> Self {
        self.sba_historical_year = Some(year);
        self
    }

    /// Rows requested per BankFind page. Default: 10 000.
    #[must_use]
    pub const fn page_size(mut self, n: u32) -> Self {
        self.page_size = Some(n);
        self
    }

    /// Replace the default retry policy.
    #[must_use]
    pub fn retry_config(mut self, cfg: RetryConfig) -> Self {
        self.retry = Some(cfg);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: 10 seconds.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Enable in-memory caching with a default TTL.
    /// If not set, caching is disabled.
    #[must_use]
    pub const fn cache_ttl(mut self, dur: Duration) -> Self {
        self.cache_ttl = Some(dur);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Returns an error if a default URL fails to parse, the page size is zero,
    /// or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<BankClient, BankError> {
        let base_fdic = with_trailing_slash(match self.base_fdic {
            Some(u) => u,
            None => Url::parse(DEFAULT_BASE_FDIC)?,
        });
        let sba_historical_url = match self.sba_historical_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_SBA_HISTORICAL)?,
        };
        let sba_recent_url = match self.sba_recent_url {
            Some(u) => u,
            None => Url::parse(DEFAULT_SBA_RECENT)?,
        };

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(BankError::InvalidParams("page_size must be positive".into()));
        }

        let mut httpb = reqwest::Client::builder()
            .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT))
            .connect_timeout(
                self.connect_timeout
                    .unwrap_or(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)),
            );

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }

        let http = httpb.build()?;

        Ok(BankClient {
            http,
            base_fdic,
            sba_historical_url,
            sba_recent_url,
            sba_historical_year: self
                .sba_historical_year
                .unwrap_or(DEFAULT_SBA_HISTORICAL_YEAR),
            page_size,
            retry: self.retry.unwrap_or_default(),
            cache: self.cache_ttl.map(|ttl| {
                Arc::new(CacheStore {
                    map: RwLock::new(HashMap::new()),
                    default_ttl: ttl,
                })
            }),
        })
    }
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}
