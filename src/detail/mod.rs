mod api;
mod model;
mod wire;

pub use model::InstitutionDetail;

use crate::{
    BankClient, BankError,
    core::client::{CacheMode, RetryConfig},
};

/// A builder for fetching an institution's extended profile from the history endpoint.
pub struct DetailBuilder {
    client: BankClient,
    cert: u64,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl DetailBuilder {
    /// Creates a new `DetailBuilder` for a certificate number.
    pub fn new(client: &BankClient, cert: u64) -> Self {
        Self {
            client: client.clone(),
            cert,
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

    /// Fetches the first history entry for the certificate.
    ///
    /// # Errors
    ///
    /// Returns an upstream error when the request fails, the body is not valid JSON,
    /// or the history has no entries.
    #[tracing::instrument(skip(self), err, fields(cert = self.cert))]
    pub async fn fetch(&self) -> Result<InstitutionDetail, BankError> {
        api::fetch_detail(
            &self.client,
            self.cert,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }
}
