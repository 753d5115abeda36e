mod api;
mod model;
mod wire;

pub use model::{LocationRecord, Locations};

use crate::{
    BankClient, BankError,
    core::client::{CacheMode, RetryConfig},
};

/// A builder for fetching the branch listing of one certificate.
pub struct LocationsBuilder {
    client: BankClient,
    cert: u64,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl LocationsBuilder {
    /// Creates a new `LocationsBuilder` for a certificate number.
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

    /// Fetches every location for the certificate.
    ///
    /// A certificate with no locations yields an empty listing, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InvalidParams`] for certificate `0`, or an upstream error.
    #[tracing::instrument(skip(self), err, fields(cert = self.cert))]
    pub async fn fetch(&self) -> Result<Locations, BankError> {
        api::fetch_locations(
            &self.client,
            self.cert,
            self.cache_mode,
            self.retry_override.as_ref(),
        )
        .await
    }

    /// Number of locations for the certificate.
    ///
    /// # Errors
    ///
    /// See [`LocationsBuilder::fetch`].
    pub async fn location_count(&self) -> Result<usize, BankError> {
        Ok(self.fetch().await?.location_count())
    }

    /// Number of distinct states the certificate has locations in.
    ///
    /// # Errors
    ///
    /// See [`LocationsBuilder::fetch`].
    pub async fn state_count(&self) -> Result<usize, BankError> {
        Ok(self.fetch().await?.state_count())
    }
}
