mod api;
mod model;
mod wire;

pub use model::{InstitutionDirectory, InstitutionRecord};

use crate::{
    BankClient, BankError,
    core::client::{CacheMode, RetryConfig},
};

/// A builder for loading the BankFind institution directory.
///
/// # Example
///
/// ```no_run
/// # use bankfind_rs::{BankClient, DirectoryBuilder};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = BankClient::new()?;
/// let directory = DirectoryBuilder::new(&client).load_all().await?;
/// let wells = directory.resolve(3511)?;
/// println!("{} (RSSD {})", wells.name, wells.federal_reserve_id);
/// # Ok(())
/// # }
/// ```
pub struct DirectoryBuilder {
    client: BankClient,
    cache_mode: CacheMode,
    retry_override: Option<RetryConfig>,
}

impl DirectoryBuilder {
    /// Creates a new `DirectoryBuilder`.
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

    /// Pages through the full institution listing (the bulk snapshot).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails or cannot be decoded.
    #[tracing::instrument(skip(self), err)]
    pub async fn load_all(&self) -> Result<InstitutionDirectory, BankError> {
        api::load_all(&self.client, self.cache_mode, self.retry_override.as_ref()).await
    }

    /// Loads a directory holding only the rows for `cert`.
    ///
    /// The result may be empty; [`InstitutionDirectory::resolve`] reports that as `NotFound`.
    ///
    /// # Errors
    ///
    /// Returns [`BankError::InvalidParams`] for certificate `0`, or an upstream error.
    #[tracing::instrument(skip(self), err)]
    pub async fn lookup(&self, cert: u64) -> Result<InstitutionDirectory, BankError> {
        api::lookup(&self.client, cert, self.cache_mode, self.retry_override.as_ref()).await
    }
}
