//! Centralized constants for default endpoints and UA.

/// Identifies the crate to the FDIC and SBA servers.
pub(crate) const USER_AGENT: &str = concat!("bankfind-rs/", env!("CARGO_PKG_VERSION"));

/// FDIC BankFind API root (endpoint names are joined onto it).
pub(crate) const DEFAULT_BASE_FDIC: &str = "https://banks.data.fdic.gov/api/";

/// SBA 7(a) FOIA extract covering fiscal years 2010 through 2019.
pub(crate) const DEFAULT_SBA_HISTORICAL: &str = "https://data.sba.gov/dataset/0ff8e8e9-b967-4f4e-987c-6ac78c575087/resource/c71ba6cf-b4e0-4e60-98f0-48aeaf4c6460/download/foia-7afy2010-fy2019-asof-250630.csv";

/// SBA 7(a) FOIA extract covering fiscal year 2020 to the present.
pub(crate) const DEFAULT_SBA_RECENT: &str = "https://data.sba.gov/dataset/0ff8e8e9-b967-4f4e-987c-6ac78c575087/resource/d67d3ccb-2002-4134-a288-481b51cd3479/download/foia-7afy2020-present-asof-250630.csv";

/// Fiscal year kept from the historical extract.
pub(crate) const DEFAULT_SBA_HISTORICAL_YEAR: i32 = 2019;

/// Largest page the BankFind API will serve.
pub(crate) const DEFAULT_PAGE_SIZE: u32 = 10_000;

/// Connect timeout applied unless overridden.
pub(crate) const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
