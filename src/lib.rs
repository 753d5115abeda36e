//! bankfind-rs: a bank dashboard client for the FDIC BankFind and SBA 7(a) datasets.
//!
//! The crate resolves an institution by FDIC certificate number, counts its branch
//! locations and states, reads its history record, pulls its quarterly call-report
//! metrics under business-friendly names, and aggregates its SBA 7(a) lending by
//! fiscal year. [`ReportBuilder`] composes all of those into one [`BankReport`].
//!
//! ```no_run
//! # use bankfind_rs::{BankClient, LoanStatsOutcome, ReportBuilder};
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BankClient::new()?;
//! let report = ReportBuilder::with_start_str(&client, 3511, "2023-01-01")
//!     .bank_name("Wells Fargo Bank, National Association")
//!     .fetch()
//!     .await?;
//!
//! println!("{} ({} locations)", report.institution.name, report.location_count);
//! if let LoanStatsOutcome::Ready(stats) = &report.loan_stats {
//!     for year in &stats.yearly {
//!         println!("{}: {} loans", year.year, year.loan_count);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod detail;
pub mod directory;
pub mod financials;
pub mod locations;
pub mod report;
pub mod sba;

pub use crate::core::{BankClient, BankClientBuilder, BankError, CacheMode};
pub use crate::core::client::{Backoff, RetryConfig};

pub use detail::{DetailBuilder, InstitutionDetail};
pub use directory::{DirectoryBuilder, InstitutionDirectory, InstitutionRecord};
pub use financials::{
    FinancialMetric, FinancialMetricRow, FinancialSeries, FinancialsBuilder, IdKind, Quarter,
    fetch_series, quarter_count,
};
pub use locations::{LocationRecord, Locations, LocationsBuilder};
pub use report::{BankReport, LoanStatsOutcome, ReportBuilder};
pub use sba::{
    ChartPoint, LoanCharts, LoanDataset, LoanRecord, LoanStatsReport, MatchKind, MatchStrategy,
    NameMatch, SbaBuilder, Vintage, YearlyLoanStats,
};
