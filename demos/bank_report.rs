use bankfind_rs::{BankClient, FinancialMetric, LoanStatsOutcome, ReportBuilder};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// Usage: cargo run --example bank_report --features tracing-subscriber -- <CERT> <START> [BANK NAME]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let cert: u64 = args.next().as_deref().unwrap_or("3511").parse()?;
    let start = args.next().unwrap_or_else(|| "2023-01-01".to_string());
    let bank_name = args.collect::<Vec<_>>().join(" ");

    let client = BankClient::builder()
        .timeout(Duration::from_secs(120))
        .cache_ttl(Duration::from_secs(600))
        .build()?;

    let mut builder = ReportBuilder::with_start_str(&client, cert, start);
    if !bank_name.is_empty() {
        builder = builder.bank_name(bank_name);
    }
    let report = builder.fetch().await?;

    println!("--- {} (CERT {}) ---", report.institution.name, report.certificate_number);
    println!("Class: {}", report.institution.bank_class);
    println!("Federal Reserve ID: {}", report.institution.federal_reserve_id);
    if let Some(est) = report.institution.established {
        println!("Established: {est}");
    }
    println!(
        "Locations: {} across {} states",
        report.location_count, report.state_count
    );
    println!(
        "Mailing address: {}, {} {}",
        report.detail.address, report.detail.city, report.detail.zip_code
    );
    println!("Insured: {}", report.detail.is_insured());
    println!();

    println!("--- Quarterly financials since {} ---", report.start_date);
    if report.financials.is_empty() {
        println!("  no financial data available");
    }
    for row in report.financials.rows() {
        println!(
            "  {} ({}): assets {:.0}, deposits {:.0}, ROA {:.2}",
            row.quarter(),
            row.report_date,
            row.get(FinancialMetric::TotalAssets).unwrap_or_default(),
            row.get(FinancialMetric::TotalDeposits).unwrap_or_default(),
            row.get(FinancialMetric::ReturnOnAssets).unwrap_or_default(),
        );
    }
    println!();

    match &report.loan_stats {
        LoanStatsOutcome::NotRequested => println!("(pass a bank name to include SBA 7(a) loans)"),
        LoanStatsOutcome::Failed(msg) => println!("SBA 7(a) loans unavailable: {msg}"),
        LoanStatsOutcome::Ready(stats) => {
            println!(
                "--- SBA 7(a) loans for {} (matched by {:?}) ---",
                stats.resolved_bank_name, stats.matched_by
            );
            for y in &stats.yearly {
                println!(
                    "  FY{}: {} loans, ${} total, avg ${:.0}, median ${:.0}, <$100k {:.1}%",
                    y.year,
                    y.loan_count,
                    y.total_loan_volume,
                    y.average_loan_size,
                    y.median_loan_size,
                    y.percent_under_100k
                );
            }
        }
    }

    println!();
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
