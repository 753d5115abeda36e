use bankfind_rs::{
    BankClient, DirectoryBuilder, LoanStatsOutcome, NameMatch, ReportBuilder, SbaBuilder,
};
use chrono::NaiveDate;
use futures::future::join_all;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = BankClient::builder()
        .timeout(Duration::from_secs(300))
        .build()?;

    // Load the bulk snapshots once, then build several reports against them.
    let directory_builder = DirectoryBuilder::new(&client);
    let sba_builder = SbaBuilder::new(&client);
    let (directory, loans) =
        tokio::try_join!(directory_builder.load_all(), sba_builder.load())?;
    println!(
        "Directory: {} institutions; SBA 7(a): {} loans ({} rows dropped)",
        directory.len(),
        loans.len(),
        loans.dropped_rows()
    );

    let start = NaiveDate::from_ymd_opt(2022, 1, 1).ok_or("bad start date")?;
    let certs = [3511_u64, 628, 7213];

    let tasks = certs.iter().map(|&cert| {
        let name = directory.name(cert).map(str::to_string).unwrap_or_default();
        let builder = ReportBuilder::new(&client, cert, start)
            .directory(&directory)
            .loan_dataset(&loans)
            .name_match(NameMatch::Normalized)
            .bank_name(name);
        async move { (cert, builder.fetch().await) }
    });

    for (cert, result) in join_all(tasks).await {
        match result {
            Ok(report) => {
                let loan_count: usize = match &report.loan_stats {
                    LoanStatsOutcome::Ready(s) => s.yearly.iter().map(|y| y.loan_count).sum(),
                    _ => 0,
                };
                println!(
                    "{:>6}  {:<45} {:>5} locations {:>3} states {:>3} quarters {:>6} SBA loans",
                    cert,
                    report.institution.name,
                    report.location_count,
                    report.state_count,
                    report.financials.len(),
                    loan_count
                );
            }
            Err(e) => println!("{cert:>6}  failed: {e}"),
        }
    }
    Ok(())
}
