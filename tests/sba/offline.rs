use bankfind_rs::{BankError, MatchKind, SbaBuilder, Vintage};
use httpmock::Method::GET;

use crate::common::{self, WELLS_CERT, WELLS_NAME};

#[tokio::test]
async fn merges_historical_slice_with_recent_extract() {
    let server = common::setup_server();
    let (historical, recent) = common::mock_sba(&server);
    let client = common::client_for(&server);

    let ds = SbaBuilder::new(&client).load().await.unwrap();
    historical.assert();
    recent.assert();

    // 2018 row filtered out, blank-year row dropped.
    assert_eq!(ds.len(), 8);
    assert_eq!(ds.dropped_rows(), 1);
    assert!(ds.records()[..3].iter().all(|r| r.vintage == Vintage::Historical));
    assert!(ds.records()[3..].iter().all(|r| r.vintage == Vintage::Recent));
    assert!(
        ds.records()
            .iter()
            .filter(|r| r.vintage == Vintage::Historical)
            .all(|r| r.approval_fiscal_year == 2019)
    );

    let acme = &ds.records()[0];
    assert_eq!(acme.borrower_name, "Acme Tooling LLC");
    assert_eq!(acme.gross_approval, 400_000, "currency text is coerced");
    assert_eq!(acme.sba_guaranteed_approval, 300_000);
    assert_eq!(ds.records()[1].bank_fdic_number, Some(WELLS_CERT), "3511.0 reads as 3511");
}

#[tokio::test]
async fn yearly_stats_by_certificate() {
    let server = common::setup_server();
    common::mock_sba(&server);
    let client = common::client_for(&server);

    let report = SbaBuilder::new(&client)
        .yearly_stats(WELLS_CERT, WELLS_NAME)
        .await
        .unwrap();

    assert_eq!(report.matched_by, MatchKind::FdicNumber);
    assert_eq!(report.resolved_bank_name, WELLS_NAME);
    let years: Vec<(i32, u64, usize)> = report
        .yearly
        .iter()
        .map(|y| (y.year, y.total_loan_volume, y.loan_count))
        .collect();
    assert_eq!(years, vec![(2019, 1_000_000, 2), (2020, 50_000, 1)]);
    assert!((report.yearly[0].median_loan_size - 500_000.0).abs() < f64::EPSILON);
    assert_eq!(report.charts.loan_count.len(), 2);
}

#[tokio::test]
async fn yearly_stats_falls_back_to_bank_name() {
    let server = common::setup_server();
    common::mock_sba(&server);
    let client = common::client_for(&server);

    let ds = SbaBuilder::new(&client).load().await.unwrap();
    let report = ds.yearly_stats(12_345, "Community First Bank").unwrap();

    assert_eq!(report.matched_by, MatchKind::Name);
    assert_eq!(report.yearly.len(), 2);

    let y21 = &report.yearly[0];
    assert_eq!((y21.year, y21.loan_count, y21.total_loan_volume), (2021, 2, 200_000));
    assert!((y21.median_loan_size - 100_000.0).abs() < f64::EPSILON);
    assert!((y21.percent_under_500k - 100.0).abs() < 1e-9);
    assert!((y21.percent_under_100k - 50.0).abs() < 1e-9);

    let y22 = &report.yearly[1];
    assert_eq!((y22.year, y22.total_loan_volume), (2022, 1_200_000));
    assert!(y22.percent_under_500k.abs() < 1e-9);
}

#[tokio::test]
async fn exact_name_ignores_surrounding_whitespace() {
    let server = common::setup_server();
    common::mock_sba(&server);
    let client = common::client_for(&server);

    let ds = SbaBuilder::new(&client).load().await.unwrap();
    let padded = ds.yearly_stats(12_345, "  Community First Bank ").unwrap();
    let exact = ds.yearly_stats(12_345, "Community First Bank").unwrap();

    assert_eq!(padded.matched_by, MatchKind::Name);
    assert_eq!(padded.yearly, exact.yearly);
}

#[tokio::test]
async fn historical_year_is_configurable() {
    let server = common::setup_server();
    common::mock_sba(&server);
    let client = common::builder_for(&server).sba_historical_year(2018).build().unwrap();

    let ds = SbaBuilder::new(&client).load().await.unwrap();
    let historical: Vec<_> = ds
        .records()
        .iter()
        .filter(|r| r.vintage == Vintage::Historical)
        .collect();
    assert_eq!(historical.len(), 1);
    assert_eq!(historical[0].borrower_name, "Gamma Bakery Co");
}

#[tokio::test]
async fn failed_download_fails_the_load() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/sba/historical.csv");
        then.status(200).body(common::fixture("sba", "historical", "csv"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/sba/recent.csv");
        then.status(403);
    });
    let client = common::client_for(&server);

    let err = SbaBuilder::new(&client).load().await.unwrap_err();
    assert!(matches!(err, BankError::Status { status: 403, .. }), "got {err:?}");
}

#[tokio::test]
async fn malformed_amounts_coerce_to_zero() {
    let server = common::setup_server();
    let header = "BorrName,BorrState,BankName,BankFDICNumber,GrossApproval,SBAGuaranteedApproval,ApprovalFiscalYear";
    server.mock(|when, then| {
        when.method(GET).path("/sba/historical.csv");
        then.status(200).body(format!("{header}\n"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/sba/recent.csv");
        then.status(200).body(format!(
            "{header}\nA,CA,Odd Bank,5,n/a,,2021\nB,CA,Odd Bank,5,-250,100,2021.0\nC,CA,Odd Bank,5,\"$1,000\",500,2021\n"
        ));
    });
    let client = common::client_for(&server);

    let ds = SbaBuilder::new(&client).load().await.unwrap();
    let amounts: Vec<u64> = ds.records().iter().map(|r| r.gross_approval).collect();
    assert_eq!(amounts, vec![0, 0, 1_000]);

    let report = ds.yearly_stats(5, "").unwrap();
    assert_eq!(report.yearly[0].loan_count, 3);
    assert_eq!(report.yearly[0].total_loan_volume, 1_000);
    assert_eq!(report.yearly[0].total_sba_guaranteed, 600);
}
