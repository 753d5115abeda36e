use bankfind_rs::{
    BankError, DirectoryBuilder, InstitutionDirectory, InstitutionRecord, MatchKind, NameMatch,
    ReportBuilder, SbaBuilder,
};
use chrono::NaiveDate;
use httpmock::Method::GET;

use crate::common::{self, WELLS_CERT, WELLS_NAME, WELLS_RSSD};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn preloaded_snapshots_are_reused_across_reports() {
    let server = common::setup_server();
    let inst = common::mock_institution(&server, WELLS_CERT);
    let locs = common::mock_locations(&server, WELLS_CERT);
    let hist = common::mock_history(&server, WELLS_CERT);
    let fin = common::mock_financials(&server, WELLS_RSSD);
    let (sba_hist, sba_recent) = common::mock_sba(&server);
    let client = common::client_for(&server);

    let directory = DirectoryBuilder::new(&client).lookup(WELLS_CERT).await.unwrap();
    let loans = SbaBuilder::new(&client).load().await.unwrap();

    for _ in 0..2 {
        let report = ReportBuilder::new(&client, WELLS_CERT, d(2023, 1, 1))
            .as_of(d(2024, 6, 15))
            .directory(&directory)
            .loan_dataset(&loans)
            .bank_name(WELLS_NAME)
            .fetch()
            .await
            .unwrap();
        assert_eq!(report.institution.federal_reserve_id, WELLS_RSSD);
        assert_eq!(report.loan_stats.stats().unwrap().matched_by, MatchKind::FdicNumber);
    }

    inst.assert_calls(1);
    sba_hist.assert_calls(1);
    sba_recent.assert_calls(1);
    locs.assert_calls(2);
    hist.assert_calls(2);
    fin.assert_calls(2);
}

#[tokio::test]
async fn certificate_missing_from_preloaded_directory_is_not_found() {
    let server = common::setup_server();
    let any = server.mock(|when, then| {
        when.method(GET).path("/api/institutions");
        then.status(200).body(common::empty_listing());
    });
    common::mock_locations(&server, WELLS_CERT);
    common::mock_history(&server, WELLS_CERT);
    let client = common::client_for(&server);

    let directory = InstitutionDirectory::from_records(vec![InstitutionRecord {
        certificate_number: 628,
        name: "JPMorgan Chase Bank, National Association".into(),
        bank_class: "N".into(),
        federal_reserve_id: 852_218,
        established: None,
    }]);

    let err = ReportBuilder::new(&client, WELLS_CERT, d(2023, 1, 1))
        .as_of(d(2024, 6, 15))
        .directory(&directory)
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(err, BankError::NotFound(_)), "got {err:?}");
    any.assert_calls(0);
}

#[tokio::test]
async fn normalized_name_matching_reaches_loan_stage() {
    let server = common::setup_server();
    let locs = server.mock(|when, then| {
        when.method(GET)
            .path("/api/locations")
            .query_param("filters", "CERT:12345");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::empty_listing());
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/history")
            .query_param("filters", "CERT:12345");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[{"data":{"INSTNAME":"Community First Bank","BANK_INSURED":"Y","MZIP5":"75701"}}]}"#);
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/financials");
        then.status(200).body("");
    });
    common::mock_sba(&server);
    let client = common::client_for(&server);

    let directory = InstitutionDirectory::from_records(vec![InstitutionRecord {
        certificate_number: 12_345,
        name: "Community First Bank".into(),
        bank_class: "NM".into(),
        federal_reserve_id: 777_001,
        established: None,
    }]);

    let report = ReportBuilder::new(&client, 12_345, d(2021, 1, 1))
        .as_of(d(2024, 6, 15))
        .directory(&directory)
        .bank_name("COMMUNITY FIRST BANK")
        .name_match(NameMatch::Normalized)
        .fetch()
        .await
        .unwrap();

    locs.assert();
    assert_eq!(report.location_count, 0);
    assert_eq!(report.state_count, 0);
    assert!(report.states.is_empty());
    assert!(report.financials.is_empty());

    let stats = report.loan_stats.stats().unwrap();
    assert_eq!(stats.matched_by, MatchKind::Name);
    assert_eq!(stats.resolved_bank_name, "Community First Bank");
    assert_eq!(stats.yearly.len(), 2);
}
