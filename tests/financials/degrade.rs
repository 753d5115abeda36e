use bankfind_rs::{BankError, FinancialMetric, FinancialsBuilder};
use chrono::NaiveDate;
use httpmock::Method::GET;

use crate::common::{self, WELLS_RSSD};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[tokio::test]
async fn upstream_failure_degrades_to_empty_series() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/financials");
        then.status(502).body("bad gateway");
    });
    let client = common::client_for(&server);

    let builder = FinancialsBuilder::new(&client, WELLS_RSSD)
        .start(d(2023, 1, 1))
        .as_of(d(2024, 6, 15));

    let series = builder.fetch().await.unwrap();
    assert!(series.is_empty());

    let err = builder.try_fetch().await.unwrap_err();
    assert!(matches!(err, BankError::Status { status: 502, .. }), "got {err:?}");
    mock.assert_calls(2);
}

#[tokio::test]
async fn empty_body_is_an_empty_series() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/financials");
        then.status(200).header("content-type", "text/csv").body("");
    });
    let client = common::client_for(&server);

    let series = FinancialsBuilder::new(&client, WELLS_RSSD)
        .start(d(2023, 1, 1))
        .as_of(d(2024, 6, 15))
        .try_fetch()
        .await
        .unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn header_only_body_is_an_empty_series() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/financials");
        then.status(200).body("RSSDID,REPDTE,ASSET\n");
    });
    let client = common::client_for(&server);

    let series = FinancialsBuilder::new(&client, WELLS_RSSD)
        .metrics([FinancialMetric::TotalAssets])
        .try_fetch()
        .await
        .unwrap();
    assert!(series.is_empty());
}

#[tokio::test]
async fn missing_report_date_column_is_a_data_error() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/financials");
        then.status(200).body("RSSDID,ASSET\n451965,1712345000\n");
    });
    let client = common::client_for(&server);

    let builder = FinancialsBuilder::new(&client, WELLS_RSSD).metrics([FinancialMetric::TotalAssets]);
    let err = builder.try_fetch().await.unwrap_err();
    assert!(matches!(err, BankError::Data(_)), "got {err:?}");

    // The degrading form swallows decode failures too.
    assert!(builder.fetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn non_csv_success_body_is_a_decode_error() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/financials");
        then.status(200)
            .body(r#"{"error":{"message":"Invalid filter syntax","status":400}}"#);
    });
    let client = common::client_for(&server);

    let builder = FinancialsBuilder::new(&client, WELLS_RSSD).metrics([FinancialMetric::TotalAssets]);
    let err = builder.try_fetch().await.unwrap_err();
    assert!(
        matches!(err, BankError::Data(_) | BankError::Csv(_)),
        "got {err:?}"
    );
    assert!(builder.fetch().await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_arguments_are_never_swallowed() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/financials");
        then.status(200).body("");
    });
    let client = common::client_for(&server);

    let future_start = FinancialsBuilder::new(&client, WELLS_RSSD)
        .start(d(2024, 9, 1))
        .as_of(d(2024, 6, 15))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(future_start, BankError::InvalidParams(_)), "got {future_start:?}");

    let bad_text = FinancialsBuilder::new(&client, WELLS_RSSD)
        .start_str("first of January")
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(bad_text, BankError::InvalidParams(_)));

    let zero_id = FinancialsBuilder::new(&client, 0).fetch().await.unwrap_err();
    assert!(matches!(zero_id, BankError::InvalidParams(_)));

    let inverted = FinancialsBuilder::new(&client, WELLS_RSSD)
        .start(d(2023, 6, 1))
        .end(d(2023, 1, 1))
        .as_of(d(2024, 6, 15))
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(inverted, BankError::InvalidParams(_)));

    let no_metrics = FinancialsBuilder::new(&client, WELLS_RSSD)
        .metrics(Vec::<FinancialMetric>::new())
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(no_metrics, BankError::InvalidParams(_)));

    let zero_limit = FinancialsBuilder::new(&client, WELLS_RSSD)
        .limit(0)
        .fetch()
        .await
        .unwrap_err();
    assert!(matches!(zero_limit, BankError::InvalidParams(_)));

    mock.assert_calls(0);
}
