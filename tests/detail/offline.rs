use bankfind_rs::{BankError, DetailBuilder};
use httpmock::Method::GET;

use crate::common::{self, WELLS_CERT, WELLS_NAME};

#[tokio::test]
async fn reads_first_history_entry() {
    let server = common::setup_server();
    let mock = common::mock_history(&server, WELLS_CERT);
    let client = common::client_for(&server);

    let detail = DetailBuilder::new(&client, WELLS_CERT).fetch().await.unwrap();
    mock.assert();

    assert_eq!(detail.certificate_number, WELLS_CERT);
    assert_eq!(detail.bank_name, WELLS_NAME);
    assert_eq!(detail.unique_fdic_number, Some(3510));
    assert_eq!(detail.insured_flag, "Y");
    assert!(detail.is_insured());
    assert_eq!(detail.address, "101 North Phillips Avenue");
    assert_eq!(detail.city, "Sioux Falls");
    assert_eq!(detail.zip_code, "57104", "numeric zip read as text");
    assert_eq!(detail.class_code, "N");
}

#[tokio::test]
async fn leading_zeros_are_restored_on_zip_codes() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/history")
            .query_param("filters", "CERT:9092");
        then.status(200)
            .header("content-type", "application/json")
            .body(
                r#"{"meta":{"total":1},"data":[{"data":{"INSTNAME":"Eastern Bank","FI_UNINUM":6370,"BANK_INSURED":"N","MADDR":"265 Franklin Street","MCITY":"Boston","MZIP5":2110,"FRM_CLASS":"SB"}}]}"#,
            );
    });
    let client = common::client_for(&server);

    let detail = DetailBuilder::new(&client, 9092).fetch().await.unwrap();
    assert_eq!(detail.zip_code, "02110");
    assert!(!detail.is_insured());
    assert_eq!(detail.class_code, "SB");
}

#[tokio::test]
async fn empty_history_is_an_error() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/history")
            .query_param("filters", "CERT:424242");
        then.status(200)
            .header("content-type", "application/json")
            .body(common::empty_listing());
    });
    let client = common::client_for(&server);

    let err = DetailBuilder::new(&client, 424_242).fetch().await.unwrap_err();
    mock.assert();
    assert!(matches!(err, BankError::Data(_)), "got {err:?}");
}

#[tokio::test]
async fn missing_fields_default_to_empty() {
    let server = common::setup_server();
    server.mock(|when, then| {
        when.method(GET).path("/api/history");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"data":[{"data":{"INSTNAME":"Sparse Savings"}}]}"#);
    });
    let client = common::client_for(&server);

    let detail = DetailBuilder::new(&client, 77).fetch().await.unwrap();
    assert_eq!(detail.bank_name, "Sparse Savings");
    assert_eq!(detail.unique_fdic_number, None);
    assert_eq!(detail.zip_code, "");
    assert!(!detail.is_insured());
}
