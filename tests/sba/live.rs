#[tokio::test]
#[ignore]
async fn live_sba_extracts_load() {
    if !crate::common::live_enabled() {
        return;
    }

    let client = bankfind_rs::BankClient::builder()
        .timeout(std::time::Duration::from_secs(600))
        .build()
        .unwrap();
    let ds = bankfind_rs::SbaBuilder::new(&client).load().await.unwrap();
    assert!(!ds.is_empty());
    let report = ds
        .yearly_stats(crate::common::WELLS_CERT, crate::common::WELLS_NAME)
        .unwrap();
    assert!(!report.yearly.is_empty());
}
