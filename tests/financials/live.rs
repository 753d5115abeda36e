#[tokio::test]
#[ignore]
async fn live_financials_since_last_year() {
    if !crate::common::live_enabled() {
        return;
    }

    let client = bankfind_rs::BankClient::new().unwrap();
    let start = chrono::Local::now().date_naive() - chrono::Duration::days(400);
    let series = bankfind_rs::FinancialsBuilder::new(&client, crate::common::WELLS_RSSD)
        .start(start)
        .try_fetch()
        .await
        .unwrap();
    assert!(!series.is_empty());
    assert!(series.rows().windows(2).all(|w| w[0].report_date >= w[1].report_date));
}
