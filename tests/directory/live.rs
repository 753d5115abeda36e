#[tokio::test]
#[ignore]
async fn live_directory_lookup() {
    if !crate::common::live_enabled() {
        return;
    }

    let client = bankfind_rs::BankClient::new().unwrap();
    let dir = bankfind_rs::DirectoryBuilder::new(&client)
        .lookup(crate::common::WELLS_CERT)
        .await
        .unwrap();
    let rec = dir.resolve(crate::common::WELLS_CERT).unwrap();
    assert!(!rec.name.is_empty());
    assert!(rec.federal_reserve_id > 0);
}
