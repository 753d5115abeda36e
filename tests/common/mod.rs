#![allow(dead_code)]

use bankfind_rs::{Backoff, BankClient, BankClientBuilder, RetryConfig};
use httpmock::{Method::GET, Mock, MockServer};
use std::{fs, path::Path, time::Duration};
use url::Url;

pub const WELLS_CERT: u64 = 3511;
pub const WELLS_RSSD: u64 = 451_965;
pub const WELLS_NAME: &str = "Wells Fargo Bank, National Association";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, key: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{endpoint}_{key}.{ext}");
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn live_enabled() -> bool {
    std::env::var("BF_LIVE").ok().as_deref() == Some("1")
}

/// A retry policy fast enough for tests.
pub fn quick_retry(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        backoff: Backoff::Fixed(Duration::from_millis(1)),
        ..RetryConfig::default()
    }
}

/// Builder pointing every endpoint at the mock server.
pub fn builder_for(server: &MockServer) -> BankClientBuilder {
    BankClient::builder()
        .base_fdic(Url::parse(&format!("{}/api/", server.base_url())).unwrap())
        .sba_historical_url(Url::parse(&format!("{}/sba/historical.csv", server.base_url())).unwrap())
        .sba_recent_url(Url::parse(&format!("{}/sba/recent.csv", server.base_url())).unwrap())
        .retry_config(RetryConfig::disabled())
}

pub fn client_for(server: &MockServer) -> BankClient {
    builder_for(server).build().unwrap()
}

pub fn empty_listing() -> &'static str {
    r#"{"meta":{"total":0},"data":[],"totals":{"count":0}}"#
}

pub fn mock_institution<'a>(server: &'a MockServer, cert: u64) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/institutions")
            .query_param("filters", format!("CERT:{cert}"))
            .query_param("fields", "CERT,NAME,BKCLASS,FED_RSSD,ESTYMD");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("institutions", &format!("CERT-{cert}"), "json"));
    })
}

pub fn mock_locations<'a>(server: &'a MockServer, cert: u64) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/locations")
            .query_param("filters", format!("CERT:{cert}"));
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("locations", &format!("CERT-{cert}"), "json"));
    })
}

pub fn mock_history<'a>(server: &'a MockServer, cert: u64) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/history")
            .query_param("filters", format!("CERT:{cert}"))
            .query_param("limit", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("history", &format!("CERT-{cert}"), "json"));
    })
}

pub fn mock_financials<'a>(server: &'a MockServer, rssd: u64) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/api/financials")
            .query_param("format", "csv");
        then.status(200)
            .header("content-type", "text/csv")
            .body(fixture("financials", &format!("RSSDID-{rssd}"), "csv"));
    })
}

pub fn mock_sba(server: &MockServer) -> (Mock<'_>, Mock<'_>) {
    let historical = server.mock(|when, then| {
        when.method(GET).path("/sba/historical.csv");
        then.status(200)
            .header("content-type", "text/csv")
            .body(fixture("sba", "historical", "csv"));
    });
    let recent = server.mock(|when, then| {
        when.method(GET).path("/sba/recent.csv");
        then.status(200)
            .header("content-type", "text/csv")
            .body(fixture("sba", "recent", "csv"));
    });
    (historical, recent)
}
