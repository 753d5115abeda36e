use super::model::{LocationRecord, Locations};
use super::wire::LocationNode;
use crate::core::{
    BankClient, BankError,
    client::{CacheMode, RetryConfig},
    fdic::{self, FdicQuery},
};

const FIELDS: [&str; 9] = [
    "CERT", "UNINUM", "OFFNAME", "ADDRESS", "CITY", "STNAME", "STALP", "ZIP", "MAINOFF",
];

pub(super) async fn fetch_locations(
    client: &BankClient,
    cert: u64,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Locations, BankError> {
    if cert == 0 {
        return Err(BankError::InvalidParams(
            "certificate number must be a positive integer".into(),
        ));
    }

    let q = FdicQuery::new("locations")
        .filters(format!("CERT:{cert}"))
        .fields(&FIELDS)
        .sort("UNINUM", "ASC");
    let nodes: Vec<LocationNode> =
        fdic::fetch_all(client, &q, &format!("CERT-{cert}"), cache_mode, retry_override).await?;

    let records = nodes
        .into_iter()
        .filter(|n| n.cert.is_none_or(|c| c == cert))
        .map(|n| LocationRecord {
            certificate_number: cert,
            unique_number: n.unique_number,
            office_name: n.office_name.unwrap_or_default(),
            address: n.address.unwrap_or_default(),
            city: n.city.unwrap_or_default(),
            state_name: n.state_name.unwrap_or_default(),
            state_code: n.state_code.unwrap_or_default(),
            zip: n.zip.unwrap_or_default(),
            main_office: n.main_office == Some(1),
        })
        .collect::<Vec<_>>();

    if records.is_empty() {
        tracing::debug!(cert, "no locations listed");
    }

    Ok(Locations {
        certificate_number: cert,
        records,
    })
}
