use super::model::{InstitutionDirectory, InstitutionRecord};
use super::wire::InstitutionNode;
use crate::core::{
    BankClient, BankError,
    client::{CacheMode, RetryConfig},
    fdic::{self, FdicQuery},
    wire::parse_fdic_date,
};

const FIELDS: [&str; 5] = ["CERT", "NAME", "BKCLASS", "FED_RSSD", "ESTYMD"];

fn query(filters: Option<String>) -> FdicQuery<'static> {
    let q = FdicQuery::new("institutions")
        .fields(&FIELDS)
        .sort("CERT", "ASC");
    match filters {
        Some(f) => q.filters(f),
        None => q,
    }
}

fn map_node(node: InstitutionNode) -> Option<InstitutionRecord> {
    let Some(cert) = node.cert else {
        tracing::debug!("directory row without CERT skipped");
        return None;
    };
    let established = node.established.as_deref().and_then(|s| {
        let parsed = parse_fdic_date(s);
        if parsed.is_none() && !s.trim().is_empty() {
            tracing::debug!(cert, raw = s, "unparseable ESTYMD");
        }
        parsed
    });
    Some(InstitutionRecord {
        certificate_number: cert,
        name: node.name.unwrap_or_default(),
        bank_class: node.bank_class.unwrap_or_default(),
        federal_reserve_id: node.fed_rssd.unwrap_or(0),
        established,
    })
}

pub(super) async fn load_all(
    client: &BankClient,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<InstitutionDirectory, BankError> {
    let nodes: Vec<InstitutionNode> =
        fdic::fetch_all(client, &query(None), "all", cache_mode, retry_override).await?;
    let records: Vec<InstitutionRecord> = nodes.into_iter().filter_map(map_node).collect();
    tracing::debug!(institutions = records.len(), "directory loaded");
    Ok(InstitutionDirectory::from_records(records))
}

pub(super) async fn lookup(
    client: &BankClient,
    cert: u64,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<InstitutionDirectory, BankError> {
    if cert == 0 {
        return Err(BankError::InvalidParams(
            "certificate number must be a positive integer".into(),
        ));
    }
    let q = query(Some(format!("CERT:{cert}")));
    let nodes: Vec<InstitutionNode> =
        fdic::fetch_all(client, &q, &format!("CERT-{cert}"), cache_mode, retry_override).await?;
    let records = nodes
        .into_iter()
        .filter_map(map_node)
        .filter(|r| r.certificate_number == cert)
        .collect();
    Ok(InstitutionDirectory::from_records(records))
}
