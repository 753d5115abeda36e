use super::model::InstitutionDetail;
use super::wire::HistoryNode;
use crate::core::{
    BankClient, BankError,
    client::{CacheMode, RetryConfig},
    fdic::{self, FdicQuery},
};

pub(super) async fn fetch_detail(
    client: &BankClient,
    cert: u64,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<InstitutionDetail, BankError> {
    if cert == 0 {
        return Err(BankError::InvalidParams(
            "certificate number must be a positive integer".into(),
        ));
    }

    let q = FdicQuery::new("history").filters(format!("CERT:{cert}"));
    let env = fdic::fetch_page::<HistoryNode>(
        client,
        &q,
        1,
        0,
        &format!("CERT-{cert}"),
        cache_mode,
        retry_override,
    )
    .await?;

    let first = env
        .data
        .into_iter()
        .next()
        .ok_or_else(|| BankError::Data(format!("history for certificate {cert} has no entries")))?
        .data;

    Ok(InstitutionDetail {
        certificate_number: cert,
        bank_name: first.institution_name.unwrap_or_default(),
        unique_fdic_number: first.unique_number,
        insured_flag: first.insured.unwrap_or_default(),
        address: first.address.unwrap_or_default(),
        city: first.city.unwrap_or_default(),
        zip_code: first.zip.map(pad_zip).unwrap_or_default(),
        class_code: first.class_code.unwrap_or_default(),
    })
}

// Numeric zips lose their leading zeros in transit.
fn pad_zip(zip: String) -> String {
    let t = zip.trim();
    if !t.is_empty() && t.len() < 5 && t.chars().all(|c| c.is_ascii_digit()) {
        format!("{t:0>5}")
    } else {
        t.to_string()
    }
}
