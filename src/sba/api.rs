use csv::{ReaderBuilder, Trim};

use super::dataset::LoanDataset;
use super::model::{LoanRecord, Vintage};
use super::wire::LoanRow;
use crate::core::{
    BankClient, BankError,
    client::{CacheMode, RetryConfig},
    net,
    wire::parse_u64_lenient,
};

/// Coerces an amount column to whole dollars. Blank, negative or malformed values become zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn coerce_amount(raw: Option<&str>) -> u64 {
    let Some(raw) = raw else { return 0 };
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    if cleaned.is_empty() {
        return 0;
    }
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => {
            let r = v.round();
            if r >= u64::MAX as f64 { u64::MAX } else { r as u64 }
        }
        _ => 0,
    }
}

#[allow(clippy::cast_possible_truncation)]
fn parse_year(raw: &str) -> Option<i32> {
    let t = raw.trim();
    t.parse::<i32>().ok().or_else(|| {
        t.parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0 && f.abs() < 10_000.0)
            .map(|f| f as i32)
    })
}

fn non_empty(s: Option<String>) -> String {
    s.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Parses one extract; rows outside `only_year` are skipped.
///
/// Returns the records plus the number of rows dropped for an unreadable fiscal year.
pub(crate) fn parse_extract(
    body: &str,
    vintage: Vintage,
    only_year: Option<i32>,
) -> Result<(Vec<LoanRecord>, usize), BankError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    let mut dropped = 0usize;
    for row in rdr.deserialize::<LoanRow>() {
        let row = row?;
        let Some(year) = row.approval_fiscal_year.as_deref().and_then(parse_year) else {
            dropped += 1;
            continue;
        };
        if only_year.is_some_and(|y| y != year) {
            continue;
        }
        records.push(LoanRecord {
            bank_fdic_number: row.bank_fdic_number.as_deref().and_then(parse_u64_lenient),
            gross_approval: coerce_amount(row.gross_approval.as_deref()),
            sba_guaranteed_approval: coerce_amount(row.sba_guaranteed_approval.as_deref()),
            bank_name: non_empty(row.bank_name),
            borrower_name: non_empty(row.borrower_name),
            borrower_state: non_empty(row.borrower_state),
            approval_fiscal_year: year,
            vintage,
        });
    }

    if dropped > 0 {
        tracing::debug!(?vintage, dropped, "rows without a readable ApprovalFiscalYear skipped");
    }
    Ok((records, dropped))
}

pub(super) async fn load_dataset(
    client: &BankClient,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<LoanDataset, BankError> {
    let historical_url = client.sba_historical_url();
    let recent_url = client.sba_recent_url();

    let (historical, recent) = tokio::try_join!(
        net::fetch_text(client, historical_url, "sba", "historical", "csv", cache_mode, retry_override),
        net::fetch_text(client, recent_url, "sba", "recent", "csv", cache_mode, retry_override),
    )?;

    let year = client.sba_historical_year();
    let (mut records, dropped_hist) = parse_extract(&historical, Vintage::Historical, Some(year))?;
    let (recent_records, dropped_recent) = parse_extract(&recent, Vintage::Recent, None)?;
    records.extend(recent_records);

    tracing::debug!(
        records = records.len(),
        historical_year = year,
        "loan extracts merged"
    );
    Ok(LoanDataset::with_dropped(records, dropped_hist + dropped_recent))
}
