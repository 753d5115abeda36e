use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};

use super::model::FinancialMetricRow;
use super::params::FinancialMetric;
use crate::core::{BankError, wire::parse_u64_lenient};

/// How each CSV column is treated.
#[derive(Clone, Copy)]
enum Column {
    Rssd,
    ReportDate,
    Metric(FinancialMetric),
    Ignored,
}

fn classify(header: &str) -> Column {
    match header.trim().to_ascii_uppercase().as_str() {
        "RSSDID" => Column::Rssd,
        "REPDTE" => Column::ReportDate,
        // ID is BankFind's internal row key; CERT only appears when filtering by certificate.
        "ID" | "CERT" => Column::Ignored,
        other => FinancialMetric::from_code(other).map_or_else(
            || {
                tracing::debug!(column = other, "unrecognised financials column dropped");
                Column::Ignored
            },
            Column::Metric,
        ),
    }
}

fn parse_repdte(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y%m%d").ok()
}

fn parse_value(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok()
}

/// Decodes the `format=csv` financials body into named rows.
pub(crate) fn parse_financials_csv(body: &str) -> Result<Vec<FinancialMetricRow>, BankError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(body.as_bytes());

    let columns: Vec<Column> = rdr.headers()?.iter().map(classify).collect();

    // REPDTE is always requested; a header without it is not a financials body.
    // Every request selects REPDTE, so a header without it is not a financials body.
    if !columns.iter().any(|c| matches!(c, Column::ReportDate)) {
        return Err(BankError::Data("financials CSV has no REPDTE column".into()));
    }

    let mut rows = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record?;

        let mut rssd: Option<u64> = None;
        let mut date: Option<NaiveDate> = None;
        let mut values = Vec::new();
        for (col, raw) in columns.iter().zip(record.iter()) {
            match col {
                Column::Rssd => rssd = parse_u64_lenient(raw),
                Column::ReportDate => {
                    date = Some(parse_repdte(raw).ok_or_else(|| {
                        BankError::Data(format!("row {line}: bad REPDTE {raw:?}"))
                    })?);
                }
                Column::Metric(m) => values.push((*m, parse_value(raw))),
                Column::Ignored => {}
            }
        }

        let report_date =
            date.ok_or_else(|| BankError::Data(format!("row {line}: missing REPDTE")))?;
        rows.push(FinancialMetricRow::new(rssd.unwrap_or(0), report_date, values));
    }
    Ok(rows)
}
