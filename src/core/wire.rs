use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

/* ---------------- BankFind JSON envelope ---------------- */

#[derive(Deserialize)]
pub(crate) struct FdicEnvelope<T> {
    pub(crate) meta: Option<FdicMeta>,
    #[serde(default = "Vec::new")]
    pub(crate) data: Vec<FdicItem<T>>,
}

#[derive(Deserialize)]
pub(crate) struct FdicMeta {
    pub(crate) total: Option<u64>,
}

#[derive(Deserialize)]
pub(crate) struct FdicItem<T> {
    pub(crate) data: T,
}

/* ---------------- lenient scalars ---------------- */

// BankFind is inconsistent about quoting numeric identifiers and zip codes.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    U64(u64),
    I64(i64),
    F64(f64),
    Str(String),
    Bool(bool),
}

/// Parses an unsigned identifier written as `"451965"`, `"451965.0"` or with padding.
pub(crate) fn parse_u64_lenient(s: &str) -> Option<u64> {
    let t = s.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(u) = t.parse::<u64>() {
        return Some(u);
    }
    t.parse::<f64>().ok().and_then(integral_f64_to_u64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn integral_f64_to_u64(f: f64) -> Option<u64> {
    if f.is_finite() && f.fract() == 0.0 && f >= 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

pub(crate) fn de_opt_u64_lenient<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::U64(u)) => Ok(Some(u)),
        Some(Scalar::I64(i)) => u64::try_from(i)
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("negative identifier {i}"))),
        Some(Scalar::F64(f)) => integral_f64_to_u64(f)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("cannot convert float {f} to u64"))),
        Some(Scalar::Str(s)) => {
            if s.trim().is_empty() {
                return Ok(None);
            }
            parse_u64_lenient(&s)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("not an identifier: {s:?}")))
        }
        Some(Scalar::Bool(b)) => Err(serde::de::Error::custom(format!(
            "expected identifier, got {b}"
        ))),
    }
}

pub(crate) fn de_opt_string_lenient<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Scalar>::deserialize(deserializer)? {
        None => None,
        Some(Scalar::Str(s)) => Some(s),
        Some(Scalar::U64(u)) => Some(u.to_string()),
        Some(Scalar::I64(i)) => Some(i.to_string()),
        Some(Scalar::F64(f)) => Some(f.to_string()),
        Some(Scalar::Bool(b)) => Some(b.to_string()),
    })
}

/* ---------------- dates ---------------- */

const DATE_FORMATS: [&str; 3] = ["%m/%d/%Y", "%Y-%m-%d", "%Y%m%d"];

/// Parses the date layouts BankFind uses across endpoints (`MM/DD/YYYY`, ISO, `YYYYMMDD`).
pub(crate) fn parse_fdic_date(s: &str) -> Option<NaiveDate> {
    let t = s.trim();
    // Timestamps such as "2019-03-31T00:00:00" keep only the date part.
    let t = t.split_once('T').map_or(t, |(d, _)| d);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(t, fmt).ok())
}
