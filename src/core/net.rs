use std::sync::Arc;

use url::Url;

use crate::core::{
    BankClient, BankError,
    client::{CacheMode, RetryConfig},
};

/// Read the response body as text, replacing invalid UTF-8 (the SBA extracts are not always clean).
/// In `test-mode`, if `BF_RECORD=1`, the body is saved as a fixture (see [`record`]).
pub(crate) async fn get_text(
    resp: reqwest::Response,
    _endpoint: &str,
    _key: &str,
    _ext: &str,
) -> Result<String, reqwest::Error> {
    let bytes = resp.bytes().await?;
    let text = String::from_utf8_lossy(&bytes).into_owned();

    #[cfg(feature = "test-mode")]
    {
        if std::env::var("BF_RECORD").ok().as_deref() == Some("1")
            && let Err(e) = record(_endpoint, _key, _ext, &text)
        {
            tracing::warn!(endpoint = _endpoint, key = _key, error = %e, "failed to record fixture");
        }
    }

    Ok(text)
}

/// Writes `body` to `{BF_FIXDIR}/{endpoint}_{key}.{ext}`, defaulting to `tests/fixtures`.
///
/// Paged listings pass `{endpoint}_{offset}` for every page after the first, so a
/// multi-page fetch records one file per page, e.g. `locations_CERT-3511.json` then
/// `locations_10000_CERT-3511.json`.
#[cfg(feature = "test-mode")]
fn record(endpoint: &str, key: &str, ext: &str, body: &str) -> std::io::Result<()> {
    let dir = std::env::var_os("BF_FIXDIR").map_or_else(
        || std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"),
        std::path::PathBuf::from,
    );
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(format!("{endpoint}_{key}.{ext}"));
    std::fs::write(&path, body)?;
    tracing::debug!(path = %path.display(), "recorded fixture");
    Ok(())
}

/// GET `url` through the cache and retry policy, failing on any non-2xx status.
///
/// `endpoint`, `key` and `ext` only name the recorded fixture.
pub(crate) async fn fetch_text(
    client: &BankClient,
    url: &Url,
    endpoint: &str,
    key: &str,
    ext: &str,
    cache_mode: CacheMode,
    retry_override: Option<&RetryConfig>,
) -> Result<Arc<str>, BankError> {
    if cache_mode == CacheMode::Use
        && let Some(body) = client.cache_get(url).await
    {
        tracing::debug!(%url, "cache hit");
        return Ok(body);
    }

    tracing::debug!(%url, "GET");
    let resp = client.send_with_retry(url, retry_override).await?;
    if !resp.status().is_success() {
        return Err(BankError::Status {
            status: resp.status().as_u16(),
            url: url.to_string(),
        });
    }

    let body: Arc<str> = get_text(resp, endpoint, key, ext).await?.into();

    if cache_mode != CacheMode::Bypass {
        client.cache_put(url, body.clone(), None).await;
    }

    Ok(body)
}
