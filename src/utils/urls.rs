use anyhow::{Error, anyhow};
use url::{ParseError, Url};

pub fn to_url(host: &str) -> Result<Url, ParseError> {
    Url::parse(host)
}

/// Validates a backend origin and strips trailing slashes so paths can be
/// appended with a single `/`.
pub fn normalize_base_url(raw: &str) -> Result<String, Error> {
    let trimmed = raw.trim();
    let url = to_url(trimmed).map_err(|e| anyhow!("invalid base url {:?}: {}", trimmed, e))?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(anyhow!("unsupported scheme {:?} in base url", other)),
    }
    if url.host_str().is_none() {
        return Err(anyhow!("base url {:?} has no host", trimmed));
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
