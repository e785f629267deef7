use std::{path::Path, time::Duration};

use crate::error::Result;

/// Timeout for a single document download.
const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Build the HTTP client used for document downloads.
pub fn client() -> Result<reqwest::blocking::Client> {
    Ok(reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()?)
}

/// Download `url` and store its body at `dest`, replacing any previous
/// copy. Line endings are normalized so the cached file always uses `\n`.
///
/// Any failure leaves the previous cached copy untouched: the body is
/// fully received before the file is written.
pub fn download_to_file(
    client: &reqwest::blocking::Client,
    url: &str,
    dest: &Path,
) -> Result<()> {
    let body = client.get(url).send()?.error_for_status()?.text()?;
    std::fs::write(dest, body.replace("\r\n", "\n"))?;
    Ok(())
}
