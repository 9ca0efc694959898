//! Shared outbound HTTP client construction.

use std::time::Duration;

use reqwest::Url;

use booking_core::error::{AppError, ErrorKind};
use booking_core::result::AppResult;

/// Build a reqwest client whose every request is bounded by `timeout`.
pub fn build_client(timeout: Duration) -> AppResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout)
        .build()
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to build HTTP client: {e}"),
                e,
            )
        })
}

/// Append `segments` to the path of `base`.
///
/// Each segment is percent-encoded on its own, so an identifier holding
/// `/`, `?` or `..` stays a single path segment.
pub(crate) fn resource_url(base: &str, segments: &[&str]) -> AppResult<Url> {
    let mut url = Url::parse(base).map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Invalid service URL {base}: {e}"),
            e,
        )
    })?;
    url.path_segments_mut()
        .map_err(|_| AppError::configuration(format!("Service URL {base} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}
