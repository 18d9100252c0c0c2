//! Target-URL validation.
//!
//! Rejects dangerous schemes before a URL is accepted as a redirect target.

use url::Url;

use crate::errors::{LinkforgeError, Result};

const DANGEROUS_SCHEMES: &[&str] = &[
    "javascript:",
    "data:",
    "file:",
    "vbscript:",
    "about:",
    "blob:",
];

/// Validates a redirect target.
///
/// Checks: not empty, no dangerous scheme, http/https only, parseable.
pub fn validate_url(url: &str) -> Result<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(LinkforgeError::validation("URL cannot be empty"));
    }

    let url_lower = url.to_lowercase();

    for scheme in DANGEROUS_SCHEMES {
        if url_lower.starts_with(scheme) {
            return Err(LinkforgeError::validation(format!(
                "Dangerous URL scheme blocked: {}",
                scheme
            )));
        }
    }

    if !url_lower.starts_with("http://") && !url_lower.starts_with("https://") {
        return Err(LinkforgeError::validation(
            "URL must start with http:// or https://",
        ));
    }

    Url::parse(url)
        .map_err(|e| LinkforgeError::validation(format!("Invalid URL format: {}", e)))?;

    Ok(())
}
