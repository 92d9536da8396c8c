//! URL validation and normalization.
//!
//! Incoming original URLs are brought to a canonical form before they reach
//! storage, so the same destination always maps to the same stored string.

use url::Url;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("only http and https URLs are allowed")]
    UnsupportedScheme,
}

/// Normalizes an original URL to a canonical form.
///
/// Leading/trailing whitespace is trimmed, the scheme and host are
/// lowercased, default ports are dropped, and the fragment is removed.
/// Query parameters and path case are preserved. Schemes other than `http`
/// and `https` (including `javascript:` and `data:`) are rejected.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::InvalidFormat`] for unparseable input
/// and [`UrlNormalizationError::UnsupportedScheme`] for non-HTTP(S) schemes.
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let mut url = Url::parse(input.trim())
        .map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlNormalizationError::UnsupportedScheme),
    }

    url.set_fragment(None);

    Ok(url.into())
}
