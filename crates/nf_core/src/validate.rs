use url::Url;

use crate::error::{Error, Result};

pub const MAX_URL_LENGTH: usize = 2048;

/// Syntactic gatekeeping before any network activity. Accepts only
/// http/https URLs with a host.
pub fn validate_url(raw: &str) -> Result<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::InvalidUrl("URL cannot be empty".to_string()));
    }
    if raw.len() > MAX_URL_LENGTH {
        return Err(Error::InvalidUrl(format!(
            "URL is too long (max {} characters)",
            MAX_URL_LENGTH
        )));
    }

    let parsed =
        Url::parse(raw).map_err(|e| Error::InvalidUrl(format!("failed to parse URL: {}", e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(Error::InvalidUrl(format!(
                "URL must start with http:// or https://, got scheme '{}'",
                other
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(Error::InvalidUrl(
            "URL must include a domain name".to_string(),
        ));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(validate_url("https://example.com/article").is_ok());
        assert!(validate_url("http://example.com").is_ok());
    }

    #[test]
    fn test_rejects_plain_text() {
        let err = validate_url("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_rejects_other_schemes() {
        assert!(validate_url("ftp://example.com/file").is_err());
        assert!(validate_url("file:///etc/passwd").is_err());
    }

    #[test]
    fn test_rejects_empty_and_hostless() {
        assert!(validate_url("").is_err());
        assert!(validate_url("   ").is_err());
        assert!(validate_url("http://").is_err());
    }

    #[test]
    fn test_rejects_overlong_url() {
        let long = format!("https://example.com/{}", "a".repeat(MAX_URL_LENGTH));
        assert!(validate_url(&long).is_err());
    }
}
