//! Bounded HTTP fetch with failure classification.

use std::time::Duration;

use nf_core::AcquisitionError;
use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Browser-like identity; bare library UAs get blocked by many news sites.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);
const MAX_REDIRECTS: usize = 10;

/// A fetched page: the final URL after redirects plus the raw HTML payload.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: String,
    pub html: String,
}

pub fn build_client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .timeout(FETCH_TIMEOUT)
        .build()
}

pub async fn fetch_page(client: &Client, url: &str) -> Result<Page, AcquisitionError> {
    debug!("fetching {}", url);
    let response = client.get(url).send().await.map_err(classify_transport)?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(AcquisitionError::Forbidden(format!(
            "{} returned {} (possible paywall)",
            url, status
        )));
    }
    if status == StatusCode::NOT_FOUND {
        return Err(AcquisitionError::NotFound(format!("{} returned 404", url)));
    }
    if !status.is_success() {
        return Err(AcquisitionError::Network(format!(
            "{} returned unexpected status {}",
            url, status
        )));
    }

    if let Some(content_type) = response.headers().get(CONTENT_TYPE) {
        let value = content_type.to_str().unwrap_or_default().to_string();
        classify_content_type(&value)?;
    }

    let final_url = response.url().to_string();
    let html = response.text().await.map_err(classify_transport)?;
    Ok(Page {
        url: final_url,
        html,
    })
}

fn classify_transport(err: reqwest::Error) -> AcquisitionError {
    if err.is_timeout() {
        AcquisitionError::Network(format!("request timed out: {}", err))
    } else if err.is_connect() {
        AcquisitionError::Network(format!("connection failed: {}", err))
    } else {
        AcquisitionError::Network(err.to_string())
    }
}

/// Rejects content types that cannot yield article text. Parameters after
/// the media type (charset etc.) are ignored.
pub fn classify_content_type(value: &str) -> Result<(), AcquisitionError> {
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    let unsupported = mime == "application/pdf"
        || mime == "application/octet-stream"
        || mime.starts_with("video/")
        || mime.starts_with("audio/")
        || mime.starts_with("image/");
    if unsupported {
        return Err(AcquisitionError::UnsupportedContent(mime));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_content_type_is_unsupported() {
        let err = classify_content_type("application/pdf").unwrap_err();
        assert!(matches!(err, AcquisitionError::UnsupportedContent(_)));
    }

    #[test]
    fn test_media_content_types_are_unsupported() {
        assert!(classify_content_type("video/mp4").is_err());
        assert!(classify_content_type("audio/mpeg").is_err());
        assert!(classify_content_type("image/png").is_err());
        assert!(classify_content_type("application/octet-stream").is_err());
    }

    #[test]
    fn test_html_content_types_pass() {
        assert!(classify_content_type("text/html").is_ok());
        assert!(classify_content_type("text/html; charset=utf-8").is_ok());
        assert!(classify_content_type("application/xhtml+xml").is_ok());
        assert!(classify_content_type("text/plain").is_ok());
    }

    #[test]
    fn test_parameters_and_case_are_ignored() {
        assert!(classify_content_type("Application/PDF; name=paper.pdf").is_err());
    }
}
