//! Image proxy
//!
//! Fetches remote images on behalf of the browser so avatars can be drawn onto
//! canvases without cross-origin taint.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Response, Url};
use thiserror::Error;
use tracing::debug;

/// Image proxy errors
#[derive(Debug, Error)]
pub enum ImageProxyError {
    #[error("Image URL not provided")]
    MissingUrl,

    #[error("Invalid image URL: {0}")]
    InvalidUrl(String),

    #[error("Image host returned {0}")]
    UpstreamStatus(u16),

    #[error("HTTP error: {0}")]
    Http(String),
}

/// Some image hosts refuse requests without a browser user agent
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// An upstream image ready to be streamed back
#[derive(Debug)]
pub struct ProxiedImage {
    pub content_type: String,
    pub response: Response,
}

#[derive(Debug, Clone)]
pub struct ImageProxyService {
    client: Client,
}

impl ImageProxyService {
    pub fn new(timeout: Duration) -> Result<Self, ImageProxyError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ImageProxyError::Http(e.to_string()))?;
        Ok(Self { client })
    }

    /// Fetch `raw_url`, returning the open response and its content type
    pub async fn fetch(&self, raw_url: Option<&str>) -> Result<ProxiedImage, ImageProxyError> {
        let url = parse_image_url(raw_url)?;
        debug!("Proxying image {}", url);

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .send()
            .await
            .map_err(|e| ImageProxyError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImageProxyError::UpstreamStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_string();

        Ok(ProxiedImage {
            content_type,
            response,
        })
    }
}

/// Accept only absolute http(s) URLs
pub fn parse_image_url(raw_url: Option<&str>) -> Result<Url, ImageProxyError> {
    let raw = raw_url
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ImageProxyError::MissingUrl)?;

    let url = Url::parse(raw).map_err(|e| ImageProxyError::InvalidUrl(format!("{raw}: {e}")))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        scheme => Err(ImageProxyError::InvalidUrl(format!(
            "unsupported scheme '{scheme}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_rejected() {
        assert!(matches!(parse_image_url(None), Err(ImageProxyError::MissingUrl)));
        assert!(matches!(
            parse_image_url(Some("   ")),
            Err(ImageProxyError::MissingUrl)
        ));
    }

    #[test]
    fn test_non_http_schemes_rejected() {
        for raw in ["file:///etc/passwd", "ftp://example.com/a.png", "data:image/png;base64,AAAA"] {
            assert!(
                matches!(parse_image_url(Some(raw)), Err(ImageProxyError::InvalidUrl(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(matches!(
            parse_image_url(Some("/images/avatar.png")),
            Err(ImageProxyError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_https_url_accepted() {
        let url = parse_image_url(Some(
            "https://avatars.githubusercontent.com/u/583231?v=4",
        ))
        .unwrap();
        assert_eq!(url.host_str(), Some("avatars.githubusercontent.com"));
        assert_eq!(url.query(), Some("v=4"));
    }
}
