use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;

use enricher_logging::enricher_debug;

use crate::decode::decode_page;
use crate::{TabError, TabFailureKind};

/// The page currently shown in the active tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveTab {
    pub url: String,
    pub html: String,
}

/// Where the extraction agent reads the active tab from.
#[async_trait::async_trait]
pub trait TabSource: Send + Sync {
    async fn active_tab(&self) -> Result<ActiveTab, TabError>;
}

/// A tab whose markup is fixed up front.
#[derive(Debug, Clone)]
pub struct StaticTab {
    tab: ActiveTab,
}

impl StaticTab {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            tab: ActiveTab {
                url: url.into(),
                html: html.into(),
            },
        }
    }
}

#[async_trait::async_trait]
impl TabSource for StaticTab {
    async fn active_tab(&self) -> Result<ActiveTab, TabError> {
        Ok(self.tab.clone())
    }
}

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 5 * 1024 * 1024,
            allowed_content_types: vec![
                "text/html".to_string(),
                "application/xhtml+xml".to_string(),
            ],
        }
    }
}

/// Terminal stand-in for a browser tab: the page is downloaded on each capture.
///
/// The reported tab URL is the final URL after redirects.
#[derive(Debug, Clone)]
pub struct FetchedTab {
    url: String,
    settings: FetchSettings,
}

impl FetchedTab {
    pub fn new(url: impl Into<String>, settings: FetchSettings) -> Self {
        Self {
            url: url.into(),
            settings,
        }
    }

    fn build_client(&self) -> Result<reqwest::Client, TabError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(reqwest::redirect::Policy::limited(
                self.settings.redirect_limit,
            ))
            .build()
            .map_err(|err| TabError::new(TabFailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    fn too_large(&self, actual: u64) -> TabError {
        TabError::new(
            TabFailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            format!("page exceeds {} bytes", self.settings.max_bytes),
        )
    }
}

#[async_trait::async_trait]
impl TabSource for FetchedTab {
    async fn active_tab(&self) -> Result<ActiveTab, TabError> {
        let parsed = reqwest::Url::parse(&self.url)
            .map_err(|err| TabError::new(TabFailureKind::InvalidUrl, err.to_string()))?;
        let client = self.build_client()?;

        let response = client.get(parsed).send().await.map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TabError::new(
                TabFailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let final_url = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(TabError::new(
                    TabFailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    format!("cannot capture {ct} content"),
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        let decoded = decode_page(&bytes, content_type.as_deref())
            .map_err(|err| TabError::new(TabFailureKind::Decode, err.to_string()))?;
        enricher_debug!(
            "Captured {} ({} bytes, {})",
            final_url,
            bytes.len(),
            decoded.encoding
        );

        Ok(ActiveTab {
            url: final_url,
            html: decoded.html,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> TabError {
    if err.is_timeout() {
        return TabError::new(TabFailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return TabError::new(TabFailureKind::RedirectLimitExceeded, err.to_string());
    }
    TabError::new(TabFailureKind::Network, err.to_string())
}
