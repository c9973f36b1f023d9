use reqwest::header::CONTENT_TYPE;
use url::Url;

use enricher_core::{EnrichmentRequest, EnrichmentResponse};
use enricher_logging::{enricher_debug, enricher_info};

use crate::{EnrichError, EnrichFailureKind};

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/process";

/// Shown when the service fails without saying why.
pub const PROCESSING_FAILED: &str = "Processing failed";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user_agent: concat!("enricher/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// One request, one response. No retries.
#[async_trait::async_trait]
pub trait EnrichmentClient: Send + Sync {
    async fn submit(&self, request: &EnrichmentRequest)
        -> Result<EnrichmentResponse, EnrichError>;
}

/// `POST`s the request as JSON to the configured endpoint.
///
/// Transport timeouts are left at reqwest's defaults.
#[derive(Debug, Clone)]
pub struct ReqwestEnrichmentClient {
    endpoint: Url,
    client: reqwest::Client,
}

impl ReqwestEnrichmentClient {
    pub fn new(settings: ClientSettings) -> Result<Self, EnrichError> {
        let endpoint = Url::parse(&settings.endpoint).map_err(|err| {
            EnrichError::new(
                EnrichFailureKind::InvalidRequest,
                format!("invalid endpoint {:?}: {err}", settings.endpoint),
            )
        })?;
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent)
            .build()
            .map_err(|err| EnrichError::new(EnrichFailureKind::Transport, err.to_string()))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl EnrichmentClient for ReqwestEnrichmentClient {
    async fn submit(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<EnrichmentResponse, EnrichError> {
        let body = serde_json::to_vec(request)
            .map_err(|err| EnrichError::new(EnrichFailureKind::InvalidRequest, err.to_string()))?;
        enricher_debug!(
            "POST {} language={} url={} body_len={}",
            self.endpoint,
            request.language,
            request.url,
            body.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;
        enricher_info!("Enrichment service answered {} ({} bytes)", status, text.len());

        if !status.is_success() {
            let message = error_field(&text).unwrap_or_else(|| PROCESSING_FAILED.to_string());
            return Err(EnrichError::new(
                EnrichFailureKind::Service {
                    status: status.as_u16(),
                },
                message,
            ));
        }

        serde_json::from_str(&text)
            .map_err(|err| EnrichError::new(EnrichFailureKind::Decode, err.to_string()))
    }
}

/// The `error` string of a JSON failure body, if there is one.
fn error_field(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .as_str()
        .filter(|message| !message.is_empty())
        .map(ToOwned::to_owned)
}

fn transport_error(err: reqwest::Error) -> EnrichError {
    EnrichError::new(EnrichFailureKind::Transport, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_field_requires_a_non_empty_string() {
        assert_eq!(error_field(r#"{"error": "bad input"}"#).as_deref(), Some("bad input"));
        assert_eq!(error_field(r#"{"error": ""}"#), None);
        assert_eq!(error_field(r#"{"error": 42}"#), None);
        assert_eq!(error_field("<html>502</html>"), None);
    }

    #[test]
    fn rejects_unparseable_endpoint() {
        let err = ReqwestEnrichmentClient::new(ClientSettings {
            endpoint: "not a url".to_string(),
            ..ClientSettings::default()
        })
        .unwrap_err();
        assert_eq!(err.kind, EnrichFailureKind::InvalidRequest);
    }
}
