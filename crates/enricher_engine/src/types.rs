use std::fmt;

use enricher_core::{EnrichmentResponse, RunId, TabCapture};

/// Completion reported by the engine worker for one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ExtractionCompleted {
        run_id: RunId,
        result: Result<TabCapture, TabError>,
    },
    EnrichmentCompleted {
        run_id: RunId,
        result: Result<EnrichmentResponse, EnrichError>,
    },
}

/// Failure to obtain the active tab's markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TabError {
    pub kind: TabFailureKind,
    pub message: String,
}

impl TabError {
    pub(crate) fn new(kind: TabFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabFailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Decode,
    Network,
}

impl fmt::Display for TabFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabFailureKind::InvalidUrl => write!(f, "invalid url"),
            TabFailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            TabFailureKind::Timeout => write!(f, "timeout"),
            TabFailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            TabFailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "page too large (max {max_bytes}, actual {actual:?})")
            }
            TabFailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            TabFailureKind::Decode => write!(f, "undecodable page"),
            TabFailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Failure of the single enrichment request. `message` is what the user sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EnrichError {
    pub kind: EnrichFailureKind,
    pub message: String,
}

impl EnrichError {
    pub(crate) fn new(kind: EnrichFailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichFailureKind {
    /// Endpoint or body could not be turned into a request.
    InvalidRequest,
    /// Non-success HTTP status.
    Service { status: u16 },
    /// Connection, DNS or timeout failure.
    Transport,
    /// Success status but the body was not a JSON response.
    Decode,
}
