//! Enricher engine: page capture, the enrichment client and effect execution.
mod client;
mod decode;
mod engine;
mod extract;
mod fetch;
mod types;

pub use client::{
    ClientSettings, EnrichmentClient, ReqwestEnrichmentClient, DEFAULT_ENDPOINT,
    PROCESSING_FAILED,
};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use engine::{ChannelEventSink, EngineHandle, EventSink};
pub use extract::{DocumentExtractor, Extractor};
pub use fetch::{ActiveTab, FetchSettings, FetchedTab, StaticTab, TabSource};
pub use types::{EngineEvent, EnrichError, EnrichFailureKind, TabError, TabFailureKind};
