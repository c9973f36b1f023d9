//! Enricher core: pure state machine, panel regions and view-model helpers.
mod chart;
mod effect;
mod msg;
mod panel;
mod state;
mod types;
mod update;
mod view_model;

pub use chart::{ChartColors, ChartCommand, ChartId, ChartSpec, CHART_TITLE, DATASET_LABEL};
pub use effect::Effect;
pub use msg::Msg;
pub use panel::{NO_LINKS_TEXT, NO_SUMMARY_TEXT, NO_TRANSLATION_TEXT};
pub use state::{
    AppState, Phase, RunFailure, STATUS_COMPLETE, STATUS_NO_CONTENT, STATUS_PROCESSING,
    STATUS_SCRAPING,
};
pub use types::{
    EnrichmentRequest, EnrichmentResponse, ExtractionResult, Language, RunId, TabCapture,
    UnknownLanguage, WordFrequencies,
};
pub use update::update;
pub use view_model::{ChartView, LinksView, PanelViewModel};
