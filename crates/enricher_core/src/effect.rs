use crate::{ChartCommand, EnrichmentRequest, RunId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Ask the extraction agent for the active tab's content.
    ExtractActiveTab { run_id: RunId },
    /// Send one request to the enrichment service.
    SubmitEnrichment {
        run_id: RunId,
        request: EnrichmentRequest,
    },
    /// Create or destroy the frequency chart instance.
    Chart(ChartCommand),
}
