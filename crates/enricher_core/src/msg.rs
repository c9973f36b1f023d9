use crate::{EnrichmentResponse, Language, RunFailure, RunId, TabCapture};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User flipped the capture toggle.
    CaptureToggled(bool),
    /// User picked a target language; read when the next run starts.
    LanguageSelected(Language),
    /// User pressed the process button.
    ProcessClicked,
    /// Extraction agent answered for a run. `Err` carries why the tab could not be read.
    PageExtracted {
        run_id: RunId,
        outcome: Result<TabCapture, String>,
    },
    /// Enrichment service answered for a run.
    EnrichmentFinished {
        run_id: RunId,
        outcome: Result<EnrichmentResponse, RunFailure>,
    },
}
