use crate::chart::ChartCommand;
use crate::panel::Panel;
use crate::view_model::PanelViewModel;
use crate::{EnrichmentResponse, Language, RunId};

pub const STATUS_SCRAPING: &str = "Scraping website...";
pub const STATUS_PROCESSING: &str = "Processing content...";
pub const STATUS_COMPLETE: &str = "Processing complete!";
pub const STATUS_NO_CONTENT: &str = "No content scraped";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Scraping,
    Processing,
    Complete,
    Failed,
}

impl Phase {
    /// A run is waiting on the extraction agent or the service.
    pub fn is_busy(self) -> bool {
        matches!(self, Phase::Scraping | Phase::Processing)
    }
}

/// Why a run ended in `Failed`. Only ever surfaced through the status line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunFailure {
    /// Extraction yielded no content or markup.
    EmptyCapture,
    /// The service rejected the request; message shown verbatim.
    Service(String),
    /// Network or parse failure; the underlying error text.
    Transport(String),
}

impl RunFailure {
    pub fn status_text(&self) -> String {
        match self {
            RunFailure::EmptyCapture => STATUS_NO_CONTENT.to_string(),
            RunFailure::Service(message) | RunFailure::Transport(message) => {
                format!("Error: {message}")
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ActiveRun {
    run_id: RunId,
    language: Language,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    capture_enabled: bool,
    language: Language,
    phase: Phase,
    active_run: Option<ActiveRun>,
    last_run_id: RunId,
    panel: Panel,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel {
            capture_enabled: self.capture_enabled,
            process_enabled: self.capture_enabled && !self.phase.is_busy(),
            language: self.language,
            phase: self.phase,
            status: self.panel.status().cloned(),
            links: self.panel.links().clone(),
            summary: self.panel.summary().cloned(),
            translation: self.panel.translation().cloned(),
            chart: self.panel.chart_view(),
            graph_url: self.panel.graph_url().cloned(),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn capture_enabled(&self) -> bool {
        self.capture_enabled
    }

    /// The run whose completions are still accepted, if any.
    pub fn current_run(&self) -> Option<RunId> {
        self.active_run.map(|run| run.run_id)
    }

    pub(crate) fn is_current_run(&self, run_id: RunId) -> bool {
        self.current_run() == Some(run_id)
    }

    pub(crate) fn run_language(&self) -> Language {
        self.active_run
            .map(|run| run.language)
            .unwrap_or(self.language)
    }

    pub(crate) fn enable_capture(&mut self) {
        if !self.capture_enabled {
            self.capture_enabled = true;
            self.mark_dirty();
        }
    }

    /// Back to `Idle`: forgets the current run and resets every region.
    pub(crate) fn disable_capture(&mut self) -> Vec<ChartCommand> {
        self.capture_enabled = false;
        self.phase = Phase::Idle;
        self.active_run = None;
        self.mark_dirty();
        self.panel.reset()
    }

    pub(crate) fn select_language(&mut self, language: Language) {
        if self.language != language {
            self.language = language;
            self.mark_dirty();
        }
    }

    /// Allocates a run id and snapshots the selected language for it.
    pub(crate) fn begin_run(&mut self) -> RunId {
        self.last_run_id += 1;
        let run_id = self.last_run_id;
        self.active_run = Some(ActiveRun {
            run_id,
            language: self.language,
        });
        self.phase = Phase::Scraping;
        self.panel.set_status(STATUS_SCRAPING);
        self.mark_dirty();
        run_id
    }

    pub(crate) fn enter_processing(&mut self) {
        self.phase = Phase::Processing;
        self.panel.set_status(STATUS_PROCESSING);
        self.mark_dirty();
    }

    pub(crate) fn complete_run(&mut self, response: &EnrichmentResponse) -> Vec<ChartCommand> {
        let language = self.run_language();
        self.phase = Phase::Complete;
        self.active_run = None;
        self.panel.set_status(STATUS_COMPLETE);
        self.mark_dirty();
        self.panel.apply_response(response, language)
    }

    pub(crate) fn fail_run(&mut self, failure: &RunFailure) {
        self.phase = Phase::Failed;
        self.active_run = None;
        self.panel.set_status(failure.status_text());
        self.mark_dirty();
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
