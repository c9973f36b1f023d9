use std::io;
use std::sync::{mpsc, Arc};

use enricher_core::{Effect, Msg, RunFailure};
use enricher_engine::{
    EngineEvent, EngineHandle, EnrichError, EnrichFailureKind, EnrichmentClient, EventSink,
    TabSource,
};
use enricher_logging::enricher_info;

use super::input::Command;
use super::ui::chart::TerminalChart;

/// Executes core effects: IO goes to the engine, chart lifecycle to the surface.
pub struct EffectRunner {
    engine: EngineHandle,
    charts: TerminalChart,
}

impl EffectRunner {
    pub fn new(
        tab_source: Arc<dyn TabSource>,
        client: Arc<dyn EnrichmentClient>,
        commands: mpsc::Sender<Command>,
    ) -> io::Result<Self> {
        let sink = Arc::new(MsgSink { commands });
        Ok(Self {
            engine: EngineHandle::new(tab_source, client, sink)?,
            charts: TerminalChart::default(),
        })
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ExtractActiveTab { run_id } => {
                    enricher_info!("ExtractActiveTab run_id={}", run_id);
                    self.engine.extract(run_id);
                }
                Effect::SubmitEnrichment { run_id, request } => {
                    enricher_info!(
                        "SubmitEnrichment run_id={} url={} content_len={} html_len={}",
                        run_id,
                        request.url,
                        request.content.len(),
                        request.html.len()
                    );
                    self.engine.submit(run_id, request);
                }
                Effect::Chart(command) => self.charts.apply(command),
            }
        }
    }

    pub fn charts(&self) -> &TerminalChart {
        &self.charts
    }
}

/// Feeds engine completions back into the dispatch queue as messages.
struct MsgSink {
    commands: mpsc::Sender<Command>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.commands.send(Command::Dispatch(to_msg(event)));
    }
}

fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ExtractionCompleted { run_id, result } => Msg::PageExtracted {
            run_id,
            outcome: result.map_err(|err| err.message),
        },
        EngineEvent::EnrichmentCompleted { run_id, result } => Msg::EnrichmentFinished {
            run_id,
            outcome: result.map_err(to_failure),
        },
    }
}

fn to_failure(err: EnrichError) -> RunFailure {
    match err.kind {
        EnrichFailureKind::Service { .. } => RunFailure::Service(err.message),
        EnrichFailureKind::Transport
        | EnrichFailureKind::Decode
        | EnrichFailureKind::InvalidRequest => RunFailure::Transport(err.message),
    }
}
