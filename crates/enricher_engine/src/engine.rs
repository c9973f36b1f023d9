use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use enricher_core::{EnrichmentRequest, RunId, TabCapture};
use enricher_logging::enricher_error;

use crate::client::EnrichmentClient;
use crate::extract::{DocumentExtractor, Extractor};
use crate::fetch::TabSource;
use crate::EngineEvent;

/// Receives engine completions; called from the engine's runtime threads.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    Extract {
        run_id: RunId,
    },
    Submit {
        run_id: RunId,
        request: EnrichmentRequest,
    },
}

struct Collaborators {
    tab_source: Arc<dyn TabSource>,
    extractor: DocumentExtractor,
    client: Arc<dyn EnrichmentClient>,
    sink: Arc<dyn EventSink>,
}

/// Runs extraction and enrichment off the caller's thread.
///
/// Each command produces exactly one event on the sink. Nothing is cancelled;
/// the state machine decides whether a late event still matters.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    /// Builds the worker runtime up front so a failure reaches the caller
    /// instead of leaving every later command unanswered.
    pub fn new(
        tab_source: Arc<dyn TabSource>,
        client: Arc<dyn EnrichmentClient>,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let collaborators = Arc::new(Collaborators {
            tab_source,
            extractor: DocumentExtractor,
            client,
            sink,
        });

        thread::Builder::new()
            .name("enricher-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let collaborators = collaborators.clone();
                    runtime.spawn(async move {
                        handle_command(collaborators.as_ref(), command).await;
                    });
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn extract(&self, run_id: RunId) {
        self.send(EngineCommand::Extract { run_id }, run_id);
    }

    pub fn submit(&self, run_id: RunId, request: EnrichmentRequest) {
        self.send(EngineCommand::Submit { run_id, request }, run_id);
    }

    fn send(&self, command: EngineCommand, run_id: RunId) {
        if self.cmd_tx.send(command).is_err() {
            enricher_error!("Engine worker is gone; run {} will not complete", run_id);
        }
    }
}

async fn handle_command(collaborators: &Collaborators, command: EngineCommand) {
    let event = match command {
        EngineCommand::Extract { run_id } => {
            let result = collaborators
                .tab_source
                .active_tab()
                .await
                .map(|tab| TabCapture {
                    extraction: collaborators.extractor.extract(&tab.html),
                    url: tab.url,
                });
            EngineEvent::ExtractionCompleted { run_id, result }
        }
        EngineCommand::Submit { run_id, request } => EngineEvent::EnrichmentCompleted {
            run_id,
            result: collaborators.client.submit(&request).await,
        },
    };
    collaborators.sink.emit(event);
}
