use enricher_logging::{enricher_debug, enricher_info, enricher_warn};

use crate::{
    AppState, EnrichmentRequest, EnrichmentResponse, Effect, Msg, RunFailure, RunId, TabCapture,
};

/// Pure update function: applies a message to state and returns any effects.
///
/// This is the only place state changes; toggle, trigger and IO completions
/// all arrive here as messages.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::CaptureToggled(true) => {
            state.enable_capture();
            Vec::new()
        }
        Msg::CaptureToggled(false) => {
            if let Some(run_id) = state.current_run() {
                enricher_info!("Capture disabled; abandoning run {}", run_id);
            }
            state
                .disable_capture()
                .into_iter()
                .map(Effect::Chart)
                .collect()
        }
        Msg::LanguageSelected(language) => {
            state.select_language(language);
            Vec::new()
        }
        Msg::ProcessClicked => start_run(&mut state),
        Msg::PageExtracted { run_id, outcome } => {
            if !accepts(&state, run_id, "extraction") {
                return (state, Vec::new());
            }
            on_page_extracted(&mut state, run_id, outcome)
        }
        Msg::EnrichmentFinished { run_id, outcome } => {
            if !accepts(&state, run_id, "enrichment") {
                return (state, Vec::new());
            }
            on_enrichment_finished(&mut state, run_id, outcome)
        }
    };

    (state, effects)
}

fn start_run(state: &mut AppState) -> Vec<Effect> {
    if !state.capture_enabled() {
        enricher_debug!("Process ignored: capture is off");
        return Vec::new();
    }
    if state.phase().is_busy() {
        enricher_warn!(
            "Process ignored: run {:?} still {:?}",
            state.current_run(),
            state.phase()
        );
        return Vec::new();
    }

    let run_id = state.begin_run();
    enricher_info!("Run {} started ({})", run_id, state.run_language());
    vec![Effect::ExtractActiveTab { run_id }]
}

fn accepts(state: &AppState, run_id: RunId, what: &str) -> bool {
    let current = state.is_current_run(run_id);
    if !current {
        enricher_debug!(
            "Dropping stale {} result for run {} (current {:?})",
            what,
            run_id,
            state.current_run()
        );
    }
    current
}

fn on_page_extracted(
    state: &mut AppState,
    run_id: RunId,
    outcome: Result<TabCapture, String>,
) -> Vec<Effect> {
    let capture = match outcome {
        Ok(capture) => capture,
        Err(message) => {
            enricher_warn!("Run {} extraction failed: {}", run_id, message);
            state.fail_run(&RunFailure::Transport(message));
            return Vec::new();
        }
    };

    let Some((content, html)) = capture.extraction.into_parts() else {
        enricher_info!("Run {} captured nothing from {}", run_id, capture.url);
        state.fail_run(&RunFailure::EmptyCapture);
        return Vec::new();
    };

    state.enter_processing();
    let request = EnrichmentRequest {
        content,
        html,
        language: state.run_language(),
        url: capture.url,
    };
    vec![Effect::SubmitEnrichment { run_id, request }]
}

fn on_enrichment_finished(
    state: &mut AppState,
    run_id: RunId,
    outcome: Result<EnrichmentResponse, RunFailure>,
) -> Vec<Effect> {
    let response = match outcome {
        Ok(response) => response,
        Err(failure) => {
            enricher_warn!("Run {} failed: {:?}", run_id, failure);
            state.fail_run(&failure);
            return Vec::new();
        }
    };

    if let Some(message) = response.error.as_deref().filter(|m| !m.is_empty()) {
        enricher_warn!("Run {} rejected by service: {}", run_id, message);
        state.fail_run(&RunFailure::Service(message.to_string()));
        return Vec::new();
    }

    enricher_info!(
        "Run {} complete (batch {})",
        run_id,
        response.batch_id.as_deref().unwrap_or("-")
    );
    state
        .complete_run(&response)
        .into_iter()
        .map(Effect::Chart)
        .collect()
}
