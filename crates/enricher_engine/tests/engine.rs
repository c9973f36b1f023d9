use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use enricher_core::{EnrichmentRequest, EnrichmentResponse, Language};
use enricher_engine::{
    ChannelEventSink, EngineEvent, EngineHandle, EnrichError, EnrichmentClient, StaticTab,
};

#[derive(Default)]
struct RecordingClient {
    seen: Mutex<Vec<EnrichmentRequest>>,
}

#[async_trait::async_trait]
impl EnrichmentClient for RecordingClient {
    async fn submit(
        &self,
        request: &EnrichmentRequest,
    ) -> Result<EnrichmentResponse, EnrichError> {
        self.seen.lock().unwrap().push(request.clone());
        Ok(EnrichmentResponse {
            summary: Some(format!("{} chars", request.content.len())),
            ..EnrichmentResponse::default()
        })
    }
}

fn engine(client: Arc<RecordingClient>) -> (EngineHandle, mpsc::Receiver<EngineEvent>) {
    let (tx, rx) = mpsc::channel();
    let tab = StaticTab::new("https://example.com/", "<html><body><p>hello</p></body></html>");
    let handle = EngineHandle::new(Arc::new(tab), client, Arc::new(ChannelEventSink::new(tx)))
        .expect("engine runtime");
    (handle, rx)
}

#[test]
fn extract_reports_capture_for_the_run() {
    let (handle, rx) = engine(Arc::new(RecordingClient::default()));
    handle.extract(7);

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    match event {
        EngineEvent::ExtractionCompleted { run_id, result } => {
            assert_eq!(run_id, 7);
            let capture = result.expect("capture");
            assert_eq!(capture.url, "https://example.com/");
            assert_eq!(capture.extraction.content.as_deref(), Some("hello"));
            assert!(capture.extraction.html.is_some());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn submit_forwards_request_to_client() {
    let client = Arc::new(RecordingClient::default());
    let (handle, rx) = engine(client.clone());
    let request = EnrichmentRequest {
        content: "hello".to_string(),
        html: "<p>hello</p>".to_string(),
        language: Language::Fr,
        url: "https://example.com/".to_string(),
    };
    handle.submit(3, request.clone());

    let event = rx.recv_timeout(Duration::from_secs(5)).expect("event");
    match event {
        EngineEvent::EnrichmentCompleted { run_id, result } => {
            assert_eq!(run_id, 3);
            assert_eq!(result.unwrap().summary.as_deref(), Some("5 chars"));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(client.seen.lock().unwrap().as_slice(), &[request]);
}

#[test]
fn runtime_is_running_when_the_handle_is_returned() {
    let (handle, rx) = engine(Arc::new(RecordingClient::default()));
    let clone = handle.clone();
    drop(handle);

    clone.extract(1);
    clone.extract(2);

    let mut runs: Vec<_> = (0..2)
        .map(|_| match rx.recv_timeout(Duration::from_secs(5)).expect("event") {
            EngineEvent::ExtractionCompleted { run_id, result } => {
                assert!(result.is_ok());
                run_id
            }
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    runs.sort_unstable();
    assert_eq!(runs, vec![1, 2]);
}
