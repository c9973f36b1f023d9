use enricher_core::{EnrichmentRequest, EnrichmentResponse, ExtractionResult, Language};
use pretty_assertions::assert_eq;

#[test]
fn word_frequencies_keep_service_order() {
    let body = r#"{"word_freq_data": {"zebra": 5, "apple": 3, "mango": 1}}"#;
    let response: EnrichmentResponse = serde_json::from_str(body).unwrap();

    let entries: Vec<_> = response
        .word_freq_data
        .unwrap()
        .iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("zebra".to_string(), 5),
            ("apple".to_string(), 3),
            ("mango".to_string(), 1),
        ]
    );
}

#[test]
fn repeated_words_keep_first_position_and_last_count() {
    let body = r#"{"word_freq_data": {"the": 1, "cat": 2, "the": 7}}"#;
    let response: EnrichmentResponse = serde_json::from_str(body).unwrap();

    let entries: Vec<_> = response
        .word_freq_data
        .unwrap()
        .iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    assert_eq!(entries, vec![("the".to_string(), 7), ("cat".to_string(), 2)]);
}

#[test]
fn missing_and_null_fields_are_absent() {
    let response: EnrichmentResponse =
        serde_json::from_str(r#"{"summary": null, "batch_id": "b-1"}"#).unwrap();

    assert_eq!(response.summary, None);
    assert_eq!(response.links, None);
    assert_eq!(response.word_freq_data, None);
    assert_eq!(response.batch_id.as_deref(), Some("b-1"));
}

#[test]
fn request_serializes_language_as_code() {
    let request = EnrichmentRequest {
        content: "hello".to_string(),
        html: "<html>hello</html>".to_string(),
        language: Language::De,
        url: "https://example.com/".to_string(),
    };

    let value = serde_json::to_value(&request).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "content": "hello",
            "html": "<html>hello</html>",
            "language": "de",
            "url": "https://example.com/",
        })
    );
}

#[test]
fn language_codes_parse_case_insensitively() {
    assert_eq!(" ES ".parse::<Language>().unwrap(), Language::Es);
    assert_eq!("hi".parse::<Language>().unwrap().display_name(), "Hindi");
    assert!("xx".parse::<Language>().is_err());
}

#[test]
fn empty_strings_count_as_absent_capture() {
    assert!(ExtractionResult::from_parts("", "<html></html>").is_empty_capture());
    assert!(ExtractionResult::from_parts("text", "").is_empty_capture());
    assert!(!ExtractionResult::from_parts("text", "<html>text</html>").is_empty_capture());
}
