use enricher_engine::{FetchSettings, FetchedTab, StaticTab, TabFailureKind, TabSource};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn fetched_tab_returns_decoded_markup_and_final_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("Location", format!("{}/doc", server.uri())),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            b"<html><body>caf\xe9</body></html>".to_vec(),
            "text/html; charset=ISO-8859-1",
        ))
        .mount(&server)
        .await;

    let tab = FetchedTab::new(format!("{}/old", server.uri()), FetchSettings::default());
    let active = tab.active_tab().await.expect("fetch ok");

    assert_eq!(active.url, format!("{}/doc", server.uri()));
    assert_eq!(active.html, "<html><body>café</body></html>");
}

#[tokio::test]
async fn fetched_tab_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tab = FetchedTab::new(format!("{}/missing", server.uri()), FetchSettings::default());
    let err = tab.active_tab().await.unwrap_err();
    assert_eq!(err.kind, TabFailureKind::HttpStatus(404));
}

#[tokio::test]
async fn fetched_tab_rejects_non_html() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let tab = FetchedTab::new(format!("{}/data.json", server.uri()), FetchSettings::default());
    let err = tab.active_tab().await.unwrap_err();
    assert_eq!(
        err.kind,
        TabFailureKind::UnsupportedContentType {
            content_type: "application/json".to_string()
        }
    );
}

#[tokio::test]
async fn fetched_tab_rejects_too_large_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("01234567890", "text/html"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let tab = FetchedTab::new(format!("{}/large", server.uri()), settings);
    let err = tab.active_tab().await.unwrap_err();
    assert_eq!(
        err.kind,
        TabFailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}

#[tokio::test]
async fn invalid_url_is_reported() {
    let tab = FetchedTab::new("not a url", FetchSettings::default());
    let err = tab.active_tab().await.unwrap_err();
    assert_eq!(err.kind, TabFailureKind::InvalidUrl);
}

#[tokio::test]
async fn static_tab_serves_fixed_markup() {
    let tab = StaticTab::new("https://example.com/", "<p>hi</p>");
    let active = tab.active_tab().await.unwrap();
    assert_eq!(active.url, "https://example.com/");
    assert_eq!(active.html, "<p>hi</p>");
}
