//! Full pipeline against a mock origin.

use std::time::Duration;

use http::Request;
use pretty_assertions::assert_eq;
use reqwest::Client;
use ssibox::{IncludeConfig, Includer};
use ssibox_http::headers::DEPTH_ERROR_HEADER;
use ssibox_http::{ResponseDirectives, request_context};
use ssibox_reqwest::ReqwestFetcher;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn block(url: &str, content: &str) -> String {
    format!("\n<!-- Begin content from {url} -->\n{content}\n<!-- End content from {url} -->\n")
}

fn includer(config: IncludeConfig) -> Includer<ReqwestFetcher, ssibox_moka::MokaBackend> {
    Includer::builder()
        .fetcher(ReqwestFetcher::new(Client::new()))
        .shared(config.shared.build_backend())
        .config(config)
        .build()
}

#[tokio::test]
async fn test_cacheable_include_is_fetched_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/nav"))
        .and(header("X-Depth-Guard", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<ul>nav</ul>")
                .insert_header("Cache-Control", "max-age=120"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let includer = includer(IncludeConfig::default());
    let text = format!(r#"<body>[[include-url:"{}/nav"]]</body>"#, mock_server.uri());
    let url = format!("{}/nav", mock_server.uri());

    for _ in 0..3 {
        let mut directives = ResponseDirectives::new();
        let ctx = ssibox_core::RequestContext::builder("localhost").build();
        let output = includer.process(&text, &ctx, &mut directives).await;

        assert_eq!(output, format!("<body>{}</body>", block(&url, "<ul>nav</ul>")));
        assert!(directives.is_cacheable());
        assert!(directives.max_age().unwrap() <= Duration::from_secs(120));
    }
}

#[tokio::test]
async fn test_depth_header_continues_inbound_chain() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/fragment"))
        .and(header("X-Depth-Guard", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string("deep"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let includer = includer(IncludeConfig::default());
    let text = format!(r#"[[include-url:"{}/fragment"]]"#, mock_server.uri());

    let request = Request::get("/page")
        .header("host", "localhost")
        .header("x-depth-guard", "2")
        .body(())
        .unwrap();
    let (parts, _) = request.into_parts();
    let ctx = request_context(&parts).build();

    let mut directives = ResponseDirectives::new();
    let output = includer.process(&text, &ctx, &mut directives).await;
    assert!(output.contains("\ndeep\n"));

    // One level deeper and nothing is fetched.
    let request = Request::get("/page")
        .header("host", "localhost")
        .header("x-depth-guard", "3")
        .body(())
        .unwrap();
    let (parts, _) = request.into_parts();
    let ctx = request_context(&parts).build();

    let mut directives = ResponseDirectives::new();
    let output = includer.process(&text, &ctx, &mut directives).await;
    assert!(output.contains("Too many recursive includes"));
    assert_eq!(
        directives.headers().get(DEPTH_ERROR_HEADER).unwrap(),
        "Too deep!"
    );
}

#[tokio::test]
async fn test_origin_error_and_timeout_become_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500).set_body_string("stack trace"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let includer = includer(IncludeConfig {
        timeout: Duration::from_millis(200),
        ..IncludeConfig::default()
    });
    let uri = mock_server.uri();
    let text = format!(r#"[[include-url:"{uri}/broken"]]|[[include-url:"{uri}/slow"]]"#);
    let ctx = ssibox_core::RequestContext::builder("localhost").build();

    let mut directives = ResponseDirectives::new();
    let output = includer.process(&text, &ctx, &mut directives).await;

    assert_eq!(
        output,
        format!(
            "{}|{}",
            block(&format!("{uri}/broken"), ""),
            block(&format!("{uri}/slow"), "")
        )
    );
    assert!(!directives.is_cacheable());
}
