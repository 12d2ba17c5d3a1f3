use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use shortie_core::{ShortenResult, StatsKey, StatsResult};
use shortie_engine::{
    EngineEvent, EngineHandle, FailureKind, RequestError, ServiceSettings, ShortenService,
    StatsService,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

/// Answers immediately, except for the key `slow` which takes a while.
struct FakeServices;

#[async_trait::async_trait]
impl ShortenService for FakeServices {
    async fn shorten(&self, long_url: &str) -> Result<ShortenResult, RequestError> {
        Ok(ShortenResult {
            short_url: format!("{long_url}#short"),
            stats_url: format!("{long_url}#stats"),
        })
    }
}

#[async_trait::async_trait]
impl StatsService for FakeServices {
    async fn fetch_stats(&self, key: &StatsKey) -> Result<StatsResult, RequestError> {
        if key.as_str() == "slow" {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(StatsResult::default())
    }
}

fn fake_engine() -> EngineHandle {
    let services = Arc::new(FakeServices);
    EngineHandle::with_services(services.clone(), services).expect("engine")
}

#[test]
fn completed_requests_are_reported() {
    let engine = fake_engine();
    engine.shorten(1, "https://example.com");

    let event = engine.recv_timeout(WAIT).expect("event");
    assert_eq!(
        event,
        EngineEvent::ShortenCompleted {
            request_id: 1,
            result: Ok(ShortenResult {
                short_url: "https://example.com#short".to_string(),
                stats_url: "https://example.com#stats".to_string(),
            }),
        }
    );
}

#[test]
fn cancelled_request_produces_no_event() {
    let engine = fake_engine();
    engine.fetch_stats(1, StatsKey::new("slow").unwrap());
    engine.cancel(1);
    engine.fetch_stats(2, StatsKey::new("fast").unwrap());

    let event = engine.recv_timeout(WAIT).expect("event");
    assert!(matches!(
        event,
        EngineEvent::StatsCompleted { request_id: 2, .. }
    ));
    assert!(engine.recv_timeout(Duration::from_millis(600)).is_none());
}

#[test]
fn cancelling_unknown_request_is_harmless() {
    let engine = fake_engine();
    engine.cancel(42);
    engine.fetch_stats(1, StatsKey::new("fast").unwrap());

    assert!(engine.recv_timeout(WAIT).is_some());
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_reports_http_failures() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten-url"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "topIps": [] })))
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        shorten_endpoint: format!("{}/shorten-url", server.uri()),
        stats_endpoint: format!("{}/stats", server.uri()),
        ..ServiceSettings::default()
    };
    let engine = EngineHandle::new(settings).expect("engine");

    engine.shorten(1, "https://example.com");
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::ShortenCompleted { request_id, result } => {
            assert_eq!(request_id, 1);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.fetch_stats(2, StatsKey::new("xyz").unwrap());
    match engine.recv_timeout(WAIT).expect("event") {
        EngineEvent::StatsCompleted { request_id, result } => {
            assert_eq!(request_id, 2);
            assert!(result.unwrap().is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
}
