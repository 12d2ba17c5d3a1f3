use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use shortie_core::{DailyVisit, ShortenResult, StatsKey, TopIpEntry};
use shortie_engine::{
    FailureKind, ReqwestShortieClient, ServiceSettings, ShortenService, StatsService,
};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ServiceSettings {
    ServiceSettings {
        shorten_endpoint: format!("{}/shorten-url", server.uri()),
        stats_endpoint: format!("{}/stats", server.uri()),
        ..ServiceSettings::default()
    }
}

fn client_for(server: &MockServer) -> ReqwestShortieClient {
    ReqwestShortieClient::new(settings_for(server)).expect("client")
}

#[tokio::test]
async fn shorten_posts_long_url_and_parses_links() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten-url"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "longUrl": "https://example.com/long" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "shortUrl": "https://s/abc",
            "secretUrl": "https://s/stats/xyz"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .shorten("https://example.com/long")
        .await
        .expect("shorten ok");

    assert_eq!(
        result,
        ShortenResult {
            short_url: "https://s/abc".to_string(),
            stats_url: "https://s/stats/xyz".to_string(),
        }
    );
}

#[tokio::test]
async fn shorten_non_zero_status_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten-url"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 2 })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .shorten("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
}

#[tokio::test]
async fn shorten_fails_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten-url"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .shorten("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn shorten_malformed_body_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/shorten-url"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .shorten("https://example.com")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Malformed);
}

#[tokio::test]
async fn stats_queries_by_key_and_normalizes_counts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .and(query_param("secret", "xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dailyVisits": [
                { "date": "2024-06-15", "count": "12" },
                { "date": "2024-06-16", "count": 19 }
            ],
            "topIps": [
                { "ip": "192.168.1.1", "count": "45" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let stats = client_for(&server)
        .fetch_stats(&StatsKey::new("xyz").unwrap())
        .await
        .expect("stats ok");

    assert_eq!(
        stats.daily_visits,
        vec![
            DailyVisit {
                date: "2024-06-15".to_string(),
                count: 12
            },
            DailyVisit {
                date: "2024-06-16".to_string(),
                count: 19
            },
        ]
    );
    assert_eq!(
        stats.top_ips,
        vec![TopIpEntry {
            ip: "192.168.1.1".to_string(),
            count: 45
        }]
    );
}

#[tokio::test]
async fn stats_missing_arrays_are_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let stats = client_for(&server)
        .fetch_stats(&StatsKey::new("xyz").unwrap())
        .await
        .expect("stats ok");
    assert!(stats.is_empty());
}

#[tokio::test]
async fn stats_fail_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .fetch_stats(&StatsKey::new("missing").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(404));
    assert!(err.to_string().starts_with("http status 404"));
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(json!({})),
        )
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let client = ReqwestShortieClient::new(settings).expect("client");

    let err = client
        .fetch_stats(&StatsKey::new("xyz").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let settings = ServiceSettings {
        max_bytes: 10,
        ..settings_for(&server)
    };
    let client = ReqwestShortieClient::new(settings).expect("client");

    let err = client
        .fetch_stats(&StatsKey::new("xyz").unwrap())
        .await
        .unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(11)
        }
    );
}
