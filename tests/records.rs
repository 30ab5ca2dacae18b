//! Listing, creating and deleting records against a mocked controller.

mod common;

use common::*;
use reqwest::{Method, StatusCode};
use serde_json::json;
use unifi_webhook::endpoint::Endpoint;
use unifi_webhook::error::UnifiError;
use unifi_webhook::unifi::UnifiClient;
use unifi_webhook::validation::ValidationError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn connected(server: &MockServer) -> UnifiClient {
    mount_login(server, LOGIN_PATH, "tok").await;
    UnifiClient::connect(&test_config(server, false))
        .await
        .expect("login should succeed")
}

async fn mount_listing(server: &MockServer, records: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(RECORDS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(records))
        .mount(server)
        .await;
}

#[tokio::test]
async fn list_packs_srv_values() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_listing(
        &server,
        json!([
            wire_record("1", "a.example.com", "A", "10.0.0.1"),
            wire_srv("2", "_sip._tcp.example.com", 10, 20, 30, "target.example.com."),
        ]),
    )
    .await;

    let records = client.list().await.unwrap();
    assert_eq!(records.len(), 2);

    assert_eq!(records[0].value, "10.0.0.1");
    assert_eq!(records[0].id.as_deref(), Some("1"));

    let srv = &records[1];
    assert_eq!(srv.value, "10 20 30 target.example.com.");
    assert_eq!(srv.priority, None);
    assert_eq!(srv.weight, None);
    assert_eq!(srv.port, None);
}

#[tokio::test]
async fn listing_twice_returns_the_same_records() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_listing(
        &server,
        json!([
            wire_record("1", "a.example.com", "A", "10.0.0.1"),
            wire_srv("2", "_sip._tcp.example.com", 1, 2, 3, "t.example.com"),
        ]),
    )
    .await;

    let first = client.list().await.unwrap();
    let second = client.list().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn create_sends_first_target_verbatim() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    Mock::given(method("POST"))
        .and(path(RECORDS_PATH))
        .and(body_json(json!({
            "key": "a.example.com",
            "record_type": "A",
            "ttl": 300,
            "value": "10.0.0.1",
            "enabled": true,
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(wire_record("new-id", "a.example.com", "A", "10.0.0.1")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = Endpoint::new(
        "a.example.com",
        "A",
        300,
        vec!["10.0.0.1".into(), "10.0.0.2".into()],
    );
    let created = client.create(&endpoint).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("new-id"));
    assert_eq!(created.value, "10.0.0.1");
}

#[tokio::test]
async fn create_srv_unpacks_composite_value() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    Mock::given(method("POST"))
        .and(path(RECORDS_PATH))
        .and(body_json(json!({
            "key": "_sip._tcp.example.com",
            "record_type": "SRV",
            "ttl": 300,
            "value": "target.example.com.",
            "enabled": true,
            "priority": 10,
            "weight": 20,
            "port": 30,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(wire_srv(
            "srv-id",
            "_sip._tcp.example.com",
            10,
            20,
            30,
            "target.example.com.",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = Endpoint::new(
        "_sip._tcp.example.com",
        "SRV",
        300,
        vec!["10 20 30 target.example.com.".into()],
    );
    let created = client.create(&endpoint).await.unwrap();
    assert_eq!(created.value, "10 20 30 target.example.com.");
    assert_eq!(created.port, None);
}

#[tokio::test]
async fn malformed_srv_is_rejected_before_any_request() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    Mock::given(method("POST"))
        .and(path(RECORDS_PATH))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let endpoint = Endpoint::new(
        "_sip._tcp.example.com",
        "SRV",
        300,
        vec!["10 20 notanumber".into()],
    );
    let err = client.create(&endpoint).await.unwrap_err();
    assert!(
        matches!(err, UnifiError::Validation(ValidationError::SrvFieldCount(3))),
        "got {err:?}"
    );
}

#[tokio::test]
async fn create_failure_carries_request_context() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    Mock::given(method("POST"))
        .and(path(RECORDS_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "message": "invalid value" })))
        .mount(&server)
        .await;

    let endpoint = Endpoint::new("a.example.com", "A", 300, vec!["nope".into()]);
    match client.create(&endpoint).await {
        Err(UnifiError::Api {
            method,
            url,
            status,
            message,
        }) => {
            assert_eq!(method, Method::POST);
            assert_eq!(url, format!("{}{}", server.uri(), RECORDS_PATH));
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "invalid value");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_removes_last_matching_record() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_listing(
        &server,
        json!([
            wire_record("id1", "foo.example.com", "A", "v1"),
            wire_record("id2", "foo.example.com", "A", "v2"),
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{RECORDS_PATH}id2")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = Endpoint::new(
        "foo.example.com",
        "A",
        300,
        vec!["v1".into(), "v2".into()],
    );
    client.delete(&endpoint).await.unwrap();
}

#[tokio::test]
async fn delete_without_targets_removes_first_listed_record() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_listing(
        &server,
        json!([
            wire_record("id1", "foo.example.com", "A", "10.0.0.1"),
            wire_record("id2", "foo.example.com", "A", "10.0.0.2"),
        ]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{RECORDS_PATH}id1")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = Endpoint::new("foo.example.com", "A", 0, Vec::new());
    client.delete(&endpoint).await.unwrap();
}

#[tokio::test]
async fn delete_matches_srv_by_composite_value() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_listing(
        &server,
        json!([wire_srv("srv1", "_sip._tcp.example.com", 10, 20, 30, "t.example.com.")]),
    )
    .await;
    Mock::given(method("DELETE"))
        .and(path(format!("{RECORDS_PATH}srv1")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let endpoint = Endpoint::new(
        "_sip._tcp.example.com",
        "SRV",
        0,
        vec!["10 20 30 t.example.com.".into()],
    );
    client.delete(&endpoint).await.unwrap();
}

#[tokio::test]
async fn delete_of_unknown_record_is_not_found() {
    let server = MockServer::start().await;
    let client = connected(&server).await;
    mount_listing(
        &server,
        json!([wire_record("id1", "other.example.com", "A", "10.0.0.1")]),
    )
    .await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let endpoint = Endpoint::new("foo.example.com", "A", 0, vec!["10.0.0.1".into()]);
    match client.delete(&endpoint).await {
        Err(UnifiError::NotFound(key)) => assert_eq!(key, "foo.example.com"),
        other => panic!("expected not found, got {other:?}"),
    }
}
