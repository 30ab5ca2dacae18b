//! Shared helpers for tests that run against a mocked controller.
#![allow(dead_code)]

use serde_json::{Value, json};
use unifi_webhook::config::UnifiConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const LOGIN_PATH_EXTERNAL: &str = "/api/login";
pub const RECORDS_PATH: &str = "/proxy/network/v2/api/site/default/static-dns/";
pub const RECORDS_PATH_EXTERNAL: &str = "/v2/api/site/default/static-dns/";

pub fn test_config(server: &MockServer, external_controller: bool) -> UnifiConfig {
    UnifiConfig {
        host: server.uri(),
        user: "admin".into(),
        password: "hunter2".into(),
        site: "default".into(),
        skip_tls_verify: false,
        external_controller,
    }
}

/// Accept every login and hand out `token` as the CSRF token.
pub async fn mount_login(server: &MockServer, login_path: &str, token: &str) {
    Mock::given(method("POST"))
        .and(path(login_path))
        .respond_with(ResponseTemplate::new(200).insert_header("X-CSRF-Token", token))
        .mount(server)
        .await;
}

pub fn wire_record(id: &str, key: &str, record_type: &str, value: &str) -> Value {
    json!({
        "_id": id,
        "key": key,
        "record_type": record_type,
        "ttl": 300,
        "value": value,
        "enabled": true,
    })
}

pub fn wire_srv(id: &str, key: &str, priority: u32, weight: u32, port: u32, target: &str) -> Value {
    json!({
        "_id": id,
        "key": key,
        "record_type": "SRV",
        "ttl": 300,
        "value": target,
        "enabled": true,
        "priority": priority,
        "weight": weight,
        "port": port,
    })
}
