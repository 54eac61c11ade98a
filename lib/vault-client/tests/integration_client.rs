// lib/vault-client/tests/integration_client.rs

use std::io::Write;

use tempfile::NamedTempFile;
use vault_client::{ListResponse, ReadResponse, VaultClient, VaultError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mock_vault_client(mock_uri: &str, token: &str) -> VaultClient {
    VaultClient::builder()
        .base_url(mock_uri)
        .token(token)
        .build()
        .await
        .unwrap()
}

fn vault_list_response(keys: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "request_id": "test-request-id",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": { "keys": keys },
        "wrap_info": null,
        "warnings": null,
        "auth": null
    })
}

#[tokio::test]
async fn test_list_returns_keys_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/"))
        .and(query_param("list", "true"))
        .and(header("X-Vault-Token", "test-token"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(vault_list_response(&["b", "a/", "c"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let listed = client.list("/secret/metadata/").await.unwrap();
    assert_eq!(
        listed,
        ListResponse::Keys(vec!["b".to_string(), "a/".to_string(), "c".to_string()])
    );
}

#[tokio::test]
async fn test_list_not_found_is_absent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/missing/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": []
        })))
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let listed = client.list("secret/metadata/missing/").await.unwrap();
    assert_eq!(listed, ListResponse::Absent);
}

#[tokio::test]
async fn test_list_without_keys_is_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/empty/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {}
        })))
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let listed = client.list("secret/metadata/empty/").await.unwrap();
    assert_eq!(listed, ListResponse::Empty);
}

#[tokio::test]
async fn test_list_permission_denied() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/private/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
            "errors": ["permission denied"]
        })))
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let err = client.list("secret/metadata/private/").await.unwrap_err();
    assert_eq!(err.status(), Some(403));
    assert!(
        err.to_string().contains("permission denied"),
        "error should carry Vault's message: {}",
        err
    );
}

#[tokio::test]
async fn test_list_rejects_non_string_keys() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "keys": [1, 2] }
        })))
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let result = client.list("secret/metadata/").await;
    assert!(matches!(result, Err(VaultError::InvalidResponse(_))));
}

#[tokio::test]
async fn test_read_metadata_present() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/app/db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": {
                "created_time": "2024-01-01T00:00:00.000000000Z",
                "current_version": 1,
                "versions": {}
            }
        })))
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let read = client.read("secret/metadata/app/db").await.unwrap();
    assert_eq!(read, ReadResponse::Present);
}

#[tokio::test]
async fn test_read_not_found_and_empty() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/hollow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": null
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/nothing"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    assert_eq!(
        client.read("secret/metadata/gone").await.unwrap(),
        ReadResponse::Absent
    );
    assert_eq!(
        client.read("secret/metadata/hollow").await.unwrap(),
        ReadResponse::Empty
    );
    assert_eq!(
        client.read("secret/metadata/nothing").await.unwrap(),
        ReadResponse::Absent
    );
}

#[tokio::test]
async fn test_reserved_characters_in_keys_are_escaped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/q%3Fx/"))
        .and(query_param("list", "true"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(vault_list_response(&["a#b", "with space", "50%off"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    for escaped in ["a%23b", "with%20space", "50%25off"] {
        Mock::given(method("GET"))
            .and(path(format!("/v1/secret/metadata/q%3Fx/{}", escaped)))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "current_version": 1 }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;
    }

    // What an unescaped `q?x/` would have hit
    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/q"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vault_list_response(&["wrong"])))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let listed = client.list("/secret/metadata/q?x/").await.unwrap();
    let keys = listed.into_keys();
    assert_eq!(keys, vec!["a#b", "with space", "50%off"]);

    for key in &keys {
        assert_eq!(
            client
                .read(&format!("/secret/metadata/q?x/{}", key))
                .await
                .unwrap(),
            ReadResponse::Present,
            "{}",
            key
        );
    }
}

#[tokio::test]
async fn test_fragment_in_key_does_not_truncate_path() {
    let mock_server = MockServer::start().await;

    // What an unescaped `a#nothere` would have hit
    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "current_version": 1 }
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    assert_eq!(
        client.read("secret/metadata/a#nothere").await.unwrap(),
        ReadResponse::Absent
    );
}

#[tokio::test]
async fn test_list_mounts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/sys/mounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "request_id": "test-request-id",
            "data": {
                "secret/": { "type": "kv", "description": "key/value secret storage", "options": { "version": "2" } },
                "sys/": { "type": "system", "description": "system endpoints", "options": null },
                "cubbyhole/": { "type": "cubbyhole", "description": "per-token private secret storage" }
            }
        })))
        .mount(&mock_server)
        .await;

    let client = mock_vault_client(&mock_server.uri(), "test-token").await;

    let mounts = client.list_mounts().await.unwrap();
    assert_eq!(mounts.len(), 3);
    assert_eq!(mounts["secret/"].mount_type, "kv");
    assert_eq!(mounts["sys/"].mount_type, "system");
}

#[tokio::test]
async fn test_namespace_and_user_agent_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/"))
        .and(header("X-Vault-Namespace", "team-a"))
        .and(header("User-Agent", "kv-inventory"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vault_list_response(&["x"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = VaultClient::builder()
        .base_url(mock_server.uri())
        .token("test-token")
        .namespace("team-a")
        .application_name("kv-inventory")
        .build()
        .await
        .unwrap();

    let listed = client.list("secret/metadata/").await.unwrap();
    assert_eq!(listed, ListResponse::Keys(vec!["x".to_string()]));
}

#[tokio::test]
async fn test_token_file_is_sent_as_token() {
    // VAULT_TOKEN takes precedence over any token file
    if std::env::var("VAULT_TOKEN").is_ok_and(|t| !t.trim().is_empty()) {
        return;
    }

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/secret/metadata/"))
        .and(header("X-Vault-Token", "hvs.from-file"))
        .respond_with(ResponseTemplate::new(200).set_body_json(vault_list_response(&["x"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "hvs.from-file").unwrap();

    let client = VaultClient::builder()
        .base_url(mock_server.uri())
        .token_file(file.path())
        .build()
        .await
        .unwrap();

    client.list("secret/metadata/").await.unwrap();
}

#[tokio::test]
async fn test_missing_token_file_fails_build() {
    if std::env::var("VAULT_TOKEN").is_ok_and(|t| !t.trim().is_empty()) {
        return;
    }

    let result = VaultClient::builder()
        .base_url("http://127.0.0.1:8200")
        .token_file("/nonexistent/.vault-token")
        .build()
        .await;

    assert!(matches!(result, Err(VaultError::AuthError(_))));
}
