use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use mockito::{Matcher, Server, ServerGuard};
use reqwest::StatusCode;
use sporldeck::{
    ClientError,
    management::{ACCESS_TOKEN_KEY, CredentialStore, MemoryStore, REFRESH_TOKEN_KEY, StoreError},
    spotify::{PlaybackAction, SpotifyClient},
};

const REFRESH_PATH: &str = "/api/spotify/refresh-token";

fn client_for(server: &ServerGuard, store: &Arc<MemoryStore>) -> SpotifyClient {
    SpotifyClient::new(server.url(), store.clone())
}

fn tokens(access: &str, refresh: &str) -> Arc<MemoryStore> {
    Arc::new(MemoryStore::with_tokens(Some(access), Some(refresh)))
}

// Store that serves reads but rejects every write
struct ReadOnlyStore(MemoryStore);

#[async_trait]
impl CredentialStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }

    async fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

#[tokio::test]
async fn test_success_is_returned_without_refresh() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .expect(0)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);
    let calls = AtomicUsize::new(0);
    let calls = &calls;

    let result = client
        .execute(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ClientError>(vec![1, 2, 3])
        })
        .await;

    assert_eq!(result.unwrap(), vec![1, 2, 3]);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_refreshes_once_and_retries_once() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .match_header("authorization", "Bearer R1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "access_token": "T2"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);
    let calls = AtomicUsize::new(0);
    let calls = &calls;

    let result = client
        .execute(move || async move {
            match calls.fetch_add(1, Ordering::SeqCst) {
                0 => Err(ClientError::AuthorizationRejected),
                _ => Ok("second attempt"),
            }
        })
        .await;

    assert_eq!(result.unwrap(), "second attempt");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T2"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_retry_failure_is_final() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .with_status(200)
        .with_body(r#"{"success": true, "access_token": "T2"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);
    let calls = AtomicUsize::new(0);
    let calls = &calls;

    let result: Result<(), ClientError> = client
        .execute(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ClientError::AuthorizationRejected)
        })
        .await;

    assert!(matches!(result, Err(ClientError::AuthorizationRejected)));
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_refresh_failure_is_propagated_instead_of_unauthorized() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .with_status(500)
        .with_body("boom")
        .expect(1)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);
    let calls = AtomicUsize::new(0);
    let calls = &calls;

    let result: Result<(), ClientError> = client
        .execute(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ClientError::AuthorizationRejected)
        })
        .await;

    assert!(matches!(result, Err(ClientError::RefreshFailed(_))));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_other_errors_never_refresh() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .expect(0)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);
    let calls = AtomicUsize::new(0);
    let calls = &calls;

    let result: Result<(), ClientError> = client
        .execute(move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(ClientError::status(StatusCode::FORBIDDEN, "forbidden"))
        })
        .await;

    match result {
        Err(ClientError::Transport { status, .. }) => assert_eq!(status, Some(StatusCode::FORBIDDEN)),
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_missing_refresh_token_fails_before_network() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .expect(0)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::with_tokens(Some("T1"), None));
    let client = client_for(&server, &store);

    let result = client.refresh_access_token().await;

    assert!(matches!(
        result,
        Err(ClientError::MissingCredential(REFRESH_TOKEN_KEY))
    ));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_unsuccessful_refresh_keeps_stored_token() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .with_status(200)
        .with_body(r#"{"success": false}"#)
        .expect(1)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);

    let result = client.refresh_access_token().await;

    assert!(matches!(result, Err(ClientError::RefreshFailed(_))));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_refresh_without_access_token_in_body_fails() {
    let mut server = Server::new_async().await;
    let _refresh = server
        .mock("GET", REFRESH_PATH)
        .with_status(200)
        .with_body(r#"{"success": true}"#)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);

    let result = client.refresh_access_token().await;

    assert!(matches!(result, Err(ClientError::RefreshFailed(_))));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));
}

#[tokio::test]
async fn test_expired_token_is_replaced_and_request_retried() {
    let mut server = Server::new_async().await;
    let expired = server
        .mock("GET", "/api/spotify/current-user")
        .match_header("authorization", "Bearer T1")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .match_header("authorization", "Bearer R1")
        .with_status(200)
        .with_body(r#"{"success": true, "access_token": "T2"}"#)
        .expect(1)
        .create_async()
        .await;
    let fresh = server
        .mock("GET", "/api/spotify/current-user")
        .match_header("authorization", "Bearer T2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"id": "u1", "display_name": "Ana", "images": [], "product": "premium", "type": "user", "uri": "spotify:user:u1"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);

    let user = client.current_user().await.unwrap();

    assert_eq!(user.id, "u1");
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T2"));
    expired.assert_async().await;
    refresh.assert_async().await;
    fresh.assert_async().await;
}

#[tokio::test]
async fn test_rejected_refresh_token_fails_and_keeps_tokens() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .match_header("authorization", "Bearer R1")
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);

    let result = client.refresh_access_token().await;

    assert!(matches!(result, Err(ClientError::RefreshFailed(_))));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_refresh_endpoint_fails_and_keeps_tokens() {
    let store = tokens("T1", "R1");
    let client = SpotifyClient::new("http://127.0.0.1:1", store.clone());

    let result = client.refresh_access_token().await;

    assert!(matches!(result, Err(ClientError::RefreshFailed(_))));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
}

#[tokio::test]
async fn test_store_write_failure_fails_refresh_and_keeps_tokens() {
    let mut server = Server::new_async().await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .match_header("authorization", "Bearer R1")
        .with_status(200)
        .with_body(r#"{"success": true, "access_token": "T2"}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(ReadOnlyStore(MemoryStore::with_tokens(Some("T1"), Some("R1"))));
    let client = SpotifyClient::new(server.url(), store.clone());

    let result = client.refresh_access_token().await;

    assert!(matches!(result, Err(ClientError::RefreshFailed(_))));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T1"));
    assert_eq!(store.get(REFRESH_TOKEN_KEY).await.as_deref(), Some("R1"));
    refresh.assert_async().await;
}

#[tokio::test]
async fn test_rejected_playback_command_is_retried_with_refreshed_token() {
    let mut server = Server::new_async().await;
    let expired = server
        .mock("POST", "/api/spotify/player/seek")
        .match_header("authorization", "Bearer T1")
        .match_query(Matcher::UrlEncoded("position_ms".into(), "30000".into()))
        .with_status(401)
        .expect(1)
        .create_async()
        .await;
    let refresh = server
        .mock("GET", REFRESH_PATH)
        .match_header("authorization", "Bearer R1")
        .with_status(200)
        .with_body(r#"{"success": true, "access_token": "T2"}"#)
        .expect(1)
        .create_async()
        .await;
    let fresh = server
        .mock("POST", "/api/spotify/player/seek")
        .match_header("authorization", "Bearer T2")
        .match_query(Matcher::UrlEncoded("position_ms".into(), "30000".into()))
        .with_status(204)
        .expect(1)
        .create_async()
        .await;

    let store = tokens("T1", "R1");
    let client = client_for(&server, &store);

    let resp = client
        .control_playback(PlaybackAction::Seek { position_ms: 30000 })
        .await
        .unwrap();

    assert!(resp.success);
    assert_eq!(resp.action.as_deref(), Some("seek"));
    assert_eq!(store.get(ACCESS_TOKEN_KEY).await.as_deref(), Some("T2"));
    expired.assert_async().await;
    refresh.assert_async().await;
    fresh.assert_async().await;
}
