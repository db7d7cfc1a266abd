//! HTTP boundary tests for the token endpoints.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use uiplat_api::{AppState, build_router};
use uiplat_core::config::AppConfig;
use uiplat_core::config::nonce::MemoryNonceConfig;
use uiplat_nonce::memory::MemoryNonceStore;
use uiplat_token::{TokenPair, TokenService};

struct TestApp {
    router: Router,
    token_service: Arc<TokenService>,
}

impl TestApp {
    fn new() -> Self {
        let config = Arc::new(AppConfig::default());
        let store = Arc::new(MemoryNonceStore::new(&MemoryNonceConfig {
            purge_threshold: 1000,
        }));
        let token_service = Arc::new(TokenService::new(&config.auth, store).unwrap());
        let state = AppState::new(config, Arc::clone(&token_service));
        Self {
            router: build_router(state),
            token_service,
        }
    }

    async fn issue(&self, user_id: &str) -> TokenPair {
        self.token_service.generate_token_pair(user_id).await.unwrap()
    }

    async fn request(
        &self,
        method: &str,
        uri: &str,
        headers: &[(&str, &str)],
    ) -> (StatusCode, serde_json::Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let request = builder.body(Body::empty()).unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    async fn refresh(&self, access: &str, refresh: &str) -> (StatusCode, serde_json::Value) {
        self.request(
            "POST",
            "/api/auth/refresh",
            &[
                ("authorization", &format!("Bearer {access}")),
                ("refresh-token", refresh),
            ],
        )
        .await
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new();
    let (status, body) = app.request("GET", "/api/health", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_me_with_valid_access_token() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    let (status, body) = app
        .request(
            "GET",
            "/api/auth/me",
            &[("authorization", &format!("Bearer {}", pair.access_token))],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u1");
}

#[tokio::test]
async fn test_me_without_header() {
    let app = TestApp::new();
    let (status, _) = app.request("GET", "/api/auth/me", &[]).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_tampered_token() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    let mut tampered = pair.access_token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let (status, body) = app
        .request(
            "GET",
            "/api/auth/me",
            &[("authorization", &format!("Bearer {tampered}"))],
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid token");
}

#[tokio::test]
async fn test_me_rejects_refresh_token_as_bearer() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    let (status, _) = app
        .request(
            "GET",
            "/api/auth/me",
            &[("authorization", &format!("Bearer {}", pair.refresh_token))],
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_happy_path() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    let (status, body) = app.refresh(&pair.access_token, &pair.refresh_token).await;
    assert_eq!(status, StatusCode::OK);

    let new_access = body["access_token"].as_str().unwrap();
    let new_refresh = body["refresh_token"].as_str().unwrap();
    assert_ne!(new_access, pair.access_token);
    assert_ne!(new_refresh, pair.refresh_token);

    // The rotated access token works on a protected route.
    let (status, body) = app
        .request(
            "GET",
            "/api/auth/me",
            &[("authorization", &format!("Bearer {new_access}"))],
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u1");
}

#[tokio::test]
async fn test_refresh_replay_rejected() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    let (status, _) = app.refresh(&pair.access_token, &pair.refresh_token).await;
    assert_eq!(status, StatusCode::OK);

    // Presenting the superseded pair again must fail, and the body must
    // not say which check failed.
    let (status, body) = app.refresh(&pair.access_token, &pair.refresh_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "UNAUTHORIZED");
    assert_eq!(body["message"], "invalid token");
}

#[tokio::test]
async fn test_refresh_with_unpaired_access_token() {
    let app = TestApp::new();
    let pair_a = app.issue("u1").await;
    let pair_b = app.issue("u1").await;

    let (status, body) = app
        .refresh(&pair_b.access_token, &pair_a.refresh_token)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid token");
}

#[tokio::test]
async fn test_refresh_missing_refresh_header() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/refresh",
            &[("authorization", &format!("Bearer {}", pair.access_token))],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_missing_authorization_header() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    let (status, _) = app
        .request(
            "POST",
            "/api/auth/refresh",
            &[("refresh-token", pair.refresh_token.as_str())],
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_with_swapped_headers() {
    let app = TestApp::new();
    let pair = app.issue("u1").await;

    // Access token in the Refresh-Token slot is a wrong-type token.
    let (status, body) = app.refresh(&pair.refresh_token, &pair.access_token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "invalid token");
}
