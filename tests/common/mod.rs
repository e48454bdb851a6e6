use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use calcweb::app::{AppState, router};
use calcweb::config::Config;
use tower::ServiceExt;

/// A router backed by a throwaway database; keep the `TempDir` alive for the
/// duration of the test
pub async fn test_app() -> (tempfile::TempDir, Router) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = Config {
        database_url: format!("sqlite:{}", dir.path().join("calc.sqlite3").display()),
        secret_key: Some("integration-test-secret-that-is-long-enough".to_string()),
        ..Config::default()
    };
    let state = AppState::from_config(&config)
        .await
        .expect("failed to build app state");
    (dir, router(state))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    /// `name=value` part of the session Set-Cookie header, ready to send back
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
    }
}

async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let resp = app
        .clone()
        .oneshot(request)
        .await
        .expect("request failed");
    let status = resp.status();
    let headers = resp.headers().clone();
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    TestResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).expect("response body was not utf-8"),
    }
}

pub async fn get(app: &Router, uri: &str, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(app, builder.body(Body::empty()).expect("failed to build request")).await
}

pub async fn post_form(app: &Router, uri: &str, form: &str, cookie: Option<&str>) -> TestResponse {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    send(
        app,
        builder
            .body(Body::from(form.to_string()))
            .expect("failed to build request"),
    )
    .await
}
