//! Shared helpers for router-level tests
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use compass_core::Mode;
use compass_server::{AppState, ServerConfig};
use std::path::PathBuf;
use std::time::Duration;
use tower::ServiceExt;

pub fn demo_config(ttl: Duration) -> ServerConfig {
    ServerConfig {
        mode: Mode::Demo,
        bind: "127.0.0.1:0".parse().unwrap(),
        db_path: PathBuf::from("unused.db"),
        max_sessions: 3,
        session_ttl: ttl,
        sweep_interval: Duration::from_secs(1),
    }
}

pub fn local_config() -> ServerConfig {
    ServerConfig {
        mode: Mode::Local,
        session_ttl: Duration::from_secs(60),
        ..demo_config(Duration::from_secs(60))
    }
}

pub async fn get(router: &Router, path: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_form(
    router: &Router,
    path: &str,
    cookie: Option<&str>,
    body: &str,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    router
        .clone()
        .oneshot(builder.body(Body::from(body.to_string())).unwrap())
        .await
        .unwrap()
}

/// Pull the session cookie pair (`name=value`) off a response
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}

/// Issue a session-less request and return the cookie it was granted
pub async fn open_session(router: &Router) -> String {
    let response = get(router, "/", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response).expect("admitted request should set a session cookie")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Build a demo-mode app, returning the state for registry inspection
pub fn demo_app(ttl: Duration) -> (AppState, Router) {
    let state = AppState::demo(&demo_config(ttl));
    let router = compass_server::router(state.clone());
    (state, router)
}
