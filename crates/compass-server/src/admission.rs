//! Request admission middleware
//!
//! Runs ahead of routing on every request. In demo mode a session-less
//! request is turned away with the fixed busy page once the active-session
//! count hits capacity; a rejected request never creates a session. Admitted
//! requests that lack a session get one here, and the cookie goes out on
//! the response. Gate logic never fails: the worst case is serving the
//! busy page.

use crate::session::SessionId;
use crate::{pages, AppState};
use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// Name of the session cookie
pub const COOKIE_NAME: &str = "compass_session";

/// Admission gate and session bootstrap
pub(crate) async fn gate(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    // A cookie only counts if the session is still live; touching extends
    // its deadline and destroys it when it has already expired.
    let existing =
        cookie_session(request.headers()).filter(|id| state.sessions().touch(*id));

    if state.mode().is_demo() {
        let verdict = state.policy().check(existing.is_some(), state.registry());
        if !verdict.is_admitted() {
            tracing::warn!(
                active = state.registry().current(),
                "at session capacity, turning request away"
            );
            return busy_response();
        }
    }

    let (session, created) = match existing {
        Some(id) => (id, false),
        None => (state.sessions().create(), true),
    };
    request.extensions_mut().insert(session);

    let mut response = next.run(request).await;
    if created {
        if let Ok(value) = HeaderValue::from_str(&format!(
            "{COOKIE_NAME}={}; Path=/; HttpOnly; SameSite=Lax",
            session.0
        )) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }
    response
}

/// The fixed capacity-exceeded response: 503, `text/html`, retry control
fn busy_response() -> Response {
    (
        StatusCode::SERVICE_UNAVAILABLE,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        pages::server_busy(),
    )
        .into_response()
}

/// Extract the session id from the request's `Cookie` header, if any
fn cookie_session(headers: &HeaderMap) -> Option<SessionId> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == COOKIE_NAME {
            Uuid::parse_str(value.trim()).ok().map(SessionId)
        } else {
            None
        }
    })
}
