use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};

use stockroom_core::SessionId;
use stockroom_infra::SessionStore;

use crate::app::services::AppServices;
use crate::context::SessionContext;

pub const SESSION_COOKIE: &str = "stockroom_session";

/// Resolve the caller's session from its cookie.
///
/// Only ids of live sessions are honored; a missing cookie, or one naming a
/// session the store does not know (expired, closed, or made up by the
/// client), gets a freshly minted id. That id is handed back in
/// `Set-Cookie`, unless the handler already set the cookie itself (e.g. when
/// closing the session).
pub async fn session_middleware<S: SessionStore + 'static>(
    State(services): State<Arc<AppServices<S>>>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let known = session_from_cookies(req.headers()).filter(|id| services.has_session(*id));
    let ctx = match known {
        Some(session_id) => SessionContext::new(session_id, false),
        None => SessionContext::new(SessionId::new(), true),
    };
    req.extensions_mut().insert(ctx);

    let mut res = next.run(req).await;

    if ctx.is_fresh() && !res.headers().contains_key(header::SET_COOKIE) {
        match HeaderValue::from_str(&session_cookie(ctx.session_id())) {
            Ok(v) => {
                res.headers_mut().append(header::SET_COOKIE, v);
            }
            Err(e) => tracing::warn!("failed to encode session cookie: {e}"),
        }
    }

    res
}

/// Log method, path, status and latency of every request.
pub async fn log_requests(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let res = next.run(req).await;

    tracing::debug!(
        %method,
        %path,
        status = res.status().as_u16(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request"
    );
    res
}

pub fn session_cookie(session_id: SessionId) -> String {
    format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly; SameSite=Lax")
}

pub fn expired_session_cookie() -> String {
    format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn session_from_cookies(headers: &HeaderMap) -> Option<SessionId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .and_then(|(_, value)| value.parse().ok())
}
