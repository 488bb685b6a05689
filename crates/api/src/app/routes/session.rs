use std::sync::Arc;

use axum::{
    extract::Extension,
    http::header,
    response::{IntoResponse, Redirect},
};

use stockroom_infra::SessionStore;

use crate::app::services::AppServices;
use crate::context::SessionContext;
use crate::middleware;

/// Tear down the caller's session and forget its cookie.
///
/// The next request starts a new session with a fresh inventory.
pub async fn close<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let session_id = session.session_id();
    let existed = services.close(session_id);
    tracing::info!(%session_id, existed, "session close requested");

    (
        [(header::SET_COOKIE, middleware::expired_session_cookie())],
        Redirect::to("/"),
    )
        .into_response()
}
