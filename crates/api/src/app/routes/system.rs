use std::sync::Arc;

use axum::{extract::Extension, Json};

use stockroom_infra::SessionStore;

use crate::app::services::AppServices;

pub async fn health<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "sessions": services.live_sessions(),
    }))
}
