//! JSON API over the session's inventory.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use stockroom_core::{DomainError, ItemId};
use stockroom_infra::SessionStore;
use stockroom_inventory::NewItem;

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::SessionContext;

pub async fn list_items<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
) -> axum::response::Response {
    let items = services.list(session.session_id());
    (StatusCode::OK, Json(dto::items_to_json(&items))).into_response()
}

pub async fn create_item<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<dto::CreateItemRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return errors::json_rejection_to_response(e),
    };
    let session_id = session.session_id();
    let input = NewItem::from(body);

    let (position, item) = match services.add_item(session_id, &input) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(%session_id, "add rejected: {e}");
            return errors::domain_error_to_response(e.into());
        }
    };

    tracing::info!(%session_id, item_id = %item.id_typed(), position, "item added");
    (StatusCode::CREATED, Json(dto::item_to_json(position, &item))).into_response()
}

/// Bad entries are rejected one by one; the rest of the batch still applies.
pub async fn delete_items<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
    body: Result<Json<dto::DeleteItemsRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(v) => v,
        Err(e) => return errors::json_rejection_to_response(e),
    };
    let session_id = session.session_id();
    let (selections, malformed) = body.selections();

    let (report, remaining) = services.delete(session_id, &selections);
    tracing::info!(
        %session_id,
        removed = report.removed.len(),
        rejected = report.rejected.len() + malformed.len(),
        "delete batch applied"
    );

    (
        StatusCode::OK,
        Json(dto::delete_report_to_json(&report, &malformed, remaining)),
    )
        .into_response()
}

pub async fn delete_item<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let session_id = session.session_id();
    let item_id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.remove(session_id, item_id) {
        Some(removed) => {
            tracing::info!(%session_id, %item_id, position = removed.position, "item removed");
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "removed": dto::item_to_json(removed.position, &removed.item),
                })),
            )
                .into_response()
        }
        None => errors::domain_error_to_response(DomainError::not_found("item not found")),
    }
}
