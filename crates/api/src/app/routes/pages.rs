//! HTML page and its form endpoints.
//!
//! Every mutation redirects back to `/`, whose render shows the resulting
//! notices once.

use std::sync::Arc;

use axum::{
    extract::{Extension, Form},
    response::{Html, Redirect},
};

use stockroom_infra::SessionStore;
use stockroom_inventory::NewItem;

use crate::app::dto;
use crate::app::services::AppServices;
use crate::context::SessionContext;

pub async fn index<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
) -> Html<String> {
    Html(services.page(session.session_id()).to_html())
}

pub async fn add_item<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
    Form(form): Form<dto::AddItemForm>,
) -> Redirect {
    let session_id = session.session_id();
    let input = NewItem::from(form);

    match services.submit_add(session_id, &input) {
        Ok((position, item)) => {
            tracing::info!(%session_id, item_id = %item.id_typed(), position, "item added");
        }
        Err(e) => {
            tracing::warn!(%session_id, "add rejected: {e}");
        }
    }

    Redirect::to("/")
}

/// The table form posts one `delete=<item id>` pair per checked row.
pub async fn delete_items<S: SessionStore + 'static>(
    Extension(services): Extension<Arc<AppServices<S>>>,
    Extension(session): Extension<SessionContext>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Redirect {
    let session_id = session.session_id();
    let (selections, malformed) = dto::delete_form_selections(&pairs);

    if selections.is_empty() && malformed == 0 {
        return Redirect::to("/");
    }

    let report = services.submit_delete(session_id, &selections, malformed);
    tracing::info!(
        %session_id,
        removed = report.removed.len(),
        rejected = report.rejected.len() + malformed,
        "delete batch applied"
    );

    Redirect::to("/")
}
