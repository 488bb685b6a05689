use axum::{
    routing::{delete, get, post},
    Router,
};

use stockroom_infra::SessionStore;

pub mod items;
pub mod pages;
pub mod session;
pub mod system;

/// Router for all session-scoped endpoints.
pub fn router<S: SessionStore + 'static>() -> Router {
    Router::new()
        .route("/", get(pages::index::<S>))
        .route("/items", post(pages::add_item::<S>))
        .route("/items/delete", post(pages::delete_items::<S>))
        .route("/session/close", post(session::close::<S>))
        .route(
            "/api/items",
            get(items::list_items::<S>).post(items::create_item::<S>),
        )
        .route("/api/items/delete", post(items::delete_items::<S>))
        .route("/api/items/:id", delete(items::delete_item::<S>))
}
