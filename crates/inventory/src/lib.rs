//! Inventory domain module.
//!
//! Business rules for the item list: validated creation, ordered storage and
//! reconciliation of delete selections. No IO, no HTTP, no sessions.

pub mod error;
pub mod item;
pub mod notice;
pub mod seed;
pub mod store;

pub use error::InventoryError;
pub use item::{Item, NewItem, Quantity};
pub use notice::{Notice, NoticeLevel};
pub use seed::seed_items;
pub use store::{DeleteReport, Inventory, Rejection, RemovedItem, Selection};
