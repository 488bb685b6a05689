//! Infrastructure wiring for the inventory editor.
//!
//! Holds the per-session state registry. Domain rules stay in
//! `stockroom-inventory`; this crate only decides where inventories live and
//! for how long.

pub mod session;

pub use session::{InMemorySessionStore, SessionLimits, SessionSeed, SessionState, SessionStore};
