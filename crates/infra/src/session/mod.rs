//! Session-isolated inventory storage.

pub mod store;

pub use store::{InMemorySessionStore, SessionLimits, SessionSeed, SessionState, SessionStore};
