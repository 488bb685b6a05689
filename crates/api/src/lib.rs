//! HTTP surface of the inventory editor: server, routing, sessions and the
//! HTML view.

pub mod app;
pub mod config;
pub mod context;
pub mod middleware;
pub mod view;
