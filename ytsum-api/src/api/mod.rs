//! HTTP API handlers for ytsum-api

pub mod auth;
pub mod buildinfo;
pub mod extract;
pub mod health;
pub mod summarize;
pub mod ui;

pub use auth::{login, register};
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use summarize::{ask, summarize};
pub use ui::serve_index;
