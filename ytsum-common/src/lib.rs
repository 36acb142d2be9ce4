//! # ytsum Common Library
//!
//! Shared code for the ytsum backend including:
//! - Error types
//! - Configuration loading (TOML bootstrap file + environment)
//! - Password hashing primitives
//! - API request/response types

pub mod api;
pub mod config;
pub mod error;

pub use error::{Error, Result};
