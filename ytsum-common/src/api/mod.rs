//! API module for shared HTTP API functionality
//!
//! # Design Principle
//!
//! This module contains ONLY:
//! - Pure functions (no HTTP framework dependencies)
//! - Shared request/response types
//!
//! The service crate wraps these with axum handlers.

pub mod auth;
pub mod types;

pub use auth::{hash_password, verify_password};
pub use types::{
    AskRequest, AskResponse, CredentialsRequest, ResponseStatus, StatusResponse,
    SummarizeRequest, SummarizeResponse,
};
