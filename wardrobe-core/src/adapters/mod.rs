//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for the wardrobe backend
//! - HTTP auth endpoints for the AuthGateway port
//! - Local files (or memory) for the SessionStorage port

pub mod auth;
pub mod file_storage;
pub mod http;
pub mod memory_storage;

#[cfg(test)]
pub mod mock_backend;
