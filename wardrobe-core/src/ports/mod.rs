//! Port definitions
//!
//! Ports are the seams between the services and the outside world. Services
//! depend on these traits; adapters provide the concrete implementations.

mod auth;
mod session_storage;

pub use auth::AuthGateway;
pub use session_storage::SessionStorage;
