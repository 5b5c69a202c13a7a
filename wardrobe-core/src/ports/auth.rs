//! Authentication backend port
//!
//! The session context talks to the backend only through this trait, so
//! tests can script sign-in outcomes without a server.

use serde_json::Value as JsonValue;

use crate::domain::result::Result;

pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for a user record
    ///
    /// The returned value is untrusted; the caller validates its shape.
    fn sign_in(&self, username: &str, password: &str) -> Result<JsonValue>;

    /// Create an account, returning the backend's confirmation message
    fn sign_up(&self, username: &str, email: &str, password: &str) -> Result<String>;
}
