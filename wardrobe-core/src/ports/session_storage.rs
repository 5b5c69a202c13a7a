//! Session storage port - durable key/value storage for client state

use crate::domain::result::Result;

/// Durable string storage scoped to one client installation
///
/// This is the equivalent of a browser's local storage: a handful of keys,
/// each holding a serialized value. Implementations must make `set` a full
/// overwrite and `remove` idempotent.
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing whatever was there
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}
