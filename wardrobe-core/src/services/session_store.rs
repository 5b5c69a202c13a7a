//! Session store - the persisted "currently logged in" record
//!
//! This is the only place that reads or writes the stored user. Reads never
//! fail: anything missing, unreadable or malformed is reported as no session.

use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::SessionRecord;
use crate::ports::SessionStorage;

/// Storage key holding the serialized session record
pub const SESSION_KEY: &str = "user";

pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Current stored user, or `None` if absent or malformed
    pub fn get_current_user(&self) -> Option<SessionRecord> {
        let raw = match self.storage.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored session");
                return None;
            }
        };

        let record = SessionRecord::parse(&raw);
        if record.is_none() {
            tracing::warn!("stored session is malformed, treating as logged out");
        }
        record
    }

    /// Replace the stored record
    pub fn persist(&self, record: &SessionRecord) -> Result<()> {
        let content = serde_json::to_string(record)?;
        self.storage.set(SESSION_KEY, &content)
    }

    /// Remove the stored record
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(SESSION_KEY)
    }

    /// Bearer token of the stored user, read fresh on every call
    pub fn token(&self) -> Option<String> {
        self.get_current_user()
            .and_then(|record| record.token)
            .filter(|token| !token.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory_storage::MemorySessionStorage;
    use crate::domain::result::Error;

    struct BrokenStorage;

    impl SessionStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::storage("disk on fire"))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::storage("disk on fire"))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::storage("disk on fire"))
        }
    }

    fn store_with(raw: Option<&str>) -> SessionStore {
        let storage = match raw {
            Some(raw) => MemorySessionStorage::with_entry(SESSION_KEY, raw),
            None => MemorySessionStorage::new(),
        };
        SessionStore::new(Arc::new(storage))
    }

    #[test]
    fn test_malformed_payloads_read_as_absent() {
        for raw in [
            r#"{"username": "a"}"#,
            r#"{"id": "7"}"#,
            "{not json",
            "null",
        ] {
            assert!(store_with(Some(raw)).get_current_user().is_none(), "{raw}");
        }
        assert!(store_with(None).get_current_user().is_none());
    }

    #[test]
    fn test_storage_errors_are_swallowed() {
        let store = SessionStore::new(Arc::new(BrokenStorage));
        assert!(store.get_current_user().is_none());
        assert!(store.token().is_none());
        assert!(store.persist(&SessionRecord::new(1, "a")).is_err());
    }

    #[test]
    fn test_persist_then_read() {
        let store = store_with(None);
        let record = SessionRecord::new(7, "a").with_token("tok");
        store.persist(&record).unwrap();

        assert_eq!(store.get_current_user(), Some(record));
        assert_eq!(store.token().as_deref(), Some("tok"));
    }

    #[test]
    fn test_clear() {
        let store = store_with(Some(r#"{"id": 7, "username": "a"}"#));
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.get_current_user().is_none());
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let store = store_with(Some(r#"{"id": 7, "token": ""}"#));
        assert!(store.token().is_none());
    }
}
