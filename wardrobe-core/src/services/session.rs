//! Session context - the in-memory view of who is logged in
//!
//! One `SessionContext` is created when the application starts and shared
//! (behind an `Arc`) with everything that needs to know the current user.
//! It mirrors the [`SessionStore`]: the store is written first, then the
//! in-memory state follows.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;

use crate::domain::result::{Error, Result};
use crate::domain::SessionRecord;
use crate::ports::AuthGateway;
use crate::services::session_store::SessionStore;
use crate::services::single_flight::{credential_key, SingleFlight};

/// Lifecycle of the session
///
/// `Initializing` only exists while the context is being constructed; there
/// is no transition back to it.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Initializing,
    Authenticated(SessionRecord),
    Anonymous,
}

pub struct SessionContext {
    store: Arc<SessionStore>,
    auth: Arc<dyn AuthGateway>,
    state: RwLock<SessionState>,
    logins: SingleFlight<SessionRecord>,
}

impl SessionContext {
    /// Load the stored session, clearing it if it is not well-formed
    pub fn new(store: Arc<SessionStore>, auth: Arc<dyn AuthGateway>) -> Self {
        let context = Self {
            store,
            auth,
            state: RwLock::new(SessionState::Initializing),
            logins: SingleFlight::new(),
        };
        context.initialize();
        context
    }

    fn initialize(&self) {
        let next = match self.store.get_current_user() {
            Some(record) if record.is_valid() => {
                tracing::info!(user_id = record.id, "restored stored session");
                SessionState::Authenticated(record)
            }
            _ => {
                if let Err(e) = self.store.clear() {
                    tracing::warn!(error = %e, "failed to clear stored session");
                }
                SessionState::Anonymous
            }
        };
        self.set_state(next);
    }

    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_state(&self, next: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    pub fn current_user(&self) -> Option<SessionRecord> {
        match self.state() {
            SessionState::Authenticated(record) => Some(record),
            _ => None,
        }
    }

    /// True iff a current record exists and is still well-formed
    pub fn is_authenticated(&self) -> bool {
        self.current_user().is_some_and(|record| record.is_valid())
    }

    /// Current user, or a local `Unauthenticated` error
    pub fn require_user(&self) -> Result<SessionRecord> {
        self.current_user()
            .filter(SessionRecord::is_valid)
            .ok_or_else(|| Error::Unauthenticated("You are not logged in".to_string()))
    }

    /// Sign in and persist the returned record
    ///
    /// Identical concurrent attempts share a single backend call.
    pub fn login(&self, username: &str, password: &str) -> Result<SessionRecord> {
        let key = credential_key(username, password);
        self.logins
            .run(&key, || self.perform_login(username, password))
    }

    fn perform_login(&self, username: &str, password: &str) -> Result<SessionRecord> {
        let response = self.auth.sign_in(username, password)?;

        let mut record = SessionRecord::from_value(response).map_err(|e| {
            tracing::warn!(error = %e, "sign-in response rejected");
            Error::IncompleteUserData
        })?;
        record.logged_in_at = Some(Utc::now());

        self.store.persist(&record)?;
        tracing::info!(user_id = record.id, "logged in");
        self.set_state(SessionState::Authenticated(record.clone()));
        Ok(record)
    }

    /// Forget the current user; safe to call when already logged out
    pub fn logout(&self) -> Result<()> {
        self.set_state(SessionState::Anonymous);
        tracing::info!("logged out");
        self.store.clear()
    }

    /// Create an account, then log into it with the same credentials
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<SessionRecord> {
        validate_registration(username, email, password)?;

        let confirmation = self.auth.sign_up(username, email, password)?;
        tracing::debug!(%confirmation, "account created");

        self.login(username, password)
    }

    /// Drop to `Anonymous` if the store no longer holds a valid record
    ///
    /// Returns whether the context is still authenticated.
    pub fn reconcile(&self) -> bool {
        if !self.is_authenticated() {
            return false;
        }
        match self.store.get_current_user() {
            Some(stored) if stored.is_valid() => true,
            _ => {
                tracing::info!("stored session disappeared, switching to anonymous");
                self.set_state(SessionState::Anonymous);
                false
            }
        }
    }
}

fn validate_registration(username: &str, email: &str, password: &str) -> Result<()> {
    if username.trim().is_empty() {
        return Err(Error::validation("Username is required"));
    }
    if password.is_empty() {
        return Err(Error::validation("Password is required"));
    }
    let email = email.trim();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(()),
        _ => Err(Error::validation(format!("Invalid e-mail address: '{}'", email))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_validation() {
        assert!(validate_registration("ana", "ana@example.com", "pw").is_ok());
        assert!(validate_registration(" ", "ana@example.com", "pw").is_err());
        assert!(validate_registration("ana", "ana@example.com", "").is_err());
        assert!(validate_registration("ana", "ana.example.com", "pw").is_err());
        assert!(validate_registration("ana", "@example.com", "pw").is_err());
    }
}
