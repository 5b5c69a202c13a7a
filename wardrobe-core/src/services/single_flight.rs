//! Coalescing of identical in-flight operations
//!
//! The first caller for a key runs the operation; callers arriving while it
//! is running block until it finishes and receive a clone of the same
//! outcome. Once finished the key is forgotten, so a later call runs again.

use std::collections::HashMap;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

use sha2::{Digest, Sha256};

use crate::domain::result::{Error, Result};

struct Flight<T> {
    outcome: Mutex<Option<Result<T>>>,
    done: Condvar,
}

impl<T: Clone> Flight<T> {
    fn new() -> Self {
        Self {
            outcome: Mutex::new(None),
            done: Condvar::new(),
        }
    }

    fn complete(&self, outcome: Result<T>) {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = Some(outcome);
        self.done.notify_all();
    }

    fn wait(&self) -> Result<T> {
        let mut slot = self.outcome.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(outcome) = slot.as_ref() {
                return outcome.clone();
            }
            slot = self.done.wait(slot).unwrap_or_else(PoisonError::into_inner);
        }
    }
}

pub struct SingleFlight<T> {
    flights: Mutex<HashMap<String, Arc<Flight<T>>>>,
}

impl<T: Clone> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> SingleFlight<T> {
    pub fn new() -> Self {
        Self {
            flights: Mutex::new(HashMap::new()),
        }
    }

    /// Run `operation` unless an identical one is already running
    pub fn run<F>(&self, key: &str, operation: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let (flight, leader) = {
            let mut flights = self.flights.lock().unwrap_or_else(PoisonError::into_inner);
            match flights.get(key) {
                Some(existing) => (Arc::clone(existing), false),
                None => {
                    let flight = Arc::new(Flight::new());
                    flights.insert(key.to_string(), Arc::clone(&flight));
                    (flight, true)
                }
            }
        };

        if !leader {
            tracing::debug!("joining in-flight operation");
            return flight.wait();
        }

        let mut guard = LeaderGuard {
            group: self,
            key,
            flight: &flight,
            finished: false,
        };
        let outcome = operation();
        guard.finish(outcome.clone());
        outcome
    }

    /// Number of operations currently running
    pub fn in_flight(&self) -> usize {
        self.flights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn forget(&self, key: &str) {
        self.flights
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

/// Releases waiters even if the leader's operation panics
struct LeaderGuard<'a, T: Clone> {
    group: &'a SingleFlight<T>,
    key: &'a str,
    flight: &'a Flight<T>,
    finished: bool,
}

impl<T: Clone> LeaderGuard<'_, T> {
    fn finish(&mut self, outcome: Result<T>) {
        self.group.forget(self.key);
        self.flight.complete(outcome);
        self.finished = true;
    }
}

impl<T: Clone> Drop for LeaderGuard<'_, T> {
    fn drop(&mut self) {
        if !self.finished {
            self.finish(Err(Error::Network("operation aborted".to_string())));
        }
    }
}

/// Key for a login attempt; the credentials themselves are never stored
pub fn credential_key(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update([0u8]);
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
