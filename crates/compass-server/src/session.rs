//! Session lifecycle and the active-session count
//!
//! Sessions are cookie-keyed entries in a concurrent table. Creation
//! increments the shared [`SessionRegistry`] and destruction decrements it
//! exactly once, whatever the cause: inactivity expiry found by the sweeper,
//! lazy expiry on access, or the shutdown sweep. In demo mode each session
//! lazily owns the [`EphemeralStore`] backing its CRUD pages.

use compass_core::{EphemeralStore, SessionRegistry};
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Request-scoped session identifier, set by the admission middleware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug)]
struct SessionEntry {
    deadline: Instant,
    /// Demo-mode data, created on first store access
    store: OnceLock<Arc<EphemeralStore>>,
}

/// Concurrent session table with inactivity expiry.
///
/// The registry count and the table are kept consistent by a single rule:
/// only a successful insert increments and only a successful remove
/// decrements. `DashMap::remove` yields the entry at most once, so a
/// session that is both swept and explicitly destroyed still counts down
/// exactly once.
#[derive(Debug)]
pub struct SessionManager {
    entries: DashMap<Uuid, SessionEntry>,
    registry: Arc<SessionRegistry>,
    ttl: Duration,
}

impl SessionManager {
    /// Create a manager over a shared registry with one inactivity timeout
    #[must_use]
    pub fn new(registry: Arc<SessionRegistry>, ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            registry,
            ttl,
        }
    }

    /// Start a new session, returning its identifier
    pub fn create(&self) -> SessionId {
        let id = Uuid::new_v4();
        self.entries.insert(
            id,
            SessionEntry {
                deadline: Instant::now() + self.ttl,
                store: OnceLock::new(),
            },
        );
        let active = self.registry.increment();
        tracing::info!(session = %id, "new session created, active users: {active}");
        SessionId(id)
    }

    /// Validate a session and extend its deadline.
    ///
    /// An expired entry is destroyed on the spot and the call reports no
    /// session, so the caller goes back through admission.
    pub fn touch(&self, id: SessionId) -> bool {
        {
            let Some(mut entry) = self.entries.get_mut(&id.0) else {
                return false;
            };
            if entry.deadline > Instant::now() {
                entry.deadline = Instant::now() + self.ttl;
                return true;
            }
        }
        // Deadline passed; the guard is dropped before removal
        self.destroy(id);
        false
    }

    /// End a session, decrementing the active count if it was still live
    pub fn destroy(&self, id: SessionId) {
        if self.entries.remove(&id.0).is_some() {
            let active = self.registry.decrement();
            tracing::info!(session = %id.0, "session ended, active users: {active}");
        }
    }

    /// Destroy every session past its deadline, returning how many
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let expired: Vec<Uuid> = self
            .entries
            .iter()
            .filter(|e| e.deadline <= now)
            .map(|e| *e.key())
            .collect();
        let count = expired.len();
        for id in expired {
            self.destroy(SessionId(id));
        }
        count
    }

    /// Destroy all sessions (process shutdown sweep)
    pub fn shutdown(&self) {
        let all: Vec<Uuid> = self.entries.iter().map(|e| *e.key()).collect();
        for id in all {
            self.destroy(SessionId(id));
        }
    }

    /// The demo-mode store owned by a session, created on first access
    ///
    /// Returns `None` when the session no longer exists.
    pub fn ephemeral_store(&self, id: SessionId) -> Option<Arc<EphemeralStore>> {
        self.entries
            .get(&id.0)
            .map(|entry| Arc::clone(entry.store.get_or_init(|| Arc::new(EphemeralStore::new()))))
    }

    /// Number of live entries in the table
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no sessions exist
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Run the expiry sweep on an interval until the task is dropped
    pub fn spawn_sweeper(self: Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let manager = self;
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let swept = manager.sweep();
                if swept > 0 {
                    tracing::debug!(swept, "expired sessions removed");
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn manager(ttl: Duration) -> (Arc<SessionRegistry>, SessionManager) {
        let registry = Arc::new(SessionRegistry::new());
        let manager = SessionManager::new(Arc::clone(&registry), ttl);
        (registry, manager)
    }

    #[test]
    fn create_and_destroy_move_the_count() {
        let (registry, manager) = manager(Duration::from_secs(60));

        let a = manager.create();
        let b = manager.create();
        assert_eq!(registry.current(), 2);

        manager.destroy(a);
        assert_eq!(registry.current(), 1);
        assert!(manager.touch(b));
        assert!(!manager.touch(a));
    }

    #[test]
    fn double_destroy_decrements_once() {
        let (registry, manager) = manager(Duration::from_secs(60));
        let id = manager.create();
        manager.create();

        manager.destroy(id);
        manager.destroy(id);
        assert_eq!(registry.current(), 1);
    }

    #[test]
    fn touch_expires_stale_sessions() {
        let (registry, manager) = manager(Duration::ZERO);
        let id = manager.create();
        assert_eq!(registry.current(), 1);

        assert!(!manager.touch(id));
        assert_eq!(registry.current(), 0);
        assert!(manager.is_empty());
    }

    #[test]
    fn sweep_removes_only_expired_entries() {
        let registry = Arc::new(SessionRegistry::new());
        let stale = SessionManager::new(Arc::clone(&registry), Duration::ZERO);
        let stale_a = stale.create();
        let stale_b = stale.create();

        assert_eq!(stale.sweep(), 2);
        assert_eq!(registry.current(), 0);
        assert!(!stale.touch(stale_a));
        assert!(!stale.touch(stale_b));

        let fresh = SessionManager::new(Arc::clone(&registry), Duration::from_secs(60));
        fresh.create();
        assert_eq!(fresh.sweep(), 0);
        assert_eq!(registry.current(), 1);
    }

    #[test]
    fn shutdown_destroys_everything() {
        let (registry, manager) = manager(Duration::from_secs(60));
        for _ in 0..3 {
            manager.create();
        }

        manager.shutdown();
        assert_eq!(registry.current(), 0);
        assert!(manager.is_empty());
    }

    #[test]
    fn ephemeral_store_is_per_session_and_stable() {
        let (_registry, manager) = manager(Duration::from_secs(60));
        let a = manager.create();
        let b = manager.create();

        let store_a = manager.ephemeral_store(a).unwrap();
        let store_b = manager.ephemeral_store(b).unwrap();
        assert!(!Arc::ptr_eq(&store_a, &store_b));

        // Same session resolves to the same store
        let again = manager.ephemeral_store(a).unwrap();
        assert!(Arc::ptr_eq(&store_a, &again));

        manager.destroy(a);
        assert!(manager.ephemeral_store(a).is_none());
    }
}
