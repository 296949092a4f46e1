//! Process-wide active-session counter
//!
//! A [`SessionRegistry`] is constructed once at startup and shared (via
//! `Arc`) with everything that creates or destroys sessions. It is a plain
//! injected object, not a hidden static, so tests get a fresh counter each.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Atomic counter of currently active sessions.
///
/// Increment and decrement are commutative, so plain atomic
/// read-modify-write is all the coordination needed; no lock, no lost
/// updates. `decrement` saturates at zero: a double destroy of one logical
/// session can never drive the count negative.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    active: AtomicUsize,
}

impl SessionRegistry {
    /// Create a registry with no active sessions
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a session start, returning the new active count
    pub fn increment(&self) -> usize {
        self.active.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a session end, returning the new active count
    ///
    /// Saturates at zero instead of wrapping.
    pub fn decrement(&self) -> usize {
        let prev = self
            .active
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |v| v.checked_sub(1));
        match prev {
            Ok(v) => v - 1,
            Err(_) => 0,
        }
    }

    /// Current number of active sessions
    #[inline]
    #[must_use]
    pub fn current(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn increment_and_decrement_return_new_count() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.increment(), 1);
        assert_eq!(registry.increment(), 2);
        assert_eq!(registry.decrement(), 1);
        assert_eq!(registry.current(), 1);
    }

    #[test]
    fn decrement_saturates_at_zero() {
        let registry = SessionRegistry::new();
        assert_eq!(registry.decrement(), 0);
        assert_eq!(registry.current(), 0);

        registry.increment();
        registry.decrement();
        assert_eq!(registry.decrement(), 0);
    }

    #[test]
    fn concurrent_mutation_loses_no_updates() {
        let registry = Arc::new(SessionRegistry::new());
        let threads = 8;
        let per_thread = 1000;

        let handles: Vec<_> = (0..threads)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    for _ in 0..per_thread {
                        registry.increment();
                    }
                    for _ in 0..per_thread / 2 {
                        registry.decrement();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // creations - destructions, and never observed negative by type
        assert_eq!(registry.current(), threads * per_thread / 2);
    }
}
