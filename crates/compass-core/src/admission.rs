//! Session admission policy for demo mode
//!
//! Every inbound request is checked before routing: a request with no
//! existing session is turned away once the active-session count reaches
//! the capacity threshold. Requests that already carry a session always
//! pass, and a rejected request never creates one.

use crate::registry::SessionRegistry;

/// Default concurrent-session capacity in demo mode
pub const MAX_SESSIONS: usize = 3;

/// Outcome of an admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Forward the request to routing
    Admit,
    /// Capacity reached; serve the busy page and stop
    Reject,
}

impl Verdict {
    /// Check whether the request may proceed
    #[inline]
    #[must_use]
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Capacity-threshold admission check.
///
/// Pure decision logic: never errors, never blocks. The worst case is the
/// caller serving a fixed busy page.
#[derive(Debug, Clone, Copy)]
pub struct AdmissionPolicy {
    max_sessions: usize,
}

impl AdmissionPolicy {
    /// Policy with the default capacity of [`MAX_SESSIONS`]
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_sessions: MAX_SESSIONS,
        }
    }

    /// Policy with an explicit capacity
    #[inline]
    #[must_use]
    pub fn with_capacity(max_sessions: usize) -> Self {
        Self { max_sessions }
    }

    /// Configured capacity threshold
    #[inline]
    #[must_use]
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Decide whether a request may proceed.
    ///
    /// Rejects only when the request carries no existing session and the
    /// registry is at or above capacity.
    #[must_use]
    pub fn check(&self, has_session: bool, registry: &SessionRegistry) -> Verdict {
        if !has_session && registry.current() >= self.max_sessions {
            Verdict::Reject
        } else {
            Verdict::Admit
        }
    }
}

impl Default for AdmissionPolicy {
    fn default() -> Self {
        Self::new()
    }
}
