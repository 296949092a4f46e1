//! Operating mode selection
//!
//! Resolved once at process start and fixed for the process lifetime:
//! `Demo` wires the admission gate and per-session in-memory stores,
//! `Local` wires the persistent store with no gating.

use std::str::FromStr;

/// Deployment profile chosen at startup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Constrained demo deployment: bounded sessions, ephemeral data
    Demo,
    /// Normal deployment: durable storage, no admission gating
    #[default]
    Local,
}

impl Mode {
    /// Check whether demo-mode wiring is active
    #[inline]
    #[must_use]
    pub fn is_demo(&self) -> bool {
        matches!(self, Self::Demo)
    }
}

impl FromStr for Mode {
    type Err = std::convert::Infallible;

    /// `"demo"` (case-insensitive) selects demo mode; any other value,
    /// including the empty string, selects local mode.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("demo") {
            Ok(Self::Demo)
        } else {
            Ok(Self::Local)
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Demo => write!(f, "demo"),
            Self::Local => write!(f, "local"),
        }
    }
}
