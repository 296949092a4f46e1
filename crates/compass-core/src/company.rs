//! Company record with input-sanitizing setters
//!
//! Every write to a free-text field runs through [`sanitize`]: characters
//! outside the allowed set are stripped and the value is truncated to
//! [`MAX_FIELD_LEN`]. Sanitization degrades input instead of rejecting it,
//! so setters never fail.

use serde::{Deserialize, Serialize};

/// Maximum stored length of a free-text field, in characters.
pub const MAX_FIELD_LEN: usize = 50;

/// A company record.
///
/// `id` is `None` until the record has been stored; the owning store assigns
/// identifiers and they are immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Store-assigned identifier
    pub id: Option<i64>,
    name: String,
    location: Option<String>,
}

impl Company {
    /// Create a record from raw form input, sanitizing both fields
    #[must_use]
    pub fn new(name: &str, location: &str) -> Self {
        let mut company = Self::default();
        company.set_name(name);
        company.set_location(location);
        company
    }

    /// Sanitized company name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sanitized location, if one was given
    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Set the name, sanitizing the input
    pub fn set_name(&mut self, name: &str) {
        self.name = sanitize(name);
    }

    /// Set the location, sanitizing the input
    ///
    /// An input that sanitizes to the empty string clears the field.
    pub fn set_location(&mut self, location: &str) {
        let clean = sanitize(location);
        self.location = if clean.is_empty() { None } else { Some(clean) };
    }

    /// Restore a record from storage without re-sanitizing
    ///
    /// Only for store implementations reading back rows they wrote through
    /// the sanitizing path.
    #[must_use]
    pub fn from_stored(id: i64, name: String, location: Option<String>) -> Self {
        Self {
            id: Some(id),
            name,
            location,
        }
    }
}

/// Strip disallowed characters and bound the length of a free-text value.
///
/// Keeps ASCII alphanumerics, whitespace, and `. , ' - & ( ) @`; trims, then
/// truncates to [`MAX_FIELD_LEN`] characters, then trims the tail again.
/// The final trim keeps the function idempotent: a truncation that exposes a
/// trailing space would otherwise shrink the value on the next pass.
#[must_use]
pub fn sanitize(input: &str) -> String {
    let stripped: String = input
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || ".,'-&()@".contains(*c))
        .collect();
    let bounded: String = stripped.trim().chars().take(MAX_FIELD_LEN).collect();
    bounded.trim_end().to_string()
}
