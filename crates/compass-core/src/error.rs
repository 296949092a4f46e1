//! Error types for the Compass core
//!
//! Store operations either succeed or fail definitively; there are no
//! retries. Admission rejection is not an error value at this layer: the
//! gate's verdict is a [`crate::admission::Verdict`], mapped to a response
//! by the web layer.

/// Errors raised by [`crate::store::CompanyStore`] implementations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with the requested identifier
    #[error("company not found with id: {0}")]
    NotFound(i64),

    /// Backend failure (persistent stores only)
    #[error("storage failure: {0}")]
    Storage(String),
}

impl StoreError {
    /// Check whether this is a missing-record failure
    #[inline]
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::NotFound(7);
        assert_eq!(err.to_string(), "company not found with id: 7");
        assert!(err.is_not_found());
    }

    #[test]
    fn storage_error_is_not_not_found() {
        let err = StoreError::Storage("disk full".to_string());
        assert!(!err.is_not_found());
    }
}
