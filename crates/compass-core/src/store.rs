//! The `CompanyStore` capability interface
//!
//! CRUD over [`Company`] records with two interchangeable backings: the
//! per-session [`crate::ephemeral::EphemeralStore`] used in demo mode and a
//! durable store selected in normal mode. Which one is active is decided
//! once at startup; consumers only ever see the trait.

use crate::company::Company;
use crate::error::StoreError;

/// CRUD over company records.
///
/// Implementations are `Send + Sync` and object-safe so the active backend
/// can be selected at startup and shared as `Arc<dyn CompanyStore>`.
pub trait CompanyStore: Send + Sync {
    /// All records in stable insertion order.
    ///
    /// Returns an owned snapshot; mutating it does not affect the store.
    fn list(&self) -> Result<Vec<Company>, StoreError>;

    /// Fetch one record by identifier
    ///
    /// # Errors
    /// - `StoreError::NotFound` if no record has that id
    fn get(&self, id: i64) -> Result<Company, StoreError>;

    /// Store a new record, assigning a fresh identifier
    ///
    /// Any identifier on the input is ignored; fields are sanitized.
    ///
    /// # Errors
    /// - `StoreError::Storage` on backend failure
    fn add(&self, company: &Company) -> Result<(), StoreError>;

    /// Overwrite the name and location of an existing record
    ///
    /// The identifier is immutable after creation; fields are re-sanitized.
    ///
    /// # Errors
    /// - `StoreError::NotFound` if `company.id` matches no record
    fn update(&self, company: &Company) -> Result<(), StoreError>;

    /// Remove a record permanently
    ///
    /// # Errors
    /// - `StoreError::NotFound` if no record has that id
    fn delete(&self, id: i64) -> Result<(), StoreError>;
}
