//! In-memory per-session company store for demo mode
//!
//! Each demo session owns exactly one [`EphemeralStore`]; nothing is shared
//! across sessions and everything is discarded when the session ends. The
//! store is bounded at [`MAX_ROWS`] records and comes seeded with fixture
//! rows so a fresh session has data to look at.

use crate::company::Company;
use crate::error::StoreError;
use crate::store::CompanyStore;
use parking_lot::Mutex;

/// Capacity bound for one demo session's records
pub const MAX_ROWS: usize = 12;

/// Fixture rows seeded into every new store, ids 1..=10
const SEED_ROWS: [(&str, &str); 10] = [
    ("TechNova Solutions", "San Francisco, CA"),
    ("BlueFin Capital", "New York, NY"),
    ("GreenLeaf Energy", "Denver, CO"),
    ("Summit Health Systems", "Nashville, TN"),
    ("Apex Logistics Global", "Miami, FL"),
    ("Quantum Dynamics", "Boston, MA"),
    ("SilverLine Architecture", "Chicago, IL"),
    ("RedRock Consulting", "Phoenix, AZ"),
    ("Orbit Media Group", "Los Angeles, CA"),
    ("Cascade Engineering", "Seattle, WA"),
];

#[derive(Debug)]
struct Inner {
    rows: Vec<Company>,
    next_id: i64,
}

impl Inner {
    fn insert(&mut self, name: &str, location: &str) {
        let mut company = Company::new(name, location);
        company.id = Some(self.next_id);
        self.next_id += 1;
        self.rows.push(company);
    }
}

/// Session-scoped in-memory [`CompanyStore`].
///
/// Identifiers come from a per-instance monotonic counter starting at 1.
/// Access is serialized by an internal mutex, so concurrent requests on the
/// same session are safe without any affinity assumption upstream.
#[derive(Debug)]
pub struct EphemeralStore {
    inner: Mutex<Inner>,
}

impl EphemeralStore {
    /// Create a store pre-seeded with the fixture rows
    #[must_use]
    pub fn new() -> Self {
        let mut inner = Inner {
            rows: Vec::with_capacity(MAX_ROWS),
            next_id: 1,
        };
        for (name, location) in SEED_ROWS {
            inner.insert(name, location);
        }
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// Current number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().rows.len()
    }

    /// Check whether the store holds no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for EphemeralStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CompanyStore for EphemeralStore {
    fn list(&self) -> Result<Vec<Company>, StoreError> {
        Ok(self.inner.lock().rows.clone())
    }

    fn get(&self, id: i64) -> Result<Company, StoreError> {
        self.inner
            .lock()
            .rows
            .iter()
            .find(|c| c.id == Some(id))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    fn add(&self, company: &Company) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.rows.len() >= MAX_ROWS {
            // Bounded demo data set: overflow is dropped, not an error
            tracing::warn!(capacity = MAX_ROWS, "ephemeral store full, add ignored");
            return Ok(());
        }
        inner.insert(company.name(), company.location().unwrap_or(""));
        Ok(())
    }

    fn update(&self, company: &Company) -> Result<(), StoreError> {
        let id = company.id.ok_or(StoreError::NotFound(0))?;
        let mut inner = self.inner.lock();
        let existing = inner
            .rows
            .iter_mut()
            .find(|c| c.id == Some(id))
            .ok_or(StoreError::NotFound(id))?;
        existing.set_name(company.name());
        existing.set_location(company.location().unwrap_or(""));
        Ok(())
    }

    fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        let before = inner.rows.len();
        inner.rows.retain(|c| c.id != Some(id));
        if inner.rows.len() == before {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
