//! Compass Core - company records and demo-mode admission
//!
//! The domain layer shared by every Compass backend and the web server:
//! - [`Company`]: a record whose free-text fields are sanitized on every
//!   write
//! - [`CompanyStore`]: the CRUD capability interface with interchangeable
//!   backings
//! - [`EphemeralStore`]: the bounded, fixture-seeded per-session store for
//!   demo mode
//! - [`SessionRegistry`] and [`AdmissionPolicy`]: the atomic session
//!   counter and the capacity gate consulting it
//! - [`Mode`]: the startup-time choice between demo and normal wiring

#![warn(unreachable_pub)]

pub mod admission;
pub mod company;
pub mod ephemeral;
pub mod error;
pub mod mode;
pub mod registry;
pub mod store;

// Re-exports for convenience
pub use admission::{AdmissionPolicy, Verdict, MAX_SESSIONS};
pub use company::{sanitize, Company, MAX_FIELD_LEN};
pub use ephemeral::{EphemeralStore, MAX_ROWS};
pub use error::StoreError;
pub use mode::Mode;
pub use registry::SessionRegistry;
pub use store::CompanyStore;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
