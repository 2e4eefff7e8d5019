//! `RocksDB` bookkeeping store for the StrataDB operator.
//!
//! This crate records which Services the operator has created so the
//! management API can list them without round-tripping to the cluster.
//! A single `services` column family holds CBOR-encoded records keyed by
//! Service name.
//!
//! # Example
//!
//! ```no_run
//! use stratadb_store::{RocksStore, Store};
//!
//! let store = RocksStore::open("/tmp/stratadb").unwrap();
//! let records = store.list_services().unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod rocks;
pub mod types;

pub use error::{Result, StoreError};
pub use rocks::RocksStore;
pub use types::ServiceRecord;

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer, allowing for different
/// implementations (e.g., `RocksDB`, in-memory for testing).
pub trait Store: Send + Sync {
    /// Insert or update a Service record.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn put_service(&self, record: &ServiceRecord) -> Result<()>;

    /// Get a Service record by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn get_service(&self, name: &str) -> Result<Option<ServiceRecord>>;

    /// Delete a Service record by name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no record exists for the name.
    fn delete_service(&self, name: &str) -> Result<()>;

    /// List all Service records, in key order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    fn list_services(&self) -> Result<Vec<ServiceRecord>>;
}
