//! `RocksDB` storage implementation.

use std::path::Path;
use std::sync::Arc;

use rocksdb::{
    BoundColumnFamily, ColumnFamilyDescriptor, DBWithThreadMode, IteratorMode, MultiThreaded,
    Options,
};

use crate::error::{Result, StoreError};
use crate::types::ServiceRecord;
use crate::Store;

/// Column family holding Service records, keyed by name.
const CF_SERVICES: &str = "services";

/// RocksDB-backed storage implementation.
pub struct RocksStore {
    db: Arc<DBWithThreadMode<MultiThreaded>>,
}

impl RocksStore {
    /// Open or create a `RocksDB` database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_descriptors = vec![ColumnFamilyDescriptor::new(CF_SERVICES, Options::default())];

        let db = DBWithThreadMode::open_cf_descriptors(&opts, path, cf_descriptors)
            .map_err(|e| StoreError::Database(e.to_string()))?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Get the services column family handle.
    fn cf(&self) -> Result<Arc<BoundColumnFamily<'_>>> {
        self.db
            .cf_handle(CF_SERVICES)
            .ok_or_else(|| StoreError::Database(format!("column family not found: {CF_SERVICES}")))
    }

    /// Serialize a value using CBOR.
    fn serialize<T: serde::Serialize>(value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize a value from CBOR.
    fn deserialize<T: serde::de::DeserializeOwned>(data: &[u8]) -> Result<T> {
        ciborium::from_reader(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Store for RocksStore {
    fn put_service(&self, record: &ServiceRecord) -> Result<()> {
        let cf = self.cf()?;
        let value = Self::serialize(record)?;

        self.db
            .put_cf(&cf, record.name.as_bytes(), value)
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn get_service(&self, name: &str) -> Result<Option<ServiceRecord>> {
        let cf = self.cf()?;

        self.db
            .get_cf(&cf, name.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))?
            .map(|data| Self::deserialize(&data))
            .transpose()
    }

    fn delete_service(&self, name: &str) -> Result<()> {
        let cf = self.cf()?;

        if self.get_service(name)?.is_none() {
            return Err(StoreError::NotFound);
        }

        self.db
            .delete_cf(&cf, name.as_bytes())
            .map_err(|e| StoreError::Database(e.to_string()))
    }

    fn list_services(&self) -> Result<Vec<ServiceRecord>> {
        let cf = self.cf()?;

        let mut records = Vec::new();
        for item in self.db.iterator_cf(&cf, IteratorMode::Start) {
            let (_, value) = item.map_err(|e| StoreError::Database(e.to_string()))?;
            records.push(Self::deserialize(&value)?);
        }

        Ok(records)
    }
}
