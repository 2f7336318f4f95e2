use crate::error::VaultError;
use crate::storage::ObjectRecord;
use sled::Db;
use std::path::Path;

const OBJECTS_TREE: &str = "objects";

/// Object records in sled, JSON-encoded, keyed by the raw object key.
#[derive(Clone)]
pub struct MetadataStore {
    db: Db,
}

impl MetadataStore {
    pub fn open(path: &Path) -> Result<Self, VaultError> {
        let db = sled::open(path).map_err(|e| VaultError::StoreFailure(e.to_string()))?;
        Ok(Self { db })
    }

    fn objects(&self) -> Result<sled::Tree, VaultError> {
        self.db
            .open_tree(OBJECTS_TREE)
            .map_err(|e| VaultError::StoreFailure(e.to_string()))
    }

    /// Insert or replace the record for `record.key`, returning the one it
    /// displaced.
    pub fn put_record(&self, record: &ObjectRecord) -> Result<Option<ObjectRecord>, VaultError> {
        let tree = self.objects()?;
        let json =
            serde_json::to_vec(record).map_err(|e| VaultError::StoreFailure(e.to_string()))?;
        let previous = tree
            .insert(record.key.as_bytes(), json)
            .map_err(|e| VaultError::StoreFailure(e.to_string()))?;
        decode(previous)
    }

    pub fn get_record(&self, key: &str) -> Result<Option<ObjectRecord>, VaultError> {
        let tree = self.objects()?;
        let val = tree
            .get(key.as_bytes())
            .map_err(|e| VaultError::StoreFailure(e.to_string()))?;
        decode(val)
    }

    /// Remove the record for `key`, returning it if there was one.
    pub fn delete_record(&self, key: &str) -> Result<Option<ObjectRecord>, VaultError> {
        let tree = self.objects()?;
        let removed = tree
            .remove(key.as_bytes())
            .map_err(|e| VaultError::StoreFailure(e.to_string()))?;
        decode(removed)
    }

    pub fn list_records(&self) -> Result<Vec<ObjectRecord>, VaultError> {
        let tree = self.objects()?;
        let mut records = Vec::new();
        for item in tree.iter() {
            let (_, val) = item.map_err(|e| VaultError::StoreFailure(e.to_string()))?;
            let record: ObjectRecord = serde_json::from_slice(&val)
                .map_err(|e| VaultError::StoreFailure(e.to_string()))?;
            records.push(record);
        }
        Ok(records)
    }

    pub fn flush(&self) -> Result<(), VaultError> {
        self.db
            .flush()
            .map(|_| ())
            .map_err(|e| VaultError::StoreFailure(e.to_string()))
    }
}

fn decode(val: Option<sled::IVec>) -> Result<Option<ObjectRecord>, VaultError> {
    match val {
        Some(bytes) => serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| VaultError::StoreFailure(e.to_string())),
        None => Ok(None),
    }
}
