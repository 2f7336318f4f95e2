use crate::error::VaultError;
use crate::storage::{
    FileStore, MetadataStore, ObjectRecord, ObjectStore, StoredObject,
};
use chrono::Utc;
use std::path::Path;
use tokio::io::AsyncRead;

/// Filesystem blobs plus a sled record per object.
///
/// Every upload writes a fresh version file, then swaps the record to point
/// at it, then removes the version it displaced. A record therefore always
/// names bytes that match its size and etag. Deletes drop the record before
/// the blob. A record whose blob has gone missing reads as absent.
#[derive(Clone)]
pub struct LocalStore {
    files: FileStore,
    metadata: MetadataStore,
}

impl LocalStore {
    pub fn new(files: FileStore, metadata: MetadataStore) -> Self {
        Self { files, metadata }
    }

    pub fn open(data_dir: &Path, metadata_dir: &Path) -> Result<Self, VaultError> {
        let metadata = MetadataStore::open(metadata_dir)?;
        Ok(Self::new(FileStore::new(data_dir), metadata))
    }

    pub fn metadata(&self) -> &MetadataStore {
        &self.metadata
    }
}

#[async_trait::async_trait]
impl ObjectStore for LocalStore {
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<ObjectRecord, VaultError> {
        let (size, etag) = self.files.write_object_stream(key, reader).await?;
        let record = ObjectRecord {
            key: key.to_string(),
            size,
            etag,
            content_type: content_type.to_string(),
            uploaded: Utc::now(),
        };
        let displaced = match self.metadata.put_record(&record) {
            Ok(displaced) => displaced,
            Err(e) => {
                let _ = self.files.delete_object(key, &record.etag).await;
                return Err(e);
            }
        };
        if let Some(old) = displaced {
            // Same etag means same bytes at the same path.
            if old.etag != record.etag {
                self.files.delete_object(key, &old.etag).await?;
            }
        }
        tracing::debug!(key = %key, size, "Stored object");
        Ok(record)
    }

    async fn get(&self, key: &str) -> Result<Option<StoredObject>, VaultError> {
        // An overwrite can remove the version between reading the record and
        // opening the file; the second pass then sees the new record.
        for _ in 0..2 {
            let record = match self.metadata.get_record(key)? {
                Some(r) => r,
                None => return Ok(None),
            };
            if let Some(file) = self.files.open_object(key, &record.etag).await? {
                return Ok(Some(StoredObject {
                    record,
                    body: Box::new(file),
                }));
            }
        }
        tracing::warn!(key = %key, "Record present but blob missing");
        Ok(None)
    }

    async fn delete(&self, key: &str) -> Result<(), VaultError> {
        match self.metadata.delete_record(key)? {
            Some(record) => self.files.delete_object(key, &record.etag).await,
            None => Ok(()),
        }
    }

    async fn list(&self) -> Result<Vec<ObjectRecord>, VaultError> {
        self.metadata.list_records()
    }
}
