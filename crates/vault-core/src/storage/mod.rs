//! The object store capability the gateway talks to.
//!
//! The gateway only sees [`ObjectStore`]. [`LocalStore`] is the bundled
//! implementation: blob bytes in [`FileStore`], records in [`MetadataStore`].

pub mod filesystem;
pub mod local;
pub mod metadata;

pub use filesystem::FileStore;
pub use local::LocalStore;
pub use metadata::MetadataStore;

use crate::error::VaultError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

pub type ObjectReader = Box<dyn AsyncRead + Send + Unpin>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub key: String,
    pub size: u64,
    /// Hex MD5 of the content, unquoted.
    pub etag: String,
    pub content_type: String,
    pub uploaded: DateTime<Utc>,
}

pub struct StoredObject {
    pub record: ObjectRecord,
    pub body: ObjectReader,
}

#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Stream `reader` into the store under `key`, replacing any existing object.
    async fn put(
        &self,
        key: &str,
        content_type: &str,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<ObjectRecord, VaultError>;

    /// `Ok(None)` when the key is absent.
    async fn get(&self, key: &str) -> Result<Option<StoredObject>, VaultError>;

    /// Succeeds whether or not the key existed.
    async fn delete(&self, key: &str) -> Result<(), VaultError>;

    /// All records, in no particular order.
    async fn list(&self) -> Result<Vec<ObjectRecord>, VaultError>;
}

/// Newest upload first. The sort is stable, so equal timestamps keep the
/// order the store returned them in.
pub fn sort_newest_first(records: &mut [ObjectRecord]) {
    records.sort_by(|a, b| b.uploaded.cmp(&a.uploaded));
}
