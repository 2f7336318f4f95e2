use crate::error::VaultError;
use md5::{Digest, Md5};
use sha2::Sha256;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use uuid::Uuid;

const OBJECTS_DIR: &str = "objects";

/// Blob bytes on local disk.
///
/// Each stored version lives at `objects/<sha256-hex(key)>.<etag>`. Keys
/// never become path components, so a key such as `../secret` is just an
/// opaque name. A version file is never rewritten in place: an overwrite
/// lands a new file and the caller removes the old one once nothing points
/// at it.
#[derive(Clone)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.data_dir.join(OBJECTS_DIR)
    }

    pub fn blob_path(&self, key: &str, etag: &str) -> PathBuf {
        let name = hex::encode(Sha256::digest(key.as_bytes()));
        self.objects_dir().join(format!("{}.{}", name, etag))
    }

    /// Stream-write object from an async reader. Returns (size, md5_hex).
    ///
    /// Bytes go to a temp file first and are renamed to the version path once
    /// the etag is known. The temp file is removed if anything fails.
    pub async fn write_object_stream<R: AsyncRead + Unpin + ?Sized>(
        &self,
        key: &str,
        reader: &mut R,
    ) -> Result<(u64, String), VaultError> {
        let dir = self.objects_dir();
        fs::create_dir_all(&dir).await.map_err(store_failure)?;

        let temp_path = dir.join(format!(".tmp.{}", Uuid::new_v4()));
        let result = self.write_version(key, reader, &temp_path).await;
        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    }

    async fn write_version<R: AsyncRead + Unpin + ?Sized>(
        &self,
        key: &str,
        reader: &mut R,
        temp_path: &Path,
    ) -> Result<(u64, String), VaultError> {
        let mut file = fs::File::create(temp_path).await.map_err(store_failure)?;

        let mut hasher = Md5::new();
        let mut total_size: u64 = 0;
        let mut buf = vec![0u8; 64 * 1024];

        loop {
            let n = reader.read(&mut buf).await.map_err(store_failure)?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n]).await.map_err(store_failure)?;
            hasher.update(&buf[..n]);
            total_size += n as u64;
        }

        file.flush().await.map_err(store_failure)?;
        drop(file);

        let etag = hex::encode(hasher.finalize());
        fs::rename(temp_path, self.blob_path(key, &etag))
            .await
            .map_err(store_failure)?;
        Ok((total_size, etag))
    }

    /// `Ok(None)` when no blob exists for this version of `key`.
    pub async fn open_object(&self, key: &str, etag: &str) -> Result<Option<fs::File>, VaultError> {
        match fs::File::open(self.blob_path(key, etag)).await {
            Ok(file) => Ok(Some(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(store_failure(e)),
        }
    }

    pub async fn delete_object(&self, key: &str, etag: &str) -> Result<(), VaultError> {
        match fs::remove_file(self.blob_path(key, etag)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(store_failure(e)),
        }
    }
}

fn store_failure(e: std::io::Error) -> VaultError {
    VaultError::StoreFailure(e.to_string())
}
