use std::path::{Component, Path, PathBuf};

use bytes::Bytes;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::storage::{Result, Storage, StorageError, Uploaded};
use crate::types::{Confirm, Metadata};

/// Local directory storage. Files have a single rendition, so size names
/// passed to `url` are ignored.
#[derive(Debug)]
pub struct FileSystem {
    base_path: PathBuf,
}

impl FileSystem {
    pub fn new(base_path: PathBuf) -> Self {
        FileSystem { base_path }
    }

    fn get_path(&self, id: &str) -> Result<PathBuf> {
        let mut components = Path::new(id).components();

        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.base_path.join(id)),
            _ => Err(StorageError::InvalidIdentifier(id.to_owned())),
        }
    }

    async fn create_dir(&self) -> Result<()> {
        match tokio::fs::create_dir_all(&self.base_path).await {
            Ok(_) => Ok(()),
            Err(e) => match e.kind() {
                std::io::ErrorKind::AlreadyExists => Ok(()),
                _ => Err(StorageError::IoError(format!("{:?}", e))),
            },
        }
    }

    async fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await
            .map_err(|e| StorageError::IoError(format!("{:?}", e)))?;

        file.write_all(data)
            .await
            .map_err(|e| StorageError::IoError(format!("{:?}", e)))
    }
}

#[async_trait::async_trait]
impl Storage for FileSystem {
    async fn upload(&self, data: &[u8], metadata: Metadata) -> Result<Uploaded> {
        let id = uuid::Uuid::new_v4().as_hyphenated().to_string();
        let path = self.get_path(&id)?;

        self.create_dir().await?;
        self.write(&path, data).await?;
        log::debug!("stored {} bytes at {:?}", data.len(), &path);

        Ok(Uploaded { id, metadata })
    }

    async fn download(&self, id: &str) -> Result<Bytes> {
        let path = self.get_path(id)?;

        match tokio::fs::read(&path).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) => match e.kind() {
                std::io::ErrorKind::NotFound => Err(StorageError::NotFound(id.to_owned())),
                _ => Err(StorageError::IoError(format!("{:?}", e))),
            },
        }
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let path = self.get_path(id)?;

        match tokio::fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) => match e.kind() {
                std::io::ErrorKind::NotFound => Ok(false),
                _ => Err(StorageError::IoError(format!("{:?}", e))),
            },
        }
    }

    // deleting a missing file is a no-op
    async fn delete(&self, id: &str) -> Result<()> {
        let path = self.get_path(id)?;

        match tokio::fs::remove_file(&path).await {
            Ok(_) => Ok(()),
            Err(e) => match e.kind() {
                std::io::ErrorKind::NotFound => Ok(()),
                _ => Err(StorageError::IoError(format!("{:?}", e))),
            },
        }
    }

    fn url(&self, id: &str, _size: Option<&str>) -> Result<String> {
        let path = self.get_path(id)?;

        Url::from_file_path(&path)
            .map(|url| url.to_string())
            .map_err(|_| StorageError::IoError(format!("{:?} is not an absolute path", path)))
    }

    async fn clear(&self, confirm: Option<Confirm>) -> Result<()> {
        if confirm.is_none() {
            return Err(StorageError::ConfirmationRequired);
        }

        let mut entries = match tokio::fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(StorageError::IoError(format!("{:?}", e))),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::IoError(format!("{:?}", e)))?
        {
            if entry.path().is_file() {
                tokio::fs::remove_file(entry.path())
                    .await
                    .map_err(|e| StorageError::IoError(format!("{:?}", e)))?;
            }
        }

        Ok(())
    }
}
