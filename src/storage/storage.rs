use std::io::Cursor;

use bytes::Bytes;
use tokio::io::AsyncRead;
use url::Url;

use crate::size::Size;
use crate::storage::Result;
use crate::types::{Confirm, Metadata};

/// Result of a successful upload: the id the host library persists and the
/// metadata as enriched by the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct Uploaded {
    pub id: String,
    pub metadata: Metadata,
}

pub type Reader = Box<dyn AsyncRead + Send + Unpin>;

/// Contract every attachment backend fulfills for the host library.
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    async fn upload(&self, data: &[u8], metadata: Metadata) -> Result<Uploaded>;
    async fn download(&self, id: &str) -> Result<Bytes>;

    async fn open(&self, id: &str) -> Result<Reader> {
        let data = self.download(id).await?;

        Ok(Box::new(Cursor::new(data)))
    }

    async fn read(&self, id: &str) -> Result<Vec<u8>> {
        Ok(self.download(id).await?.to_vec())
    }

    async fn exists(&self, id: &str) -> Result<bool>;
    async fn delete(&self, id: &str) -> Result<()>;

    // no network access, size names are backend specific
    fn url(&self, id: &str, size: Option<&str>) -> Result<String>;

    /// Removes everything the backend owns. Refuses to run without `Confirm`.
    async fn clear(&self, confirm: Option<Confirm>) -> Result<()>;

    /// Capability check for photo-host specific behavior.
    fn as_photo_host(&self) -> Option<&dyn PhotoHost> {
        None
    }
}

/// Extra capabilities of a backend that keeps photos on a photo-hosting service.
#[async_trait::async_trait]
pub trait PhotoHost: Send + Sync {
    fn person_id(&self) -> &str;
    fn page_url(&self, id: &str) -> Result<String>;
    fn asset_url(&self, id: &str, size: Size) -> Result<String>;
    async fn fetch(&self, url: &Url) -> Result<Bytes>;
}
