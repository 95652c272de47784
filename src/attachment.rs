//! Attachment handle as seen by application code.
//!
//! `UploadedFile` pairs a stored id with its backend and metadata. When the
//! backend is a photo host it answers size-aware questions (url per size,
//! width, height, photo page) from the recorded size table or the
//! identifier; for any other backend it forwards to that backend's own
//! behavior.

use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use url::Url;

use crate::consts::{SIZES_KEY, SIZE_HEIGHT_FIELD, SIZE_NAME_FIELD, SIZE_URL_FIELD, SIZE_WIDTH_FIELD};
use crate::size::Size;
use crate::storage::{Result, Storage, Uploaded};
use crate::types::Metadata;

const WIDTH_KEY: &str = "width";
const HEIGHT_KEY: &str = "height";

#[derive(Clone)]
pub struct UploadedFile {
    id: String,
    storage: Arc<dyn Storage>,
    metadata: Metadata,
}

impl UploadedFile {
    pub fn new(id: impl Into<String>, storage: Arc<dyn Storage>, metadata: Metadata) -> Self {
        Self {
            id: id.into(),
            storage,
            metadata,
        }
    }

    pub async fn upload(storage: Arc<dyn Storage>, data: &[u8], metadata: Metadata) -> Result<Self> {
        let Uploaded { id, metadata } = storage.upload(data, metadata).await?;

        Ok(Self::new(id, storage, metadata))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Url of the given size, `Original` when no size is given.
    pub fn url(&self, size: Option<&str>) -> Result<String> {
        let host = match self.storage.as_photo_host() {
            Some(host) => host,
            None => return self.storage.url(&self.id, size),
        };

        let size = parse_size(size)?;
        match self.size_attribute(size, SIZE_URL_FIELD).and_then(Value::as_str) {
            Some(url) => Ok(url.to_owned()),
            None => host.asset_url(&self.id, size),
        }
    }

    pub fn width(&self, size: Option<&str>) -> Result<Option<u64>> {
        self.dimension(size, SIZE_WIDTH_FIELD, WIDTH_KEY)
    }

    pub fn height(&self, size: Option<&str>) -> Result<Option<u64>> {
        self.dimension(size, SIZE_HEIGHT_FIELD, HEIGHT_KEY)
    }

    /// Human facing photo page, only for photo hosts.
    pub fn page_url(&self) -> Result<Option<String>> {
        self.storage
            .as_photo_host()
            .map(|host| host.page_url(&self.id))
            .transpose()
    }

    pub async fn download(&self) -> Result<Bytes> {
        match self.storage.as_photo_host() {
            Some(host) => {
                let url = Url::parse(&self.url(None)?)?;
                host.fetch(&url).await
            }
            None => self.storage.download(&self.id).await,
        }
    }

    pub async fn read(&self) -> Result<Vec<u8>> {
        Ok(self.download().await?.to_vec())
    }

    pub async fn exists(&self) -> Result<bool> {
        self.storage.exists(&self.id).await
    }

    pub async fn delete(&self) -> Result<()> {
        self.storage.delete(&self.id).await
    }

    // photo hosts answer from the size table, other backends from the plain
    // dimension metadata the host library records
    fn dimension(&self, size: Option<&str>, field: &str, key: &str) -> Result<Option<u64>> {
        if self.storage.as_photo_host().is_none() {
            return Ok(self.metadata.get(key).and_then(Value::as_u64));
        }

        let size = parse_size(size)?;

        Ok(self.size_attribute(size, field).and_then(Value::as_u64))
    }

    fn size_attribute(&self, size: Size, field: &str) -> Option<&Value> {
        self.metadata
            .get(SIZES_KEY)?
            .as_array()?
            .iter()
            .find(|entry| entry.get(SIZE_NAME_FIELD).and_then(Value::as_str) == Some(size.name()))?
            .get(field)
    }
}

fn parse_size(size: Option<&str>) -> Result<Size> {
    match size {
        Some(name) => Size::parse_loose(name),
        None => Ok(Size::Original),
    }
}
