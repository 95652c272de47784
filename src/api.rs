//! Outbound contracts: the photo-hosting API client the adapter delegates to,
//! and the plain HTTP fetch used to pull asset bytes.
//!
//! Neither is implemented against the live service here. Callers bring their
//! own client and hand it to [`crate::storage::Flickr`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::storage::{Result, StorageError};
use crate::types::Metadata;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub username: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: Option<String>,
}

/// Photo attributes as returned by `flickr.photos.getInfo`.
///
/// Only the fields needed to address and template a photo are typed; the
/// rest of the response is kept in `extra` so it can be persisted verbatim.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub id: String,
    pub farm: u32,
    pub server: String,
    pub secret: String,
    #[serde(default)]
    pub original_secret: Option<String>,
    #[serde(default)]
    pub original_format: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One entry of `flickr.photos.getSizes`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeInfo {
    pub label: String,
    pub source: String,
    pub width: u32,
    pub height: u32,
}

#[async_trait::async_trait]
pub trait FlickrApi: Send + Sync {
    async fn find_person(&self, user_id: &str) -> Result<Person>;
    async fn find_album(&self, album_id: &str) -> Result<Album>;

    /// Uploads photo bytes and returns the id the service allocated.
    async fn upload(&self, data: &[u8], options: &Metadata) -> Result<String>;
    async fn get_info(&self, photo_id: &str) -> Result<PhotoInfo>;
    async fn get_sizes(&self, photo_id: &str) -> Result<Vec<SizeInfo>>;
    async fn set_meta(&self, photo_id: &str, fields: &Metadata) -> Result<()>;
    async fn delete(&self, photo_id: &str) -> Result<()>;

    async fn add_to_album(&self, album_id: &str, photo_id: &str) -> Result<()>;
    async fn album_photos(&self, album_id: &str) -> Result<Vec<String>>;
    async fn person_photos(&self, person_id: &str) -> Result<Vec<String>>;
}

#[async_trait::async_trait]
pub trait AssetFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Bytes>;
}

#[async_trait::async_trait]
impl AssetFetcher for reqwest::Client {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        log::debug!("fetching {}", url);

        let response = self.get(url.clone()).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(url.to_string()));
        }

        let data = response.error_for_status()?.bytes().await?;

        Ok(data)
    }
}
