use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use url::Url;

use crate::api::{Album, AssetFetcher, FlickrApi, Person};
use crate::consts::{
    INFO_KEY, PAGE_HOST, SIZES_KEY, SIZE_HEIGHT_FIELD, SIZE_NAME_FIELD, SIZE_URL_FIELD,
    SIZE_WIDTH_FIELD, UPLOAD_OPTIONS_KEY,
};
use crate::identifier::{self, PhotoHandle};
use crate::size::Size;
use crate::storage::{PhotoHost, Result, Storage, StorageError, Uploaded};
use crate::types::{Confirm, Metadata};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlickrOptions {
    pub user: String,
    pub album: Option<String>,
    pub upload_options: Metadata,
    pub store_info: bool,
    pub store_sizes: bool,
}

/// Storage backed by a Flickr account, optionally scoped to one album.
pub struct Flickr {
    api: Arc<dyn FlickrApi>,
    fetcher: Arc<dyn AssetFetcher>,
    person: Person,
    album: Option<Album>,
    upload_options: Metadata,
    store_info: bool,
    store_sizes: bool,
}

impl Flickr {
    pub async fn new(
        api: Arc<dyn FlickrApi>,
        fetcher: Arc<dyn AssetFetcher>,
        options: FlickrOptions,
    ) -> Result<Self> {
        let person = api.find_person(&options.user).await?;
        let album = match &options.album {
            Some(album_id) => Some(api.find_album(album_id).await?),
            None => None,
        };

        log::info!(
            "flickr storage for person {} in album {:?}",
            &person.id,
            album.as_ref().map(|album| &album.id),
        );

        Ok(Flickr {
            api,
            fetcher,
            person,
            album,
            upload_options: options.upload_options,
            store_info: options.store_info,
            store_sizes: options.store_sizes,
        })
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn album(&self) -> Option<&Album> {
        self.album.as_ref()
    }

    pub fn upload_options(&self) -> &Metadata {
        &self.upload_options
    }

    /// Sets fields such as title or description on the remote photo.
    pub async fn update(&self, id: &str, fields: &Metadata) -> Result<()> {
        let photo_id = identifier::photo_id(id)?;

        self.api.set_meta(photo_id, fields).await
    }

    // per-call options from the "flickr" metadata key win over the defaults
    fn merge_upload_options(&self, metadata: &mut Metadata) -> Result<Metadata> {
        let mut options = self.upload_options.clone();

        match metadata.remove(UPLOAD_OPTIONS_KEY) {
            Some(Value::Object(per_call)) => options.extend(per_call),
            Some(Value::Null) | None => (),
            Some(other) => {
                return Err(StorageError::InvalidMetadata(format!(
                    "{} upload options must be an object, got {}",
                    UPLOAD_OPTIONS_KEY, other
                )))
            }
        }

        Ok(options)
    }

    async fn size_table(&self, photo_id: &str) -> Result<Value> {
        let sizes = self
            .api
            .get_sizes(photo_id)
            .await?
            .into_iter()
            .map(|size| {
                let mut entry = Metadata::new();
                entry.insert(SIZE_NAME_FIELD.to_owned(), size.label.into());
                entry.insert(SIZE_URL_FIELD.to_owned(), size.source.into());
                entry.insert(SIZE_WIDTH_FIELD.to_owned(), size.width.into());
                entry.insert(SIZE_HEIGHT_FIELD.to_owned(), size.height.into());
                Value::Object(entry)
            })
            .collect();

        Ok(Value::Array(sizes))
    }
}

#[async_trait::async_trait]
impl Storage for Flickr {
    async fn upload(&self, data: &[u8], mut metadata: Metadata) -> Result<Uploaded> {
        let options = self.merge_upload_options(&mut metadata)?;

        let photo_id = self.api.upload(data, &options).await?;
        log::debug!("uploaded photo {} ({} bytes)", &photo_id, data.len());

        // a failure here leaves the photo uploaded but outside the album
        if let Some(album) = &self.album {
            self.api.add_to_album(&album.id, &photo_id).await?;
        }

        let info = self.api.get_info(&photo_id).await?;
        let handle = PhotoHandle {
            photo_id: photo_id.clone(),
            ..PhotoHandle::from_info(&info)
        };

        if self.store_info {
            metadata.insert(INFO_KEY.to_owned(), serde_json::to_value(&info)?);
        }
        if self.store_sizes {
            metadata.insert(SIZES_KEY.to_owned(), self.size_table(&photo_id).await?);
        }

        Ok(Uploaded {
            id: handle.encode(),
            metadata,
        })
    }

    async fn download(&self, id: &str) -> Result<Bytes> {
        let url = Url::parse(&self.asset_url(id, Size::Original)?)?;

        self.fetcher.fetch(&url).await
    }

    async fn exists(&self, id: &str) -> Result<bool> {
        let photo_id = identifier::photo_id(id)?;

        match self.api.get_info(photo_id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let photo_id = identifier::photo_id(id)?;
        log::debug!("deleting photo {}", photo_id);

        self.api.delete(photo_id).await
    }

    fn url(&self, id: &str, size: Option<&str>) -> Result<String> {
        match size {
            Some(name) => self.asset_url(id, Size::parse_loose(name)?),
            None => self.page_url(id),
        }
    }

    async fn clear(&self, confirm: Option<Confirm>) -> Result<()> {
        if confirm.is_none() {
            return Err(StorageError::ConfirmationRequired);
        }

        let photo_ids = match &self.album {
            Some(album) => self.api.album_photos(&album.id).await?,
            None => self.api.person_photos(&self.person.id).await?,
        };

        log::warn!("clearing {} photos", photo_ids.len());
        for photo_id in &photo_ids {
            self.api.delete(photo_id).await?;
        }

        Ok(())
    }

    fn as_photo_host(&self) -> Option<&dyn PhotoHost> {
        Some(self)
    }
}

#[async_trait::async_trait]
impl PhotoHost for Flickr {
    fn person_id(&self) -> &str {
        &self.person.id
    }

    fn page_url(&self, id: &str) -> Result<String> {
        let photo_id = identifier::photo_id(id)?;

        Ok(format!("{}/photos/{}/{}", PAGE_HOST, &self.person.id, photo_id))
    }

    fn asset_url(&self, id: &str, size: Size) -> Result<String> {
        size.asset_url(&PhotoHandle::decode(id)?)
    }

    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        self.fetcher.fetch(url).await
    }
}
