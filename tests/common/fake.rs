use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use bytes::Bytes;
use flickr_store::api::{Album, AssetFetcher, FlickrApi, Person, PhotoInfo, SizeInfo};
use flickr_store::consts::PHOTO_NOT_FOUND_CODE;
use flickr_store::identifier::PhotoHandle;
use flickr_store::size::Size;
use flickr_store::storage::{Result, StorageError};
use flickr_store::types::Metadata;
use serde_json::Value;
use url::Url;

pub const FARM: u32 = 66;
pub const SERVER: &str = "65535";

#[derive(Debug)]
struct StoredPhoto {
    owner: String,
    info: PhotoInfo,
    data: Vec<u8>,
}

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    people: Vec<Person>,
    albums: HashMap<String, Vec<String>>,
    photos: BTreeMap<String, StoredPhoto>,
    assets: HashMap<String, Bytes>,
    calls: Vec<&'static str>,
    fetched: Vec<String>,
    fail_get_info: Option<u32>,
    fail_add_to_album: Option<u32>,
    fail_delete: Option<u32>,
}

/// In-memory photo host. The first registered person owns every upload.
#[derive(Debug, Default)]
pub struct FakeFlickr {
    state: Mutex<State>,
}

impl FakeFlickr {
    pub fn new(user: &str) -> Self {
        let fake = Self::default();
        fake.state.lock().unwrap().people.push(Person {
            id: user.to_owned(),
            username: Some("tester".to_owned()),
        });
        fake
    }

    pub fn with_album(self, album_id: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .albums
            .insert(album_id.to_owned(), Vec::new());
        self
    }

    /// Seeds a photo owned by `owner` without going through `upload`.
    pub fn seed_photo(&self, owner: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let photo_id = next_photo_id(&mut state);
        let info = photo_info(&photo_id, &Metadata::new());
        state.photos.insert(
            photo_id.clone(),
            StoredPhoto {
                owner: owner.to_owned(),
                info,
                data: Vec::new(),
            },
        );
        photo_id
    }

    pub fn fail_get_info_with(&self, code: u32) {
        self.state.lock().unwrap().fail_get_info = Some(code);
    }

    pub fn fail_add_to_album_with(&self, code: u32) {
        self.state.lock().unwrap().fail_add_to_album = Some(code);
    }

    pub fn fail_delete_with(&self, code: u32) {
        self.state.lock().unwrap().fail_delete = Some(code);
    }

    pub fn photo_ids(&self) -> Vec<String> {
        self.state.lock().unwrap().photos.keys().cloned().collect()
    }

    pub fn photo(&self, photo_id: &str) -> Option<PhotoInfo> {
        self.state
            .lock()
            .unwrap()
            .photos
            .get(photo_id)
            .map(|photo| photo.info.clone())
    }

    pub fn photo_data(&self, photo_id: &str) -> Option<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .photos
            .get(photo_id)
            .map(|photo| photo.data.clone())
    }

    pub fn album(&self, album_id: &str) -> Vec<String> {
        self.state
            .lock()
            .unwrap()
            .albums
            .get(album_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn fetched(&self) -> Vec<String> {
        self.state.lock().unwrap().fetched.clone()
    }

    fn record(&self, call: &'static str) -> std::sync::MutexGuard<'_, State> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        state
    }
}

fn next_photo_id(state: &mut State) -> String {
    state.next_id += 1;
    format!("5289981{:04}", state.next_id)
}

fn photo_info(photo_id: &str, options: &Metadata) -> PhotoInfo {
    let text = |key: &str| options.get(key).and_then(Value::as_str).map(str::to_owned);
    let mut extra = Metadata::new();
    extra.insert("views".to_owned(), "0".into());

    PhotoInfo {
        id: photo_id.to_owned(),
        farm: FARM,
        server: SERVER.to_owned(),
        secret: format!("sec{}", photo_id),
        original_secret: Some(format!("orig{}", photo_id)),
        original_format: Some("jpg".to_owned()),
        title: text("title"),
        description: text("description"),
        extra,
    }
}

fn not_found(what: &str) -> StorageError {
    StorageError::Api(PHOTO_NOT_FOUND_CODE, format!("{} not found", what))
}

#[async_trait::async_trait]
impl FlickrApi for FakeFlickr {
    async fn find_person(&self, user_id: &str) -> Result<Person> {
        let state = self.record("find_person");
        state
            .people
            .iter()
            .find(|person| person.id == user_id)
            .cloned()
            .ok_or_else(|| not_found("user"))
    }

    async fn find_album(&self, album_id: &str) -> Result<Album> {
        let state = self.record("find_album");
        if state.albums.contains_key(album_id) {
            Ok(Album {
                id: album_id.to_owned(),
                title: None,
            })
        } else {
            Err(StorageError::Api(1, "Photoset not found".to_owned()))
        }
    }

    async fn upload(&self, data: &[u8], options: &Metadata) -> Result<String> {
        let mut state = self.record("upload");
        let photo_id = next_photo_id(&mut state);
        let info = photo_info(&photo_id, options);
        let owner = state.people[0].id.clone();

        let original = Size::Original
            .asset_url(&PhotoHandle::from_info(&info))
            .unwrap();
        state.assets.insert(original, Bytes::copy_from_slice(data));
        state.photos.insert(
            photo_id.clone(),
            StoredPhoto {
                owner,
                info,
                data: data.to_vec(),
            },
        );

        Ok(photo_id)
    }

    async fn get_info(&self, photo_id: &str) -> Result<PhotoInfo> {
        let state = self.record("get_info");
        if let Some(code) = state.fail_get_info {
            return Err(StorageError::Api(code, "service unavailable".to_owned()));
        }

        state
            .photos
            .get(photo_id)
            .map(|photo| photo.info.clone())
            .ok_or_else(|| not_found("photo"))
    }

    async fn get_sizes(&self, photo_id: &str) -> Result<Vec<SizeInfo>> {
        let state = self.record("get_sizes");
        let photo = state.photos.get(photo_id).ok_or_else(|| not_found("photo"))?;
        let handle = PhotoHandle::from_info(&photo.info);

        Ok([(Size::Square75, 75, 75), (Size::Thumbnail, 100, 67), (Size::Original, 1500, 1000)]
            .into_iter()
            .map(|(size, width, height)| SizeInfo {
                label: size.name().to_owned(),
                source: size.asset_url(&handle).unwrap(),
                width,
                height,
            })
            .collect())
    }

    async fn set_meta(&self, photo_id: &str, fields: &Metadata) -> Result<()> {
        let mut state = self.record("set_meta");
        let photo = state
            .photos
            .get_mut(photo_id)
            .ok_or_else(|| not_found("photo"))?;

        if let Some(title) = fields.get("title").and_then(Value::as_str) {
            photo.info.title = Some(title.to_owned());
        }
        if let Some(description) = fields.get("description").and_then(Value::as_str) {
            photo.info.description = Some(description.to_owned());
        }

        Ok(())
    }

    async fn delete(&self, photo_id: &str) -> Result<()> {
        let mut state = self.record("delete");
        if let Some(code) = state.fail_delete {
            return Err(StorageError::Api(code, "photo could not be deleted".to_owned()));
        }
        state
            .photos
            .remove(photo_id)
            .ok_or_else(|| not_found("photo"))?;
        for photos in state.albums.values_mut() {
            photos.retain(|id| id != photo_id);
        }

        Ok(())
    }

    async fn add_to_album(&self, album_id: &str, photo_id: &str) -> Result<()> {
        let mut state = self.record("add_to_album");
        if let Some(code) = state.fail_add_to_album {
            return Err(StorageError::Api(code, "photo could not be added".to_owned()));
        }
        state
            .albums
            .get_mut(album_id)
            .ok_or_else(|| StorageError::Api(1, "Photoset not found".to_owned()))?
            .push(photo_id.to_owned());

        Ok(())
    }

    async fn album_photos(&self, album_id: &str) -> Result<Vec<String>> {
        let state = self.record("album_photos");
        state
            .albums
            .get(album_id)
            .cloned()
            .ok_or_else(|| StorageError::Api(1, "Photoset not found".to_owned()))
    }

    async fn person_photos(&self, person_id: &str) -> Result<Vec<String>> {
        let state = self.record("person_photos");

        Ok(state
            .photos
            .iter()
            .filter(|(_, photo)| photo.owner == person_id)
            .map(|(id, _)| id.clone())
            .collect())
    }
}

#[async_trait::async_trait]
impl AssetFetcher for FakeFlickr {
    async fn fetch(&self, url: &Url) -> Result<Bytes> {
        let mut state = self.record("fetch");
        state.fetched.push(url.to_string());

        state
            .assets
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| StorageError::NotFound(url.to_string()))
    }
}
