use std::path::PathBuf;
use std::sync::Arc;

use crate::api::FlickrApi;
use crate::config::Config;

mod error;
mod file_system;
mod flickr;
mod storage;

// forwarding declarations
pub use error::{Result, StorageError};
pub use file_system::FileSystem;
pub use flickr::{Flickr, FlickrOptions};
pub use storage::{PhotoHost, Reader, Storage, Uploaded};

pub const FILE_SYSTEM: &str = "file_system";
pub const FLICKR: &str = "flickr";

/// Builds the backend named by `config.storage_type`.
///
/// `api` is only consulted for the flickr backend; asset downloads for it go
/// through a plain `reqwest::Client`.
pub async fn build_storage(
    config: &Config,
    api: Option<Arc<dyn FlickrApi>>,
) -> Result<Arc<dyn Storage>> {
    match config.storage_type.as_str() {
        FILE_SYSTEM => Ok(Arc::new(FileSystem::new(PathBuf::from(
            config.storage_base_path.as_str(),
        )))),
        FLICKR => {
            let flickr_config = config.flickr.as_ref().ok_or_else(|| {
                StorageError::InvalidConfig("flickr storage selected without flickr config".to_owned())
            })?;
            let api = api.ok_or_else(|| {
                StorageError::InvalidConfig("flickr storage selected without an api client".to_owned())
            })?;
            let fetcher = Arc::new(reqwest::Client::new());

            let storage = Flickr::new(api, fetcher, flickr_config.options.clone()).await?;

            Ok(Arc::new(storage))
        }
        other => Err(StorageError::InvalidConfig(format!(
            "unknown storage type {:?}",
            other
        ))),
    }
}
