use quick_error::quick_error;

use crate::consts::PHOTO_NOT_FOUND_CODE;

quick_error! {
    #[derive(Debug)]
    pub enum StorageError {
        NotFound(message: String) {
            display("not found: {}", message)
        }
        UnknownSize(name: String) {
            display("unknown size {:?}", name)
        }
        UnavailableSize(name: String) {
            display("size {:?} is not available", name)
        }
        InvalidIdentifier(id: String) {
            display("invalid photo identifier {:?}", id)
        }
        ConfirmationRequired {
            display("clear requires explicit confirmation")
        }
        Api(code: u32, message: String) {
            display("flickr api error {}: {}", code, message)
        }
        IoError(message: String) { }
        HttpError(err: reqwest::Error) {
            from()
        }
        SerdeError(err: serde_json::Error) {
            from()
        }
        UrlError(err: url::ParseError) {
            from()
        }
        InvalidConfig(message: String) { }
        InvalidMetadata(message: String) { }
    }
}

impl StorageError {
    /// Remote "photo not found", or a local lookup that came up empty.
    pub fn is_not_found(&self) -> bool {
        match self {
            StorageError::NotFound(_) => true,
            StorageError::Api(code, _) => *code == PHOTO_NOT_FOUND_CODE,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, StorageError>;
