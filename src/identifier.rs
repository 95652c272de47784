//! Composite photo identifier.
//!
//! The service needs farm, server, id and both secrets to build any asset
//! url, so all of them are packed into the one id string the host library
//! stores: `farm-server-photoId-secret-originalSecret-originalFormat`.

use std::fmt;
use std::str::FromStr;

use crate::api::PhotoInfo;
use crate::consts::IDENTIFIER_DELIMITER;
use crate::storage::{Result, StorageError};

const FIELD_COUNT: usize = 6;
const PHOTO_ID_INDEX: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhotoHandle {
    pub farm: String,
    pub server: String,
    pub photo_id: String,
    pub secret: String,
    pub original_secret: String,
    pub original_format: String,
}

impl PhotoHandle {
    pub fn new(
        farm: impl Into<String>,
        server: impl Into<String>,
        photo_id: impl Into<String>,
        secret: impl Into<String>,
        original_secret: impl Into<String>,
        original_format: impl Into<String>,
    ) -> Self {
        Self {
            farm: farm.into(),
            server: server.into(),
            photo_id: photo_id.into(),
            secret: secret.into(),
            original_secret: original_secret.into(),
            original_format: original_format.into(),
        }
    }

    // accounts that hide originals have no original secret or format,
    // those fields are kept empty so the field count never changes
    pub fn from_info(info: &PhotoInfo) -> Self {
        Self::new(
            info.farm.to_string(),
            info.server.clone(),
            info.id.clone(),
            info.secret.clone(),
            info.original_secret.clone().unwrap_or_default(),
            info.original_format.clone().unwrap_or_default(),
        )
    }

    pub fn encode(&self) -> String {
        self.to_string()
    }

    pub fn decode(id: &str) -> Result<Self> {
        id.parse()
    }
}

impl fmt::Display for PhotoHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = IDENTIFIER_DELIMITER;
        write!(
            f,
            "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
            self.farm,
            self.server,
            self.photo_id,
            self.secret,
            self.original_secret,
            self.original_format,
        )
    }
}

impl FromStr for PhotoHandle {
    type Err = StorageError;

    fn from_str(id: &str) -> Result<Self> {
        let fields = split(id)?;

        Ok(Self::new(
            fields[0], fields[1], fields[2], fields[3], fields[4], fields[5],
        ))
    }
}

/// Photo id of an encoded identifier, without building the whole handle.
pub fn photo_id(id: &str) -> Result<&str> {
    split(id).map(|fields| fields[PHOTO_ID_INDEX])
}

fn split(id: &str) -> Result<Vec<&str>> {
    let fields: Vec<&str> = id.split(IDENTIFIER_DELIMITER).collect();

    if fields.len() != FIELD_COUNT || fields[PHOTO_ID_INDEX].is_empty() {
        return Err(StorageError::InvalidIdentifier(id.to_owned()));
    }

    Ok(fields)
}
