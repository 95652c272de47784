use std::env;

use quick_error::quick_error;
use serde_json::Value;

use crate::storage::{FlickrOptions, FLICKR};
use crate::types::Metadata;

quick_error! {
    #[derive(Debug, PartialEq)]
    pub enum ConfigError {
        Missing(name: &'static str) {
            display("{} not set", name)
        }
        Invalid(name: &'static str, message: String) {
            display("{} could not be parsed: {}", name, message)
        }
    }
}

/// Api key and oauth access token pair used to build the api client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub shared_secret: String,
    pub access_token_key: String,
    pub access_token_secret: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlickrConfig {
    pub credentials: Credentials,
    pub options: FlickrOptions,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub storage_type: String,
    pub storage_base_path: String,
    pub flickr: Option<FlickrConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| lookup(name).ok_or(ConfigError::Missing(name));
        let flag = |name: &'static str| -> Result<bool, ConfigError> {
            lookup(name)
                .unwrap_or("false".to_owned())
                .parse()
                .map_err(|e: std::str::ParseBoolError| ConfigError::Invalid(name, e.to_string()))
        };

        let storage_type = lookup("STORAGE_TYPE").unwrap_or(FLICKR.to_owned());
        let storage_base_path = lookup("STORAGE_BASE_PATH")
            .unwrap_or(env::temp_dir().to_string_lossy().to_string());

        let flickr = if storage_type == FLICKR {
            let credentials = Credentials {
                api_key: required("FLICKR_API_KEY")?,
                shared_secret: required("FLICKR_SHARED_SECRET")?,
                access_token_key: required("FLICKR_ACCESS_TOKEN_KEY")?,
                access_token_secret: required("FLICKR_ACCESS_TOKEN_SECRET")?,
            };
            let upload_options = match lookup("FLICKR_UPLOAD_OPTIONS") {
                Some(raw) => parse_upload_options(&raw)?,
                None => Metadata::new(),
            };
            let options = FlickrOptions {
                user: required("FLICKR_USER")?,
                album: lookup("FLICKR_ALBUM").filter(|album| !album.is_empty()),
                upload_options,
                store_info: flag("FLICKR_STORE_INFO")?,
                store_sizes: flag("FLICKR_STORE_SIZES")?,
            };

            Some(FlickrConfig { credentials, options })
        } else {
            None
        };

        Ok(Self {
            storage_type,
            storage_base_path,
            flickr,
        })
    }
}

fn parse_upload_options(raw: &str) -> Result<Metadata, ConfigError> {
    const NAME: &str = "FLICKR_UPLOAD_OPTIONS";

    match serde_json::from_str(raw) {
        Ok(Value::Object(options)) => Ok(options),
        Ok(other) => Err(ConfigError::Invalid(NAME, format!("expected an object, got {}", other))),
        Err(e) => Err(ConfigError::Invalid(NAME, e.to_string())),
    }
}
