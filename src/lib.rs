//! Flickr backed attachment storage.
//!
//! [`storage::Flickr`] implements the host library's [`storage::Storage`]
//! contract on top of an injected [`api::FlickrApi`] client. Photos are
//! addressed by a composite [`identifier::PhotoHandle`], which is enough to
//! template every asset url ([`size::Size`]) without another round trip.

pub mod api;
pub mod attachment;
pub mod config;
pub mod consts;
pub mod identifier;
pub mod size;
pub mod storage;
pub mod types;
