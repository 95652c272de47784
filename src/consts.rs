// metadata fields
pub const UPLOAD_OPTIONS_KEY: &str = "flickr";
pub const INFO_KEY: &str = "flickr_info";
pub const SIZES_KEY: &str = "flickr_sizes";

// size table fields
pub const SIZE_NAME_FIELD: &str = "name";
pub const SIZE_URL_FIELD: &str = "url";
pub const SIZE_WIDTH_FIELD: &str = "width";
pub const SIZE_HEIGHT_FIELD: &str = "height";

// flickr.photos.getInfo error code for a missing photo
pub const PHOTO_NOT_FOUND_CODE: u32 = 1;

pub const PAGE_HOST: &str = "https://www.flickr.com";
pub const STATIC_HOST: &str = "staticflickr.com";
pub const DEFAULT_EXTENSION: &str = "jpg";
pub const IDENTIFIER_DELIMITER: char = '-';
