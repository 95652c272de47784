use std::fmt;
use std::str::FromStr;

use crate::consts::{DEFAULT_EXTENSION, STATIC_HOST};
use crate::identifier::PhotoHandle;
use crate::storage::{Result, StorageError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Size {
    Square75,
    Square150,
    Thumbnail,
    Small240,
    Small320,
    Medium500,
    Medium640,
    Medium800,
    Large1024,
    Large1600,
    Large2048,
    Original,
}

impl Size {
    pub const ALL: [Size; 12] = [
        Size::Square75,
        Size::Square150,
        Size::Thumbnail,
        Size::Small240,
        Size::Small320,
        Size::Medium500,
        Size::Medium640,
        Size::Medium800,
        Size::Large1024,
        Size::Large1600,
        Size::Large2048,
        Size::Original,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Size::Square75 => "Square 75",
            Size::Square150 => "Square 150",
            Size::Thumbnail => "Thumbnail",
            Size::Small240 => "Small 240",
            Size::Small320 => "Small 320",
            Size::Medium500 => "Medium 500",
            Size::Medium640 => "Medium 640",
            Size::Medium800 => "Medium 800",
            Size::Large1024 => "Large 1024",
            Size::Large1600 => "Large 1600",
            Size::Large2048 => "Large 2048",
            Size::Original => "Original",
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            Size::Square75 => "_s",
            Size::Square150 => "_q",
            Size::Thumbnail => "_t",
            Size::Small240 => "_m",
            Size::Small320 => "_n",
            Size::Medium500 => "",
            Size::Medium640 => "_z",
            Size::Medium800 => "_c",
            Size::Large1024 => "_b",
            Size::Large1600 => "_h",
            Size::Large2048 => "_k",
            Size::Original => "_o",
        }
    }

    pub fn extension<'a>(&self, handle: &'a PhotoHandle) -> &'a str {
        match self {
            Size::Original => &handle.original_format,
            _ => DEFAULT_EXTENSION,
        }
    }

    /// Large 1600 and 2048 use per-photo secrets the identifier does not carry.
    pub fn is_available(&self) -> bool {
        !matches!(self, Size::Large1600 | Size::Large2048)
    }

    /// Parses a size name after normalizing symbol-like spellings, so
    /// `square_75` and `thumbnail` resolve the same as `Square 75` and
    /// `Thumbnail`. Unavailable sizes are rejected here as well.
    pub fn parse_loose(name: &str) -> Result<Size> {
        let size: Size = normalize(name).parse()?;

        if !size.is_available() {
            return Err(StorageError::UnavailableSize(size.name().to_owned()));
        }

        Ok(size)
    }

    /// Static asset url for this size, built without asking the service.
    pub fn asset_url(&self, handle: &PhotoHandle) -> Result<String> {
        if !self.is_available() {
            return Err(StorageError::UnavailableSize(self.name().to_owned()));
        }
        // photos without a recorded original secret or format have no original asset
        if *self == Size::Original
            && (handle.original_secret.is_empty() || handle.original_format.is_empty())
        {
            return Err(StorageError::UnavailableSize(self.name().to_owned()));
        }

        let secret = match self {
            Size::Original => &handle.original_secret,
            _ => &handle.secret,
        };

        Ok(format!(
            "https://farm{}.{}/{}/{}_{}{}.{}",
            handle.farm,
            STATIC_HOST,
            handle.server,
            handle.photo_id,
            secret,
            self.suffix(),
            self.extension(handle),
        ))
    }
}

impl FromStr for Size {
    type Err = StorageError;

    fn from_str(name: &str) -> Result<Size> {
        Size::ALL
            .iter()
            .find(|size| size.name() == name)
            .copied()
            .ok_or_else(|| StorageError::UnknownSize(name.to_owned()))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn normalize(name: &str) -> String {
    let symbol_like = !name.contains(' ')
        && name.chars().next().map_or(false, |c| c.is_ascii_lowercase());

    if !symbol_like {
        return name.to_owned();
    }

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.map(|c| if c == '_' { ' ' } else { c.to_ascii_lowercase() }))
            .collect(),
        None => String::new(),
    }
}
