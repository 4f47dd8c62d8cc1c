//! Decoded image resources and their portable encodings.
//!
//! Scene objects never own pixels. They hold an [`ImageKey`] into the
//! [`ImageStore`], which only ever grows during a session, so history
//! snapshots can be plain clones and still point at valid bitmaps.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::collections::HashMap;
use std::fmt;
use std::io::Cursor;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use image::{ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Stable reference to a bitmap held by an [`ImageStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageKey(Uuid);

impl ImageKey {
    fn fresh() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ImageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Errors from decoding, encoding, or resolving images.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("failed to encode png: {0}")]
    Encode(image::ImageError),
    #[error("not a base64 data url")]
    NotDataUrl,
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("unknown image {0}")]
    Missing(ImageKey),
}

/// Append-only map of decoded bitmaps.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<ImageKey, RgbaImage>,
}

impl ImageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a bitmap and hand back its key.
    pub fn insert(&mut self, image: RgbaImage) -> ImageKey {
        let key = ImageKey::fresh();
        self.images.insert(key, image);
        key
    }

    #[must_use]
    pub fn get(&self, key: ImageKey) -> Option<&RgbaImage> {
        self.images.get(&key)
    }

    /// Look up a bitmap, failing with [`AssetError::Missing`].
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Missing`] when the key was never inserted here.
    pub fn require(&self, key: ImageKey) -> Result<&RgbaImage, AssetError> {
        self.images.get(&key).ok_or(AssetError::Missing(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// Decode a user-supplied file (PNG, JPEG, GIF, WebP) into RGBA pixels.
///
/// # Errors
///
/// Returns [`AssetError::Decode`] for unknown formats or corrupt data.
pub fn decode(bytes: &[u8]) -> Result<RgbaImage, AssetError> {
    Ok(image::load_from_memory(bytes)?.to_rgba8())
}

/// Encode a bitmap as a self-contained `data:image/png;base64,...` URL.
///
/// # Errors
///
/// Returns [`AssetError::Encode`] if the PNG encoder rejects the buffer.
pub fn to_png_data_url(image: &RgbaImage) -> Result<String, AssetError> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).map_err(AssetError::Encode)?;
    Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(buf.into_inner())))
}

/// Decode any base64 image data URL back into pixels.
///
/// # Errors
///
/// Returns [`AssetError::NotDataUrl`] when the header is missing or not
/// base64, and the decode errors for a bad payload.
pub fn from_data_url(url: &str) -> Result<RgbaImage, AssetError> {
    let rest = url.strip_prefix("data:").ok_or(AssetError::NotDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(AssetError::NotDataUrl)?;
    if !header.ends_with(";base64") {
        return Err(AssetError::NotDataUrl);
    }
    let bytes = STANDARD.decode(payload.trim())?;
    decode(&bytes)
}
