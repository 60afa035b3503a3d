//! Encoded raster snapshots of the drawing surface.

use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Data URL prefix for PNG snapshots.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// An immutable encoded image of the full surface at one instant.
///
/// The payload is a data URL. History code never looks inside it; clones
/// share the same buffer, so `ptr_eq` is enough to tell two entries apart.
#[derive(Clone)]
pub struct RasterSnapshot(Arc<str>);

impl RasterSnapshot {
    /// Wrap an already-encoded data URL.
    pub fn from_data_url(data_url: impl Into<Arc<str>>) -> Self {
        Self(data_url.into())
    }

    /// Encode raw PNG bytes into a snapshot.
    pub fn from_png_bytes(png: &[u8]) -> Self {
        Self::from_data_url(format!("{}{}", PNG_DATA_URL_PREFIX, STANDARD.encode(png)))
    }

    /// The snapshot as a data URL string.
    pub fn as_data_url(&self) -> &str {
        &self.0
    }

    /// Decode the PNG payload, if this is a base64 PNG data URL.
    pub fn png_bytes(&self) -> Option<Vec<u8>> {
        let payload = self.0.strip_prefix(PNG_DATA_URL_PREFIX)?;
        STANDARD.decode(payload).ok()
    }

    /// Whether both handles point at the same encoded buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// Encoded length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl PartialEq for RasterSnapshot {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.0 == other.0
    }
}

impl Eq for RasterSnapshot {}

impl fmt::Debug for RasterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full data URLs are far too long to be useful in logs.
        let head: String = self.0.chars().take(32).collect();
        write!(f, "RasterSnapshot({}.. {} bytes)", head, self.0.len())
    }
}

impl Serialize for RasterSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RasterSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let data_url = String::deserialize(deserializer)?;
        Ok(Self::from_data_url(data_url))
    }
}
