//! Asset Model Definitions
//!
//! Defines the MediaAsset struct and the in-memory MediaLibrary.
//! Clips reference assets weakly by id; the library is the authoritative
//! collection, so deleting an asset is a pure filter with no dangling
//! references.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{new_id, AssetId, TimeSec};

// =============================================================================
// Asset Kind and Status
// =============================================================================

/// Asset type enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetKind {
    Video,
    Audio,
    Image,
}

/// Download lifecycle of an asset's backing resource
///
/// Imported files and stock downloads start as `Downloading` placeholders;
/// the final resource URL is attached asynchronously when the transfer
/// completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetStatus {
    /// Resource URL not yet available
    Downloading,
    /// Resource URL resolved and playable
    #[default]
    Ready,
}

// =============================================================================
// Media Asset
// =============================================================================

/// An imported or downloaded media file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAsset {
    /// Unique identifier (ULID)
    pub id: AssetId,
    /// Type of asset
    pub kind: AssetKind,
    /// Display name
    pub name: String,
    /// Playable resource URL, absent while downloading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Intrinsic duration in seconds (images carry a default still duration)
    pub duration_sec: TimeSec,
    /// Width in pixels (video/image)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels (video/image)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Download lifecycle status
    pub status: AssetStatus,
    /// Import timestamp (ISO 8601)
    pub imported_at: String,
}

/// Default timeline duration given to still-image assets
pub const DEFAULT_IMAGE_DURATION: TimeSec = 5.0;

impl MediaAsset {
    /// Creates a ready asset with a resolved URL
    pub fn new(kind: AssetKind, name: &str, url: &str, duration_sec: TimeSec) -> Self {
        let duration_sec = if duration_sec > 0.0 {
            duration_sec
        } else {
            warn!(
                "Asset '{}' created with non-positive duration {}, defaulting to {}",
                name, duration_sec, DEFAULT_IMAGE_DURATION
            );
            DEFAULT_IMAGE_DURATION
        };
        Self {
            id: new_id(),
            kind,
            name: name.to_string(),
            url: Some(url.to_string()),
            thumbnail_url: None,
            duration_sec,
            width: None,
            height: None,
            status: AssetStatus::Ready,
            imported_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Creates a downloading placeholder; the URL arrives via
    /// [`MediaLibrary::resolve_download`]
    pub fn placeholder(kind: AssetKind, name: &str, duration_sec: TimeSec) -> Self {
        Self {
            id: new_id(),
            kind,
            name: name.to_string(),
            url: None,
            thumbnail_url: None,
            duration_sec: duration_sec.max(0.0),
            width: None,
            height: None,
            status: AssetStatus::Downloading,
            imported_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Sets pixel dimensions
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the thumbnail URL
    pub fn with_thumbnail(mut self, thumbnail_url: &str) -> Self {
        self.thumbnail_url = Some(thumbnail_url.to_string());
        self
    }

    /// Returns true once the backing resource is playable
    pub fn is_ready(&self) -> bool {
        self.status == AssetStatus::Ready && self.url.is_some()
    }
}

// =============================================================================
// Media Library
// =============================================================================

/// In-memory collection of imported assets, ordered by insertion
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaLibrary {
    assets: Vec<MediaAsset>,
}

impl MediaLibrary {
    /// Creates an empty library
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an asset to the library
    pub fn insert(&mut self, asset: MediaAsset) {
        debug!(asset_id = %asset.id, name = %asset.name, "asset added to library");
        self.assets.push(asset);
    }

    /// Gets an asset by id
    pub fn get(&self, asset_id: &str) -> Option<&MediaAsset> {
        self.assets.iter().find(|a| a.id == asset_id)
    }

    /// Removes an asset by id, returning it if present.
    ///
    /// The caller cascades removal of clips referencing the asset.
    pub fn remove(&mut self, asset_id: &str) -> Option<MediaAsset> {
        let pos = self.assets.iter().position(|a| a.id == asset_id)?;
        Some(self.assets.remove(pos))
    }

    /// Marks a downloading asset as ready with its resolved URL.
    ///
    /// Completions for assets that were deleted mid-download are dropped;
    /// the download itself is not cancellable.
    pub fn resolve_download(&mut self, asset_id: &str, url: &str) -> bool {
        match self.assets.iter_mut().find(|a| a.id == asset_id) {
            Some(asset) => {
                asset.url = Some(url.to_string());
                asset.status = AssetStatus::Ready;
                true
            }
            None => {
                warn!(asset_id, "download completed for deleted asset, dropping result");
                false
            }
        }
    }

    /// Removes the placeholder for a failed download, returning it if present
    pub fn fail_download(&mut self, asset_id: &str) -> Option<MediaAsset> {
        if self.get(asset_id).is_some() {
            warn!(asset_id, "asset download failed, removing placeholder");
        }
        self.remove(asset_id)
    }

    /// Returns all assets in insertion order
    pub fn all(&self) -> &[MediaAsset] {
        &self.assets
    }

    /// Returns the number of assets
    pub fn len(&self) -> usize {
        self.assets.len()
    }

    /// Returns true when the library holds no assets
    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_creation() {
        let asset = MediaAsset::new(AssetKind::Video, "clip.mp4", "blob:clip", 12.5);

        assert!(!asset.id.is_empty());
        assert_eq!(asset.kind, AssetKind::Video);
        assert_eq!(asset.duration_sec, 12.5);
        assert!(asset.is_ready());
    }

    #[test]
    fn test_asset_non_positive_duration_defaults() {
        let asset = MediaAsset::new(AssetKind::Image, "photo.png", "blob:photo", 0.0);
        assert_eq!(asset.duration_sec, DEFAULT_IMAGE_DURATION);
    }

    #[test]
    fn test_placeholder_not_ready() {
        let asset = MediaAsset::placeholder(AssetKind::Video, "stock.mp4", 8.0);

        assert_eq!(asset.status, AssetStatus::Downloading);
        assert!(asset.url.is_none());
        assert!(!asset.is_ready());
    }

    #[test]
    fn test_library_insert_get_remove() {
        let mut library = MediaLibrary::new();
        let asset = MediaAsset::new(AssetKind::Audio, "song.mp3", "blob:song", 30.0);
        let id = asset.id.clone();

        library.insert(asset);
        assert_eq!(library.len(), 1);
        assert!(library.get(&id).is_some());

        let removed = library.remove(&id);
        assert!(removed.is_some());
        assert!(library.is_empty());
    }

    #[test]
    fn test_resolve_download() {
        let mut library = MediaLibrary::new();
        let asset = MediaAsset::placeholder(AssetKind::Video, "stock.mp4", 8.0);
        let id = asset.id.clone();
        library.insert(asset);

        assert!(library.resolve_download(&id, "blob:stock"));

        let asset = library.get(&id).unwrap();
        assert!(asset.is_ready());
        assert_eq!(asset.url.as_deref(), Some("blob:stock"));
    }

    #[test]
    fn test_resolve_download_for_deleted_asset_is_dropped() {
        let mut library = MediaLibrary::new();
        let asset = MediaAsset::placeholder(AssetKind::Video, "stock.mp4", 8.0);
        let id = asset.id.clone();
        library.insert(asset);
        library.remove(&id);

        // Stale completion after deletion must not resurrect the asset.
        assert!(!library.resolve_download(&id, "blob:stock"));
        assert!(library.is_empty());
    }

    #[test]
    fn test_fail_download_removes_placeholder() {
        let mut library = MediaLibrary::new();
        let asset = MediaAsset::placeholder(AssetKind::Image, "stock.jpg", 5.0);
        let id = asset.id.clone();
        library.insert(asset);

        let removed = library.fail_download(&id);
        assert!(removed.is_some());
        assert!(library.get(&id).is_none());
    }
}
