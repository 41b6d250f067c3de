//! Asset Metadata Boundary
//!
//! Thumbnail and stream metadata come from the host environment (media
//! element probing, ffprobe, a worker thread); the engine only consumes the
//! extracted values through this boundary.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{CoreResult, TimeSec};

use super::models::{AssetKind, MediaAsset};

// =============================================================================
// Extracted Metadata
// =============================================================================

/// Metadata extracted from a raw media file
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaMetadata {
    /// Thumbnail URL, when one could be produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Stream duration in seconds
    pub duration_sec: TimeSec,
    /// Width in pixels (video/image)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Height in pixels (video/image)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl MediaMetadata {
    /// Applies the extracted values onto an asset
    pub fn apply_to(&self, mut asset: MediaAsset) -> MediaAsset {
        asset.duration_sec = self.duration_sec;
        asset.thumbnail_url = self.thumbnail_url.clone();
        asset.width = self.width;
        asset.height = self.height;
        asset
    }
}

// =============================================================================
// Extractor Boundary
// =============================================================================

/// Boundary trait for thumbnail/metadata extraction from raw media
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    /// Extracts metadata for a file already reachable at `url`
    async fn extract(&self, url: &str, kind: AssetKind) -> CoreResult<MediaMetadata>;
}
