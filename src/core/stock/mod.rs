//! Stock Media Boundary
//!
//! External stock-media providers are consumed through a search trait;
//! results are ephemeral and only cached as the session's "last search
//! results" so subsequent add-by-id tool calls can reference them.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::{
    assets::{AssetKind, MediaAsset, DEFAULT_IMAGE_DURATION},
    CoreResult, TimeSec,
};

// =============================================================================
// Stock Asset
// =============================================================================

/// One stock search result
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockAsset {
    /// Provider-scoped identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Preview thumbnail URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Download URL for the full media
    pub url: String,
    /// Intrinsic duration in seconds, absent for stills
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_sec: Option<TimeSec>,
    pub kind: AssetKind,
}

impl StockAsset {
    /// Builds the downloading library placeholder for this result.
    ///
    /// The resolved resource URL arrives asynchronously once the host
    /// finishes transferring the media.
    pub fn to_placeholder(&self) -> MediaAsset {
        let duration = self.duration_sec.unwrap_or(DEFAULT_IMAGE_DURATION);
        let mut asset = MediaAsset::placeholder(self.kind, &self.name, duration);
        if let Some(thumbnail) = &self.thumbnail_url {
            asset = asset.with_thumbnail(thumbnail);
        }
        asset
    }
}

// =============================================================================
// Provider Boundary
// =============================================================================

/// Boundary trait for stock-media search providers
#[async_trait]
pub trait StockMediaProvider: Send + Sync {
    /// Returns the provider name
    fn name(&self) -> &str;

    /// Searches the provider's catalog for media of the given kind
    async fn search(&self, query: &str, kind: AssetKind) -> CoreResult<Vec<StockAsset>>;
}

// =============================================================================
// Tests
// =============================================================================
