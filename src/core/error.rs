//! Cutline Error Definitions
//!
//! Defines error types used throughout the engine. Timeline editing
//! operations themselves are total functions over state and never return
//! errors; `CoreError` covers the boundary layers (providers, tool
//! dispatch, asset import).

use thiserror::Error;

use super::{AssetId, ClipId, TimeSec, TrackId};

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Asset Errors
    // =========================================================================
    #[error("Asset not found: {0}")]
    AssetNotFound(AssetId),

    #[error("Asset download failed: {0}")]
    AssetDownloadFailed(String),

    #[error("Metadata extraction failed: {0}")]
    MetadataExtractionFailed(String),

    // =========================================================================
    // Timeline Errors
    // =========================================================================
    #[error("Clip not found: {0}")]
    ClipNotFound(ClipId),

    #[error("Track not found: {0}")]
    TrackNotFound(TrackId),

    #[error("Invalid split point: {0} seconds")]
    InvalidSplitPoint(TimeSec),

    // =========================================================================
    // Tool Dispatch Errors
    // =========================================================================
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid tool arguments: {0}")]
    InvalidToolArguments(String),

    // =========================================================================
    // AI Errors
    // =========================================================================
    #[error("AI request failed: {0}")]
    AIRequestFailed(String),

    #[error("AI request rate-limited: {0}")]
    RateLimited(String),

    // =========================================================================
    // Stock Media Errors
    // =========================================================================
    #[error("Stock media search failed: {0}")]
    StockSearchFailed(String),

    #[error("Stock result not found: {0}")]
    StockResultNotFound(String),

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Returns true for rate-limit-class failures, which callers surface
    /// with distinct user-visible wording.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, CoreError::RateLimited(_))
    }
}
