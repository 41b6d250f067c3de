//! Cutline Core Type Definitions
//!
//! Defines fundamental types used throughout the engine.

use serde::{Deserialize, Serialize};

// =============================================================================
// ID Types
// =============================================================================

/// Asset unique identifier (ULID)
pub type AssetId = String;

/// Clip unique identifier (ULID)
pub type ClipId = String;

/// Track unique identifier (ULID)
pub type TrackId = String;

/// Group unique identifier (ULID)
pub type GroupId = String;

/// Generates a new ULID string id
pub fn new_id() -> String {
    ulid::Ulid::new().to_string()
}

// =============================================================================
// Time Types
// =============================================================================

/// Time in seconds (floating point)
pub type TimeSec = f64;

/// Minimum clip duration enforced during interactive resize (seconds)
pub const MIN_CLIP_DURATION: TimeSec = 0.1;

/// Drift beyond which a media surface's transport position is corrected (seconds)
pub const SYNC_DRIFT_TOLERANCE: TimeSec = 0.15;

// =============================================================================
// Spatial Types
// =============================================================================

/// 2D coordinates (normalized or pixel)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    /// Returns origin coordinates
    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Default for Point2D {
    fn default() -> Self {
        Self::zero()
    }
}
