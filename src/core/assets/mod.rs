//! Asset Management Module
//!
//! Media asset models, the in-memory library, and the metadata-extraction
//! boundary.

pub mod metadata;
pub mod models;

pub use metadata::{MediaMetadata, MetadataExtractor};
pub use models::{AssetKind, AssetStatus, MediaAsset, MediaLibrary, DEFAULT_IMAGE_DURATION};
