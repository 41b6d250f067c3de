//! Cutline Core Engine
//!
//! Core editing engine module.
//! Handles the timeline data model, editing operations, snapshot history,
//! playback scheduling, and the AI tool dispatch surface.

pub mod ai;
pub mod assets;
pub mod effects;
pub mod playback;
pub mod project;
pub mod stock;
pub mod timeline;

// Re-export common types
mod types;
pub use types::*;
pub use assets::AssetKind;

mod error;
pub use error::*;
