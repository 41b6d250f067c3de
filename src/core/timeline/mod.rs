//! Timeline Module
//!
//! The track/clip/group data model, pure placement math, and the editing
//! operations over editor state.

pub mod engine;
pub mod models;
pub mod placement;

pub use models::{
    Clip, ClipBody, ClipPatch, Group, TextAnimation, TextAnimationKind, TextAnimationPatch,
    TextStyle, TextStylePatch, Track, TrackKind, Transform, TransformPatch,
};
