//! Playback Module
//!
//! The virtual-clock scheduler, the dual-buffer preview controller, and the
//! audio mixer. All three recompute from the current editor-state snapshot
//! on every tick; none of them mutate it.

pub mod mixer;
pub mod preview;
pub mod scheduler;

pub use mixer::{AudioBackend, AudioHandle, AudioMixer};
pub use preview::{DualBufferPreview, FrameDirectives, SurfaceId, VideoSurface};
pub use scheduler::{timeline_duration, PlaybackScheduler};
