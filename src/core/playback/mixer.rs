//! Audio Mixer
//!
//! Keeps exactly one playable audio resource per currently-audible clip:
//! created lazily the first tick a clip becomes audible, torn down the tick
//! it stops being audible. No pooling beyond current need.

use std::collections::HashMap;

use tracing::debug;

use crate::core::{
    assets::MediaLibrary,
    project::EditorState,
    timeline::TrackKind,
    ClipId, TimeSec, SYNC_DRIFT_TOLERANCE,
};

use super::scheduler::PlaybackScheduler;

// =============================================================================
// Backend Boundary
// =============================================================================

/// Boundary trait over one playable audio resource (an audio element at the
/// host layer)
pub trait AudioHandle {
    /// Current transport position within the source (seconds)
    fn position(&self) -> TimeSec;
    /// Starts an asynchronous seek
    fn seek(&mut self, position: TimeSec);
    /// True while a previously requested seek is still in flight
    fn is_seeking(&self) -> bool;
    /// Sets the output volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f64);
    /// Mirrors play/pause state
    fn set_playing(&mut self, playing: bool);
}

/// Factory boundary producing audio handles for a source URL
pub trait AudioBackend {
    type Handle: AudioHandle;

    fn create(&mut self, url: &str) -> Self::Handle;
}

// =============================================================================
// Mixer
// =============================================================================

/// One audio handle per audible clip, synced to the virtual clock
pub struct AudioMixer<B: AudioBackend> {
    backend: B,
    handles: HashMap<ClipId, B::Handle>,
}

impl<B: AudioBackend> AudioMixer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            handles: HashMap::new(),
        }
    }

    /// Number of live handles
    pub fn active_count(&self) -> usize {
        self.handles.len()
    }

    /// True when the clip currently owns a handle
    pub fn is_active(&self, clip_id: &str) -> bool {
        self.handles.contains_key(clip_id)
    }

    /// Per-tick synchronization against the current snapshot.
    ///
    /// The audible set is every audio or video clip on a visible track
    /// whose span contains the playhead. Position is corrected toward
    /// `(current_time - start) + trim_start` only beyond the drift
    /// tolerance and only when no seek is in flight.
    pub fn sync(
        &mut self,
        state: &EditorState,
        library: &MediaLibrary,
        transport: &PlaybackScheduler,
    ) {
        let time = transport.current_time();
        let playing = transport.is_playing();

        let audible: Vec<(&ClipId, TimeSec, TimeSec, f64, &str)> = state
            .tracks
            .iter()
            .filter(|t| {
                t.is_visible && matches!(t.kind, TrackKind::Audio | TrackKind::Video)
            })
            .flat_map(|t| t.clips.iter())
            .filter(|c| c.contains(time))
            .filter_map(|c| {
                let volume = c.body.volume()?;
                let asset_id = c.body.asset_id()?;
                Some((&c.id, c.start, c.body.trim_start(), volume, asset_id))
            })
            .collect();

        // Teardown first: a clip leaving the audible set pauses and detaches
        // immediately.
        let audible_ids: Vec<&str> = audible.iter().map(|(id, ..)| id.as_str()).collect();
        self.handles.retain(|clip_id, handle| {
            let keep = audible_ids.contains(&clip_id.as_str());
            if !keep {
                debug!(clip_id = %clip_id, "clip left audible set, detaching audio");
                handle.set_playing(false);
            }
            keep
        });

        for (clip_id, start, trim_start, volume, asset_id) in audible {
            if !self.handles.contains_key(clip_id) {
                let Some(url) = library.get(asset_id).and_then(|a| a.url.as_deref()) else {
                    // Asset still downloading or gone; nothing to play yet.
                    continue;
                };
                debug!(clip_id = %clip_id, "clip became audible, creating audio handle");
                let handle = self.backend.create(url);
                self.handles.insert(clip_id.clone(), handle);
            }
            let Some(handle) = self.handles.get_mut(clip_id) else {
                continue;
            };

            let target = (time - start) + trim_start;
            if !handle.is_seeking() && (handle.position() - target).abs() > SYNC_DRIFT_TOLERANCE {
                handle.seek(target);
            }
            handle.set_volume(volume / 100.0);
            handle.set_playing(playing);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
