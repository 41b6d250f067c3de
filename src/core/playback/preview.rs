//! Dual-Buffer Preview Controller
//!
//! A single rendering surface cannot switch source material without a
//! visible stall, so two surfaces are kept alive: one active (visible,
//! playing) and one standby (preloaded to the upcoming clip). When playback
//! advances into the preloaded clip the roles swap instead of reloading.

use tracing::debug;

use crate::core::{
    assets::MediaLibrary,
    effects::composite_filter,
    project::EditorState,
    timeline::{Clip, ClipBody, Track, TrackKind, Transform},
    ClipId, TimeSec, SYNC_DRIFT_TOLERANCE,
};

use super::scheduler::PlaybackScheduler;

/// Full Ken-Burns zoom gain over a clip's duration (100% -> 110%)
const KEN_BURNS_ZOOM: f64 = 0.1;

/// Fade-in length at the start of Ken-Burns image clips (seconds)
const KEN_BURNS_FADE_IN: TimeSec = 1.0;

// =============================================================================
// Surface Boundary
// =============================================================================

/// Boundary trait over an underlying media-rendering surface (a video
/// element at the host layer)
pub trait VideoSurface {
    /// Loads a new source URL, resetting the transport
    fn set_source(&mut self, url: &str);
    /// Current transport position within the source (seconds)
    fn position(&self) -> TimeSec;
    /// Starts an asynchronous seek
    fn seek(&mut self, position: TimeSec);
    /// True while a previously requested seek is still in flight
    fn is_seeking(&self) -> bool;
    /// Mirrors play/pause state
    fn set_playing(&mut self, playing: bool);
}

/// The two surface slots
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfaceId {
    A,
    B,
}

impl SurfaceId {
    fn other(self) -> Self {
        match self {
            SurfaceId::A => SurfaceId::B,
            SurfaceId::B => SurfaceId::A,
        }
    }
}

struct Slot<S> {
    surface: S,
    clip_id: Option<ClipId>,
    url: Option<String>,
}

impl<S: VideoSurface> Slot<S> {
    fn new(surface: S) -> Self {
        Self {
            surface,
            clip_id: None,
            url: None,
        }
    }

    /// Loads `url` only when it differs from what the slot already holds
    fn ensure_source(&mut self, url: &str) {
        if self.url.as_deref() != Some(url) {
            self.surface.set_source(url);
            self.url = Some(url.to_string());
        }
    }

    /// Corrects the transport toward `target` only beyond the drift
    /// tolerance and only when no seek is already in flight
    fn sync_position(&mut self, target: TimeSec) {
        if self.surface.is_seeking() {
            return;
        }
        if (self.surface.position() - target).abs() > SYNC_DRIFT_TOLERANCE {
            self.surface.seek(target);
        }
    }
}

// =============================================================================
// Frame Directives
// =============================================================================

/// Per-tick compositing output for the host renderer
#[derive(Clone, Debug, PartialEq)]
pub struct FrameDirectives {
    /// The clip shown on the active surface, if any
    pub active_clip_id: Option<ClipId>,
    /// Declared transform of the active clip
    pub transform: Option<Transform>,
    /// Ken-Burns zoom multiplier applied on top of the transform scale
    pub scale_multiplier: f64,
    /// Fade-in alpha (1.0 outside the Ken-Burns fade window)
    pub fade_alpha: f64,
    /// Composite filter string from all active adjustment layers
    pub filter: String,
}

impl FrameDirectives {
    fn empty(filter: String) -> Self {
        Self {
            active_clip_id: None,
            transform: None,
            scale_multiplier: 1.0,
            fade_alpha: 1.0,
            filter,
        }
    }
}

// =============================================================================
// Active-Clip Lookup
// =============================================================================

/// The highest-priority visible video/image clip at `time`, scanning tracks
/// top to bottom
pub fn current_visual_clip(state: &EditorState, time: TimeSec) -> Option<(&Track, &Clip)> {
    state
        .tracks
        .iter()
        .filter(|t| t.kind == TrackKind::Video && t.is_visible)
        .find_map(|t| {
            t.clips_by_start()
                .into_iter()
                .find(|c| c.contains(time))
                .map(|c| (t, c))
        })
}

/// The earliest upcoming clip on any visible video track starting at or
/// after `after`
pub fn next_visual_clip(state: &EditorState, after: TimeSec) -> Option<&Clip> {
    state
        .tracks
        .iter()
        .filter(|t| t.kind == TrackKind::Video && t.is_visible)
        .flat_map(|t| t.clips.iter())
        .filter(|c| c.start >= after)
        .min_by(|a, b| a.start.total_cmp(&b.start).then_with(|| a.id.cmp(&b.id)))
}

/// Effect stacks of all adjustment clips active at `time`, topmost track
/// first
fn active_adjustment_stacks(state: &EditorState, time: TimeSec) -> Vec<&[crate::core::effects::Effect]> {
    state
        .tracks
        .iter()
        .filter(|t| t.kind == TrackKind::Adjustment && t.is_visible)
        .flat_map(|t| t.clips.iter())
        .filter(|c| c.contains(time))
        .filter_map(|c| match &c.body {
            ClipBody::Adjustment { effects } => Some(effects.as_slice()),
            _ => None,
        })
        .collect()
}

// =============================================================================
// Controller
// =============================================================================

/// Two-slot preview state machine
pub struct DualBufferPreview<S> {
    slot_a: Slot<S>,
    slot_b: Slot<S>,
    active: SurfaceId,
}

impl<S: VideoSurface> DualBufferPreview<S> {
    pub fn new(surface_a: S, surface_b: S) -> Self {
        Self {
            slot_a: Slot::new(surface_a),
            slot_b: Slot::new(surface_b),
            active: SurfaceId::A,
        }
    }

    /// The surface currently holding the visible role
    pub fn active_surface(&self) -> SurfaceId {
        self.active
    }

    /// The clip a slot is assigned to
    pub fn assignment(&self, id: SurfaceId) -> Option<&ClipId> {
        self.slot(id).clip_id.as_ref()
    }

    fn slot(&self, id: SurfaceId) -> &Slot<S> {
        match id {
            SurfaceId::A => &self.slot_a,
            SurfaceId::B => &self.slot_b,
        }
    }

    fn slot_mut(&mut self, id: SurfaceId) -> &mut Slot<S> {
        match id {
            SurfaceId::A => &mut self.slot_a,
            SurfaceId::B => &mut self.slot_b,
        }
    }

    /// Per-tick synchronization of both surfaces against the current state,
    /// returning the compositing directives for the frame.
    pub fn sync(
        &mut self,
        state: &EditorState,
        library: &MediaLibrary,
        transport: &PlaybackScheduler,
    ) -> FrameDirectives {
        let time = transport.current_time();
        let filter = composite_filter(&active_adjustment_stacks(state, time));

        let current = current_visual_clip(state, time);
        let lookahead_from = current.map(|(_, c)| c.end()).unwrap_or(time);
        let next = next_visual_clip(state, lookahead_from);

        let Some((_, current_clip)) = current else {
            // Nothing visible: both surfaces idle paused.
            self.slot_mut(SurfaceId::A).surface.set_playing(false);
            self.slot_mut(SurfaceId::B).surface.set_playing(false);
            self.preload(self.active.other(), next, library);
            return FrameDirectives::empty(filter);
        };

        // Swap roles when playback advanced into the preloaded clip: the
        // standby surface already holds the right media.
        let standby = self.active.other();
        if self.slot(standby).clip_id.as_deref() == Some(current_clip.id.as_str())
            && self.slot(self.active).clip_id.as_deref() != Some(current_clip.id.as_str())
        {
            debug!(clip_id = %current_clip.id, "cut reached preloaded clip, swapping surfaces");
            self.active = standby;
        }

        let active = self.active;
        let asset_url = current_clip
            .body
            .asset_id()
            .and_then(|id| library.get(id))
            .and_then(|a| a.url.clone());

        {
            let slot = self.slot_mut(active);
            slot.clip_id = Some(current_clip.id.clone());
            if let Some(url) = &asset_url {
                slot.ensure_source(url);
            }
            slot.sync_position((time - current_clip.start) + current_clip.body.trim_start());
            slot.surface.set_playing(transport.is_playing());
        }

        self.preload(self.active.other(), next, library);

        // Compositing directives for the active clip.
        let mut directives = FrameDirectives {
            active_clip_id: Some(current_clip.id.clone()),
            transform: current_clip.body.transform().copied(),
            scale_multiplier: 1.0,
            fade_alpha: 1.0,
            filter,
        };
        if let ClipBody::Image { ken_burns: true, .. } = &current_clip.body {
            let progress = ((time - current_clip.start) / current_clip.duration).clamp(0.0, 1.0);
            directives.scale_multiplier = 1.0 + KEN_BURNS_ZOOM * progress;
            directives.fade_alpha =
                ((time - current_clip.start) / KEN_BURNS_FADE_IN).clamp(0.0, 1.0);
        }
        directives
    }

    /// Assigns the standby surface to the upcoming clip: paused, source
    /// loaded, pre-seeked near the cut-in point.
    fn preload(&mut self, id: SurfaceId, next: Option<&Clip>, library: &MediaLibrary) {
        let slot = self.slot_mut(id);
        slot.surface.set_playing(false);

        let Some(next_clip) = next else {
            slot.clip_id = None;
            return;
        };
        slot.clip_id = Some(next_clip.id.clone());

        let url = next_clip
            .body
            .asset_id()
            .and_then(|asset_id| library.get(asset_id))
            .and_then(|a| a.url.clone());
        if let Some(url) = url {
            slot.ensure_source(&url);
            slot.sync_position(next_clip.body.trim_start());
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
