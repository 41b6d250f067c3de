//! Editing Session
//!
//! Aggregates everything one editing session owns: the snapshot history,
//! the media library, the virtual transport, the clipboard, the magnetic
//! placement toggle, and the last stock search results. Editing methods run
//! an engine operation over the current snapshot and commit the result;
//! the history's structural-equality gate keeps no-ops out.

use std::time::Instant;

use tracing::{debug, info};

use crate::core::{
    assets::{MediaAsset, MediaLibrary},
    effects::Effect,
    playback::{timeline_duration, PlaybackScheduler},
    stock::StockAsset,
    timeline::{
        engine::{self, AddedClip},
        placement, Clip, ClipPatch, Track, TrackKind,
    },
    AssetId, ClipId, TimeSec,
};

use super::{history::History, state::EditorState};

/// One in-memory editing session
pub struct EditorSession {
    history: History,
    library: MediaLibrary,
    transport: PlaybackScheduler,
    clipboard: Option<Clip>,
    is_magnetic: bool,
    stock_results: Vec<StockAsset>,
}

impl EditorSession {
    /// Creates an empty session with the magnetic timeline enabled
    pub fn new() -> Self {
        info!("editor session created");
        Self {
            history: History::new(EditorState::new()),
            library: MediaLibrary::new(),
            transport: PlaybackScheduler::new(),
            clipboard: None,
            is_magnetic: true,
            stock_results: Vec::new(),
        }
    }

    /// The current editor-state snapshot
    pub fn state(&self) -> &EditorState {
        self.history.current()
    }

    /// The media library
    pub fn library(&self) -> &MediaLibrary {
        &self.library
    }

    /// The virtual transport clock
    pub fn transport(&self) -> &PlaybackScheduler {
        &self.transport
    }

    /// Session-wide magnetic placement toggle
    pub fn is_magnetic(&self) -> bool {
        self.is_magnetic
    }

    pub fn set_magnetic(&mut self, magnetic: bool) {
        self.is_magnetic = magnetic;
    }

    /// Commits a candidate snapshot; returns false when it was a no-op
    fn apply(&mut self, next: EditorState) -> bool {
        self.history.commit(next)
    }

    // =========================================================================
    // History
    // =========================================================================

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo(&mut self) -> &EditorState {
        self.history.undo()
    }

    pub fn redo(&mut self) -> &EditorState {
        self.history.redo()
    }

    // =========================================================================
    // Assets
    // =========================================================================

    /// Adds an imported asset to the library, returning its id
    pub fn import_asset(&mut self, asset: MediaAsset) -> AssetId {
        let id = asset.id.clone();
        self.library.insert(asset);
        id
    }

    /// Marks a downloading asset ready with its resolved URL.
    ///
    /// Stale completions for assets deleted mid-download are dropped.
    pub fn resolve_download(&mut self, asset_id: &str, url: &str) -> bool {
        self.library.resolve_download(asset_id, url)
    }

    /// Drops the placeholder of a failed download
    pub fn fail_download(&mut self, asset_id: &str) -> Option<MediaAsset> {
        self.library.fail_download(asset_id)
    }

    /// Deletes an asset, cascading to removal of every clip referencing it
    pub fn delete_asset(&mut self, asset_id: &str) -> Option<MediaAsset> {
        let removed = self.library.remove(asset_id)?;

        let referencing: Vec<ClipId> = self
            .state()
            .all_clips()
            .filter(|(_, c)| c.body.asset_id() == Some(asset_id))
            .map(|(_, c)| c.id.clone())
            .collect();
        if !referencing.is_empty() {
            debug!(
                asset_id,
                clips = referencing.len(),
                "asset deletion cascades to referencing clips"
            );
            let next = engine::delete_clips(self.state(), &referencing, self.is_magnetic);
            self.apply(next);
        }
        Some(removed)
    }

    // =========================================================================
    // Timeline Editing
    // =========================================================================

    /// Adds a clip built from a library asset; see [`engine::add_clip`]
    pub fn add_clip(
        &mut self,
        track_id: Option<&str>,
        asset_id: &str,
        start_time: TimeSec,
        duration_override: Option<TimeSec>,
    ) -> Option<AddedClip> {
        let asset = self.library.get(asset_id)?.clone();
        let (next, added) = engine::add_clip(
            self.state(),
            track_id,
            &asset,
            start_time,
            duration_override,
            self.is_magnetic,
        );
        self.apply(next);
        added
    }

    /// Adds a text clip on the first text track (synthesized when missing),
    /// probing forward past collisions like paste does
    pub fn add_text_clip(
        &mut self,
        content: &str,
        start_time: TimeSec,
        duration: TimeSec,
    ) -> Option<AddedClip> {
        if duration <= 0.0 {
            return None;
        }
        self.add_freeform_clip(
            TrackKind::Text,
            Clip::text(content, start_time, duration),
            true,
        )
    }

    /// Adds an adjustment clip carrying the given effect stack.
    ///
    /// Adjustment layers apply to whatever is beneath them, so the clip is
    /// placed verbatim; overlap with other layers is meaningful, not a
    /// collision.
    pub fn add_adjustment_clip(
        &mut self,
        name: &str,
        start_time: TimeSec,
        duration: TimeSec,
        effects: Vec<Effect>,
    ) -> Option<AddedClip> {
        if duration <= 0.0 {
            return None;
        }
        self.add_freeform_clip(
            TrackKind::Adjustment,
            Clip::adjustment(name, start_time, duration, effects),
            false,
        )
    }

    fn add_freeform_clip(
        &mut self,
        kind: TrackKind,
        mut clip: Clip,
        probe_collisions: bool,
    ) -> Option<AddedClip> {
        let mut next = self.state().clone();
        let track_index = match next.tracks.iter().position(|t| t.kind == kind && !t.is_locked) {
            Some(index) => index,
            None => {
                let count = next.tracks.iter().filter(|t| t.kind == kind).count();
                let name = format!("{} {}", kind.display_name(), count + 1);
                next.tracks.push(Track::new(&name, kind));
                next.tracks.len() - 1
            }
        };

        let track = &mut next.tracks[track_index];
        if probe_collisions {
            clip.start = placement::probe_forward(track, clip.start, clip.duration);
        }
        let added = AddedClip {
            clip_id: clip.id.clone(),
            track_id: track.id.clone(),
            start: clip.start,
            duration: clip.duration,
        };
        next.selected_clip_ids = vec![clip.id.clone()];
        track.clips.push(clip);

        self.apply(next);
        Some(added)
    }

    /// Updates a clip's properties; see [`engine::update_clip`]
    pub fn update_clip(&mut self, track_id: &str, clip_id: &str, patch: &ClipPatch) -> bool {
        let next = engine::update_clip(self.state(), track_id, clip_id, patch, self.is_magnetic);
        self.apply(next)
    }

    /// Splits whichever clip qualifies at the given time
    pub fn split_at(&mut self, time: TimeSec) -> bool {
        let next = engine::split_clip(self.state(), time);
        self.apply(next)
    }

    /// Splits at the current playhead position
    pub fn split_at_playhead(&mut self) -> bool {
        self.split_at(self.transport.current_time())
    }

    /// Deletes the given clips
    pub fn delete_clips(&mut self, ids: &[ClipId]) -> bool {
        let next = engine::delete_clips(self.state(), ids, self.is_magnetic);
        self.apply(next)
    }

    /// Deletes the current selection, returning how many clips were removed
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.state().selected_clip_ids.clone();
        if ids.is_empty() {
            return 0;
        }
        self.delete_clips(&ids);
        ids.len()
    }

    /// Captures the first selected clip onto the clipboard
    pub fn copy_selected(&mut self) -> bool {
        match engine::copy_selected(self.state()) {
            Some(clip) => {
                self.clipboard = Some(clip);
                true
            }
            None => false,
        }
    }

    /// Pastes the clipboard clip at the playhead (first-fit forward probe)
    pub fn paste_at_playhead(&mut self) -> Option<AddedClip> {
        let clip = self.clipboard.clone()?;
        let (next, added) = engine::paste(self.state(), &clip, self.transport.current_time());
        self.apply(next);
        added
    }

    /// Groups the current selection
    pub fn group_selected(&mut self) -> bool {
        let next = engine::group_selected(self.state());
        self.apply(next)
    }

    /// Dissolves every group touching the current selection
    pub fn ungroup_selected(&mut self) -> bool {
        let next = engine::ungroup_selected(self.state());
        self.apply(next)
    }

    /// Selects a clip (group-aware); see [`engine::select`]
    pub fn select(&mut self, track_id: &str, clip_id: &str, is_multi: bool) -> bool {
        let next = engine::select(self.state(), track_id, clip_id, is_multi);
        self.apply(next)
    }

    /// Replaces the selection with the given clips, expanding groups.
    ///
    /// The caller validates the ids first; unknown ids are skipped here.
    pub fn select_many(&mut self, ids: &[ClipId]) -> bool {
        let mut next = self.state().clone();
        next.selected_clip_ids.clear();
        for id in ids {
            let Some(track_id) = next.find_clip(id).map(|(t, _)| t.id.clone()) else {
                continue;
            };
            next = engine::select(&next, &track_id, id, true);
        }
        self.apply(next)
    }

    // =========================================================================
    // Tracks
    // =========================================================================

    pub fn add_track(&mut self, name: &str, kind: TrackKind) -> bool {
        let next = engine::add_track(self.state(), name, kind);
        self.apply(next)
    }

    pub fn remove_track(&mut self, track_id: &str) -> bool {
        let next = engine::remove_track(self.state(), track_id);
        self.apply(next)
    }

    pub fn set_track_locked(&mut self, track_id: &str, locked: bool) -> bool {
        self.with_track(track_id, |t| t.is_locked = locked)
    }

    pub fn set_track_visible(&mut self, track_id: &str, visible: bool) -> bool {
        self.with_track(track_id, |t| t.is_visible = visible)
    }

    fn with_track(&mut self, track_id: &str, mutate: impl FnOnce(&mut Track)) -> bool {
        let mut next = self.state().clone();
        let Some(track) = next.tracks.iter_mut().find(|t| t.id == track_id) else {
            return false;
        };
        mutate(track);
        self.apply(next)
    }

    // =========================================================================
    // Transport
    // =========================================================================

    /// Derived timeline duration for the current snapshot
    pub fn timeline_duration(&self) -> TimeSec {
        timeline_duration(self.state())
    }

    pub fn toggle_play(&mut self) {
        self.transport.toggle_play();
    }

    pub fn pause(&mut self) {
        self.transport.pause();
    }

    pub fn seek(&mut self, time: TimeSec) {
        let duration = self.timeline_duration();
        self.transport.seek(time, duration);
    }

    pub fn shuttle_forward(&mut self) {
        self.transport.shuttle_forward();
    }

    pub fn shuttle_reverse(&mut self) {
        self.transport.shuttle_reverse();
    }

    pub fn shuttle_stop(&mut self) {
        self.transport.shuttle_stop();
    }

    /// Per-frame tick against the current snapshot's derived duration
    pub fn tick(&mut self, now: Instant) {
        let duration = self.timeline_duration();
        self.transport.tick(now, duration);
    }

    // =========================================================================
    // Stock Result Cache
    // =========================================================================

    /// Replaces the last stock search results
    pub fn cache_stock_results(&mut self, results: Vec<StockAsset>) {
        self.stock_results = results;
    }

    /// The last stock search results
    pub fn stock_results(&self) -> &[StockAsset] {
        &self.stock_results
    }

    /// Looks up a cached stock result by id
    pub fn find_stock_result(&self, stock_id: &str) -> Option<&StockAsset> {
        self.stock_results.iter().find(|r| r.id == stock_id)
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
