//! Editor State
//!
//! The unit of history: tracks, selection, and groups as one immutable
//! snapshot. Every editing operation replaces the whole structure; the
//! three playback consumers only ever read the current snapshot.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{
    timeline::{Clip, Group, Track},
    ClipId, TimeSec,
};

/// The editor's undoable state snapshot
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorState {
    pub tracks: Vec<Track>,
    pub selected_clip_ids: Vec<ClipId>,
    pub groups: Vec<Group>,
}

impl EditorState {
    /// Creates an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a track by id
    pub fn get_track(&self, track_id: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.id == track_id)
    }

    /// Finds a clip by id across all tracks
    pub fn find_clip(&self, clip_id: &str) -> Option<(&Track, &Clip)> {
        self.tracks
            .iter()
            .find_map(|t| t.get_clip(clip_id).map(|c| (t, c)))
    }

    /// Returns true when a clip with the id exists on any track
    pub fn has_clip(&self, clip_id: &str) -> bool {
        self.find_clip(clip_id).is_some()
    }

    /// The group a clip belongs to, if any
    pub fn group_of(&self, clip_id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.contains(clip_id))
    }

    /// All clips in track order, then clip insertion order
    pub fn all_clips(&self) -> impl Iterator<Item = (&Track, &Clip)> {
        self.tracks
            .iter()
            .flat_map(|t| t.clips.iter().map(move |c| (t, c)))
    }

    /// End time of the last clip across all tracks
    pub fn latest_clip_end(&self) -> TimeSec {
        self.tracks.iter().map(Track::end_time).fold(0.0, f64::max)
    }

    /// The current selection as a set
    pub fn selection_set(&self) -> BTreeSet<&str> {
        self.selected_clip_ids.iter().map(String::as_str).collect()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timeline::TrackKind;
    use crate::core::AssetKind;

    fn state_with_clip() -> (EditorState, String, String) {
        let mut state = EditorState::new();
        let mut track = Track::new("Video 1", TrackKind::Video);
        let clip = Clip::new(
            "clip",
            2.0,
            5.0,
            Clip::body_for_asset(AssetKind::Video, "asset_1"),
        );
        let clip_id = clip.id.clone();
        track.clips.push(clip);
        let track_id = track.id.clone();
        state.tracks.push(track);
        (state, track_id, clip_id)
    }

    #[test]
    fn test_find_clip_and_track() {
        let (state, track_id, clip_id) = state_with_clip();

        let (track, clip) = state.find_clip(&clip_id).unwrap();
        assert_eq!(track.id, track_id);
        assert_eq!(clip.id, clip_id);
        assert!(state.get_track(&track_id).is_some());
        assert!(state.find_clip("missing").is_none());
    }

    #[test]
    fn test_latest_clip_end() {
        let (mut state, _, _) = state_with_clip();
        assert_eq!(state.latest_clip_end(), 7.0);

        let mut audio = Track::new("Audio 1", TrackKind::Audio);
        audio.clips.push(Clip::new(
            "song",
            0.0,
            12.0,
            Clip::body_for_asset(AssetKind::Audio, "asset_2"),
        ));
        state.tracks.push(audio);
        assert_eq!(state.latest_clip_end(), 12.0);
    }

    #[test]
    fn test_group_of() {
        let (mut state, _, clip_id) = state_with_clip();
        assert!(state.group_of(&clip_id).is_none());

        state
            .groups
            .push(Group::new([clip_id.clone(), "other".to_string()]));
        assert!(state.group_of(&clip_id).is_some());
    }
}
