//! Timeline Editing Operations
//!
//! Every operation takes the current editor state and returns a new one.
//! All operations are total: an invalid target (missing track or clip, a
//! track-type mismatch, an empty selection) yields the input state
//! unchanged, never an error, so UI and AI callers always receive a defined
//! result.

use tracing::{debug, warn};

use super::models::{Clip, ClipPatch, Group, Track, TrackKind};
use super::placement;
use crate::core::{
    assets::MediaAsset,
    project::EditorState,
    ClipId, TimeSec, TrackId,
};

// =============================================================================
// Add Clip
// =============================================================================

/// Details of a clip created by [`add_clip`] or [`paste`]
#[derive(Clone, Debug, PartialEq)]
pub struct AddedClip {
    pub clip_id: ClipId,
    pub track_id: TrackId,
    pub start: TimeSec,
    pub duration: TimeSec,
}

/// Adds a clip built from `asset` to the timeline.
///
/// With `track_id` given, the clip goes on that track unless its kind does
/// not host the asset's clip type. With `None`, the first unlocked matching
/// track is used, or a new track is synthesized. The new clip becomes the
/// sole selection.
pub fn add_clip(
    state: &EditorState,
    track_id: Option<&str>,
    asset: &MediaAsset,
    start_time: TimeSec,
    duration_override: Option<TimeSec>,
    is_magnetic: bool,
) -> (EditorState, Option<AddedClip>) {
    let required_kind = TrackKind::for_asset(asset.kind);
    let duration = duration_override.unwrap_or(asset.duration_sec);
    if duration <= 0.0 {
        warn!(asset_id = %asset.id, duration, "rejecting clip with non-positive duration");
        return (state.clone(), None);
    }

    let mut next = state.clone();

    let track_index = match track_id {
        Some(id) => match next.tracks.iter().position(|t| t.id == id) {
            Some(index) if next.tracks[index].kind == required_kind => index,
            Some(_) => {
                debug!(track_id = id, "track type mismatch for asset, ignoring add");
                return (state.clone(), None);
            }
            None => return (state.clone(), None),
        },
        None => match next
            .tracks
            .iter()
            .position(|t| t.kind == required_kind && !t.is_locked)
        {
            Some(index) => index,
            None => {
                let count = next
                    .tracks
                    .iter()
                    .filter(|t| t.kind == required_kind)
                    .count();
                let name = format!("{} {}", required_kind.display_name(), count + 1);
                next.tracks.push(Track::new(&name, required_kind));
                next.tracks.len() - 1
            }
        },
    };

    let clip = Clip::new(
        &asset.name,
        start_time.max(0.0),
        duration,
        Clip::body_for_asset(asset.kind, &asset.id),
    );
    let clip_id = clip.id.clone();

    let track = &mut next.tracks[track_index];
    let start = if is_magnetic {
        placement::insert_magnetic(track, clip)
    } else {
        let mut clip = clip;
        if placement::find_collision(track, clip.start, clip.end(), &[]).is_some() {
            // Append-on-collision: only the last clip by start time is
            // considered; earlier gaps are left unfilled.
            clip.start = placement::last_clip_end(track);
        }
        let start = clip.start;
        track.clips.push(clip);
        start
    };

    let added = AddedClip {
        clip_id: clip_id.clone(),
        track_id: next.tracks[track_index].id.clone(),
        start,
        duration,
    };
    next.selected_clip_ids = vec![clip_id];
    (next, Some(added))
}

// =============================================================================
// Update Clip
// =============================================================================

/// Updates a clip's properties.
///
/// Three branches, in priority order: a positional move of a grouped clip
/// moves the whole group by the same delta (all-or-nothing); a magnetic
/// move or resize of an ungrouped clip re-flows or ripples the track; any
/// other change is a direct merge, with nested transform/style/animation
/// fields deep-merged.
pub fn update_clip(
    state: &EditorState,
    track_id: &str,
    clip_id: &str,
    patch: &ClipPatch,
    is_magnetic: bool,
) -> EditorState {
    let Some(track_index) = state.tracks.iter().position(|t| t.id == track_id) else {
        return state.clone();
    };
    let Some(clip) = state.tracks[track_index].get_clip(clip_id) else {
        return state.clone();
    };

    let start_changing = patch.start.is_some_and(|s| s != clip.start);
    let duration_changing = patch.duration.is_some_and(|d| d != clip.duration);

    // Branch 1: grouped positional move, validated as a unit.
    if start_changing {
        if let Some(group) = state.group_of(clip_id) {
            let delta = patch.start.unwrap_or(clip.start) - clip.start;
            return move_group(state, group, delta);
        }
    }

    // Branch 2: magnetic move or resize of an ungrouped clip.
    if is_magnetic && (start_changing || duration_changing) {
        let mut next = state.clone();
        let track = &mut next.tracks[track_index];
        let updated = track.get_clip(clip_id).map(|c| c.with_patch(patch));
        if let (Some(updated), Some(slot)) = (updated, track.get_clip_mut(clip_id)) {
            *slot = updated;
        }
        if duration_changing {
            // Resize keeps track order fixed and ripples trailing clips.
            placement::ripple_after(track, clip_id);
        } else {
            // A move behaves like reorder-and-repack.
            placement::reflow(track);
        }
        return next;
    }

    // Branch 3: direct merge.
    let mut next = state.clone();
    let track = &mut next.tracks[track_index];
    let updated = track.get_clip(clip_id).map(|c| c.with_patch(patch));
    if let (Some(updated), Some(slot)) = (updated, track.get_clip_mut(clip_id)) {
        *slot = updated;
    }
    next
}

/// Applies `delta` to every member of `group`, or nothing at all.
///
/// A member landing before 0, or colliding with a clip outside the group on
/// its own track, rejects the whole move. Collisions are checked against
/// non-member clips only; moved members are not re-validated against each
/// other.
fn move_group(state: &EditorState, group: &Group, delta: TimeSec) -> EditorState {
    let member_ids: Vec<&str> = group.clip_ids.iter().map(String::as_str).collect();

    for track in &state.tracks {
        for member in track.clips.iter().filter(|c| group.contains(&c.id)) {
            let new_start = member.start + delta;
            if new_start < 0.0 {
                debug!(clip_id = %member.id, new_start, "group move would go negative, rejecting");
                return state.clone();
            }
            if placement::find_collision(track, new_start, new_start + member.duration, &member_ids)
                .is_some()
            {
                debug!(clip_id = %member.id, "group move collides, rejecting");
                return state.clone();
            }
        }
    }

    let mut next = state.clone();
    for track in &mut next.tracks {
        for clip in track.clips.iter_mut().filter(|c| group.contains(&c.id)) {
            clip.start += delta;
        }
    }
    next
}

// =============================================================================
// Split Clip
// =============================================================================

/// Splits a clip at the given timeline position.
///
/// The single selected clip wins when the time falls strictly inside it;
/// otherwise the first clip (track order, then clip order) strictly
/// containing the time is split, skipping locked tracks. The first half
/// keeps the original id and becomes the selection; the second half gets a
/// fresh id with its source offset advanced past the cut.
pub fn split_clip(state: &EditorState, time: TimeSec) -> EditorState {
    let target: Option<(TrackId, ClipId)> = if state.selected_clip_ids.len() == 1 {
        let selected = &state.selected_clip_ids[0];
        state
            .find_clip(selected)
            .filter(|(_, c)| c.contains_strictly(time))
            .map(|(t, c)| (t.id.clone(), c.id.clone()))
    } else {
        None
    };

    let target = target.or_else(|| {
        state
            .tracks
            .iter()
            .filter(|t| !t.is_locked)
            .flat_map(|t| t.clips.iter().map(move |c| (t, c)))
            .find(|(_, c)| c.contains_strictly(time))
            .map(|(t, c)| (t.id.clone(), c.id.clone()))
    });

    let Some((track_id, clip_id)) = target else {
        return state.clone();
    };

    let mut next = state.clone();
    let track = next
        .tracks
        .iter_mut()
        .find(|t| t.id == track_id)
        .expect("split target track exists");
    let index = track
        .clips
        .iter()
        .position(|c| c.id == clip_id)
        .expect("split target clip exists");

    let first_duration = time - track.clips[index].start;
    let mut second = track.clips[index].clone();
    second.id = crate::core::new_id();
    second.start = time;
    second.duration -= first_duration;
    second.advance_trim(first_duration);

    track.clips[index].duration = first_duration;
    track.clips.insert(index + 1, second);

    next.selected_clip_ids = vec![clip_id];
    next
}

// =============================================================================
// Delete Clips
// =============================================================================

/// Removes all clips with matching ids from all tracks.
///
/// Magnetic tracks that lost a clip are re-flowed contiguously from time 0.
/// Groups are pruned of removed ids and dissolve under two members; the
/// selection drops the removed ids as well.
pub fn delete_clips(state: &EditorState, ids: &[ClipId], is_magnetic: bool) -> EditorState {
    let mut next = state.clone();

    for track in &mut next.tracks {
        let before = track.clips.len();
        track.clips.retain(|c| !ids.contains(&c.id));
        if is_magnetic && track.clips.len() != before {
            placement::reflow(track);
        }
    }

    for group in &mut next.groups {
        group.clip_ids.retain(|id| !ids.contains(id));
    }
    next.groups.retain(Group::is_viable);
    next.selected_clip_ids.retain(|id| !ids.contains(id));

    next
}

// =============================================================================
// Copy / Paste
// =============================================================================

/// Captures the first selected clip in track order, verbatim.
pub fn copy_selected(state: &EditorState) -> Option<Clip> {
    state
        .all_clips()
        .find(|(_, c)| state.selected_clip_ids.contains(&c.id))
        .map(|(_, c)| c.clone())
}

/// Pastes a copied clip at the given time on the first track of the
/// matching type, probing forward past collisions (first-fit). The pasted
/// clip gets a fresh id and becomes the sole selection.
pub fn paste(state: &EditorState, clip: &Clip, at: TimeSec) -> (EditorState, Option<AddedClip>) {
    let required_kind = match &clip.body {
        super::models::ClipBody::Video { .. } | super::models::ClipBody::Image { .. } => {
            TrackKind::Video
        }
        super::models::ClipBody::Audio { .. } => TrackKind::Audio,
        super::models::ClipBody::Text { .. } => TrackKind::Text,
        super::models::ClipBody::Adjustment { .. } => TrackKind::Adjustment,
    };

    let Some(track_index) = state.tracks.iter().position(|t| t.kind == required_kind) else {
        return (state.clone(), None);
    };

    let mut next = state.clone();
    let track = &mut next.tracks[track_index];
    let start = placement::probe_forward(track, at, clip.duration);

    let mut pasted = clip.clone();
    pasted.id = crate::core::new_id();
    pasted.start = start;
    let added = AddedClip {
        clip_id: pasted.id.clone(),
        track_id: track.id.clone(),
        start,
        duration: pasted.duration,
    };
    track.clips.push(pasted);

    next.selected_clip_ids = vec![added.clip_id.clone()];
    (next, Some(added))
}

// =============================================================================
// Group / Ungroup
// =============================================================================

/// Creates a group from the current selection (two or more clips).
///
/// Selected ids are pulled out of any pre-existing group; groups falling
/// under two members dissolve.
pub fn group_selected(state: &EditorState) -> EditorState {
    if state.selected_clip_ids.len() < 2 {
        return state.clone();
    }

    let mut next = state.clone();
    for group in &mut next.groups {
        group
            .clip_ids
            .retain(|id| !state.selected_clip_ids.contains(id));
    }
    next.groups.retain(Group::is_viable);
    next.groups
        .push(Group::new(state.selected_clip_ids.iter().cloned()));
    next
}

/// Dissolves every group that has at least one member in the selection.
pub fn ungroup_selected(state: &EditorState) -> EditorState {
    let mut next = state.clone();
    next.groups.retain(|g| {
        !state
            .selected_clip_ids
            .iter()
            .any(|id| g.contains(id))
    });
    next
}

// =============================================================================
// Select
// =============================================================================

/// Selects a clip, expanding to its whole group when grouped.
///
/// Multi-select toggles the id set: fully-selected sets deselect, anything
/// else unions in. Single select replaces the selection, as a no-op when it
/// already matches exactly, so redundant selects never grow history.
pub fn select(state: &EditorState, track_id: &str, clip_id: &str, is_multi: bool) -> EditorState {
    let Some(track) = state.get_track(track_id) else {
        return state.clone();
    };
    if track.get_clip(clip_id).is_none() {
        return state.clone();
    }

    let id_set: Vec<ClipId> = match state.group_of(clip_id) {
        Some(group) => group.clip_ids.iter().cloned().collect(),
        None => vec![clip_id.to_string()],
    };

    let mut next = state.clone();
    if is_multi {
        let all_selected = id_set
            .iter()
            .all(|id| state.selected_clip_ids.contains(id));
        if all_selected {
            next.selected_clip_ids.retain(|id| !id_set.contains(id));
        } else {
            for id in id_set {
                if !next.selected_clip_ids.contains(&id) {
                    next.selected_clip_ids.push(id);
                }
            }
        }
    } else {
        let current = state.selection_set();
        let wanted: std::collections::BTreeSet<&str> =
            id_set.iter().map(String::as_str).collect();
        if current == wanted {
            return state.clone();
        }
        next.selected_clip_ids = id_set;
    }
    next
}

// =============================================================================
// Track Management
// =============================================================================

/// Adds an empty track of the given kind.
pub fn add_track(state: &EditorState, name: &str, kind: TrackKind) -> EditorState {
    let mut next = state.clone();
    next.tracks.push(Track::new(name, kind));
    next
}

/// Removes a track, dropping its clips (assets are untouched).
///
/// Groups and the selection are pruned of the dropped clip ids.
pub fn remove_track(state: &EditorState, track_id: &str) -> EditorState {
    let Some(index) = state.tracks.iter().position(|t| t.id == track_id) else {
        return state.clone();
    };

    let mut next = state.clone();
    let removed = next.tracks.remove(index);
    let dropped: Vec<ClipId> = removed.clips.into_iter().map(|c| c.id).collect();

    for group in &mut next.groups {
        group.clip_ids.retain(|id| !dropped.contains(id));
    }
    next.groups.retain(Group::is_viable);
    next.selected_clip_ids.retain(|id| !dropped.contains(id));
    next
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetKind;

    fn video_asset(duration: TimeSec) -> MediaAsset {
        MediaAsset::new(AssetKind::Video, "clip.mp4", "blob:clip", duration)
    }

    fn audio_asset(duration: TimeSec) -> MediaAsset {
        MediaAsset::new(AssetKind::Audio, "song.mp3", "blob:song", duration)
    }

    fn spans(track: &Track) -> Vec<(TimeSec, TimeSec)> {
        track
            .clips_by_start()
            .into_iter()
            .map(|c| (c.start, c.end()))
            .collect()
    }

    // =========================================================================
    // add_clip
    // =========================================================================

    #[test]
    fn test_add_clip_synthesizes_track() {
        let state = EditorState::new();
        let (next, added) = add_clip(&state, None, &video_asset(5.0), 0.0, None, true);

        let added = added.unwrap();
        assert_eq!(next.tracks.len(), 1);
        assert_eq!(next.tracks[0].kind, TrackKind::Video);
        assert_eq!(next.tracks[0].name, "Video 1");
        assert_eq!(added.duration, 5.0);
        assert_eq!(next.selected_clip_ids, vec![added.clip_id]);
    }

    #[test]
    fn test_add_clip_rejects_track_type_mismatch() {
        let state = add_track(&EditorState::new(), "Audio 1", TrackKind::Audio);
        let track_id = state.tracks[0].id.clone();

        let (next, added) = add_clip(&state, Some(&track_id), &video_asset(5.0), 0.0, None, true);
        assert!(added.is_none());
        assert_eq!(next, state);
    }

    #[test]
    fn test_add_clip_skips_locked_track_when_resolving() {
        let mut state = add_track(&EditorState::new(), "Video 1", TrackKind::Video);
        state.tracks[0].is_locked = true;

        let (next, added) = add_clip(&state, None, &video_asset(5.0), 0.0, None, true);
        let added = added.unwrap();
        assert_eq!(next.tracks.len(), 2);
        assert_eq!(next.tracks[1].id, added.track_id);
        assert_eq!(next.tracks[1].name, "Video 2");
    }

    #[test]
    fn test_add_clip_magnetic_scenario() {
        // Scenario 1: add duration-5 at start 3 on an empty magnetic track,
        // then duration-4 at start 0; expect B [0,4) and A [4,9).
        let state = EditorState::new();
        let (state, first) = add_clip(&state, None, &video_asset(5.0), 3.0, None, true);
        assert_eq!(first.unwrap().start, 3.0);

        let (state, second) = add_clip(&state, None, &video_asset(4.0), 0.0, None, true);
        assert_eq!(second.unwrap().start, 0.0);
        assert_eq!(spans(&state.tracks[0]), vec![(0.0, 4.0), (4.0, 9.0)]);
    }

    #[test]
    fn test_add_clip_non_magnetic_append_on_collision() {
        // Scenario 3: track holds [0, 5); non-magnetic add at 2 with
        // duration 3 lands at the colliding clip's end.
        let state = EditorState::new();
        let (state, _) = add_clip(&state, None, &video_asset(5.0), 0.0, None, false);
        let (state, added) = add_clip(&state, None, &video_asset(3.0), 2.0, None, false);

        assert_eq!(added.unwrap().start, 5.0);
        assert_eq!(spans(&state.tracks[0]), vec![(0.0, 5.0), (5.0, 8.0)]);
    }

    #[test]
    fn test_add_clip_non_magnetic_quirk_ignores_earlier_gaps() {
        // Clips at [0,2) and [10,12): a colliding add falls back to the end
        // of the last clip by start time, not into the free gap at [2,10).
        let state = EditorState::new();
        let (state, _) = add_clip(&state, None, &video_asset(2.0), 0.0, None, false);
        let (state, _) = add_clip(&state, None, &video_asset(2.0), 10.0, None, false);
        let (state, added) = add_clip(&state, None, &video_asset(1.0), 1.0, None, false);

        assert_eq!(added.unwrap().start, 12.0);
    }

    #[test]
    fn test_add_clip_non_magnetic_free_placement_verbatim() {
        let state = EditorState::new();
        let (state, _) = add_clip(&state, None, &video_asset(2.0), 0.0, None, false);
        let (_, added) = add_clip(&state, None, &video_asset(2.0), 6.0, None, false);

        assert_eq!(added.unwrap().start, 6.0);
    }

    #[test]
    fn test_add_clip_duration_override() {
        let state = EditorState::new();
        let (_, added) = add_clip(&state, None, &video_asset(30.0), 0.0, Some(4.5), true);
        assert_eq!(added.unwrap().duration, 4.5);
    }

    #[test]
    fn test_add_clip_clamps_negative_start() {
        let state = EditorState::new();
        let (_, added) = add_clip(&state, None, &video_asset(5.0), -3.0, None, true);
        assert_eq!(added.unwrap().start, 0.0);
    }

    #[test]
    fn test_add_audio_clip_targets_audio_track() {
        let state = add_track(&EditorState::new(), "Video 1", TrackKind::Video);
        let (next, added) = add_clip(&state, None, &audio_asset(10.0), 0.0, None, true);

        let added = added.unwrap();
        assert_eq!(next.tracks.len(), 2);
        assert_eq!(next.get_track(&added.track_id).unwrap().kind, TrackKind::Audio);
    }

    // =========================================================================
    // update_clip
    // =========================================================================

    fn two_clip_magnetic_state() -> (EditorState, TrackId, ClipId, ClipId) {
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, true);
        let a = a.unwrap();
        let (state, b) = add_clip(&state, Some(&a.track_id), &video_asset(3.0), 2.0, None, true);
        let b = b.unwrap();
        (state, a.track_id, a.clip_id, b.clip_id)
    }

    #[test]
    fn test_update_clip_missing_target_is_noop() {
        let (state, track_id, _, _) = two_clip_magnetic_state();
        let next = update_clip(&state, &track_id, "missing", &ClipPatch::move_to(1.0), true);
        assert_eq!(next, state);

        let next = update_clip(&state, "missing", "missing", &ClipPatch::move_to(1.0), true);
        assert_eq!(next, state);
    }

    #[test]
    fn test_update_clip_magnetic_resize_ripples_trailing() {
        let (state, track_id, a, _) = two_clip_magnetic_state();
        let next = update_clip(&state, &track_id, &a, &ClipPatch::resize_to(4.0), true);

        // a grows to [0,4), b snaps to follow at [4,7).
        assert_eq!(spans(&next.tracks[0]), vec![(0.0, 4.0), (4.0, 7.0)]);
    }

    #[test]
    fn test_update_clip_magnetic_move_reorders_and_repacks() {
        let (state, track_id, a, b) = two_clip_magnetic_state();
        // Drag a (duration 2) past b: new start 4 sorts it after b.
        let next = update_clip(&state, &track_id, &a, &ClipPatch::move_to(4.0), true);

        let track = &next.tracks[0];
        assert_eq!(spans(track), vec![(0.0, 3.0), (3.0, 5.0)]);
        let order: Vec<&str> = track
            .clips_by_start()
            .into_iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(order, vec![b.as_str(), a.as_str()]);
    }

    #[test]
    fn test_update_clip_magnetic_contiguity_property() {
        let (state, track_id, a, _) = two_clip_magnetic_state();
        let next = update_clip(&state, &track_id, &a, &ClipPatch::resize_to(7.25), true);

        let sorted = next.tracks[0].clips_by_start();
        for pair in sorted.windows(2) {
            assert_eq!(pair[1].start, pair[0].end());
        }
    }

    #[test]
    fn test_update_clip_non_positional_merge() {
        let (state, track_id, a, _) = two_clip_magnetic_state();
        let patch = ClipPatch {
            volume: Some(40.0),
            ..Default::default()
        };
        let next = update_clip(&state, &track_id, &a, &patch, true);

        let (_, clip) = next.find_clip(&a).unwrap();
        assert_eq!(clip.body.volume(), Some(40.0));
        // Placement untouched.
        assert_eq!(spans(&next.tracks[0]), spans(&state.tracks[0]));
    }

    #[test]
    fn test_update_clip_non_magnetic_move_is_direct() {
        let (state, track_id, a, _) = two_clip_magnetic_state();
        let next = update_clip(&state, &track_id, &a, &ClipPatch::move_to(10.0), false);

        let (_, clip) = next.find_clip(&a).unwrap();
        assert_eq!(clip.start, 10.0);
        // No reflow in non-magnetic mode; overlap-free layout not enforced.
        let (_, other) = next
            .find_clip(&state.tracks[0].clips[1].id)
            .unwrap();
        assert_eq!(other.start, 2.0);
    }

    // =========================================================================
    // Grouped moves
    // =========================================================================

    fn grouped_state() -> (EditorState, TrackId, ClipId, ClipId) {
        // a [0,2) and b [5,7) on one magnetic-agnostic track, grouped.
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, false);
        let a = a.unwrap();
        let (state, b) = add_clip(&state, Some(&a.track_id), &video_asset(2.0), 5.0, None, false);
        let b = b.unwrap();
        let state = select(&state, &a.track_id, &a.clip_id, false);
        let state = select(&state, &a.track_id, &b.clip_id, true);
        let state = group_selected(&state);
        (state, a.track_id, a.clip_id, b.clip_id)
    }

    #[test]
    fn test_group_move_applies_same_delta_to_all_members() {
        // Scenario 5: move a by +3 with no collision; b shifts by +3 too.
        let (state, track_id, a, b) = grouped_state();
        let next = update_clip(&state, &track_id, &a, &ClipPatch::move_to(3.0), false);

        let (_, moved_a) = next.find_clip(&a).unwrap();
        let (_, moved_b) = next.find_clip(&b).unwrap();
        assert_eq!(moved_a.start, 3.0);
        assert_eq!(moved_b.start, 8.0);
    }

    #[test]
    fn test_group_move_rejects_negative_start_atomically() {
        let (state, track_id, a, b) = grouped_state();
        let next = update_clip(&state, &track_id, &a, &ClipPatch::move_to(-1.0), false);

        // All-or-nothing: neither member moved.
        assert_eq!(next, state);
        let (_, unmoved_b) = next.find_clip(&b).unwrap();
        assert_eq!(unmoved_b.start, 5.0);
    }

    #[test]
    fn test_group_move_rejects_collision_with_outsider() {
        let (state, track_id, a, _) = grouped_state();
        // An ungrouped clip sits at [9, 11); moving the group by +4 lands b
        // (at [5,7)) onto it.
        let (state, _) = add_clip(&state, Some(&track_id), &video_asset(2.0), 9.0, None, false);
        let state = select(&state, &track_id, &a, false);

        let next = update_clip(&state, &track_id, &a, &ClipPatch::move_to(4.0), false);
        assert_eq!(next, state);
    }

    #[test]
    fn test_group_move_does_not_validate_members_against_each_other() {
        // Quirk pin: adjacent grouped clips on the same track pass
        // validation even when the move lands one on the other's old span.
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, false);
        let a = a.unwrap();
        let (state, b) = add_clip(&state, Some(&a.track_id), &video_asset(2.0), 2.0, None, false);
        let b = b.unwrap();
        let state = select(&state, &a.track_id, &a.clip_id, false);
        let state = select(&state, &a.track_id, &b.clip_id, true);
        let state = group_selected(&state);

        let next = update_clip(
            &state,
            &a.track_id,
            &a.clip_id,
            &ClipPatch::move_to(1.0),
            false,
        );
        let (_, moved_a) = next.find_clip(&a.clip_id).unwrap();
        let (_, moved_b) = next.find_clip(&b.clip_id).unwrap();
        assert_eq!(moved_a.start, 1.0);
        assert_eq!(moved_b.start, 3.0);
    }

    // =========================================================================
    // split_clip
    // =========================================================================

    #[test]
    fn test_split_clip_scenario() {
        // Scenario 2: split [0, 10) at 4 into [0,4) and [4,10) with the
        // second half's source offset advanced by 4.
        let state = EditorState::new();
        let (state, added) = add_clip(&state, None, &video_asset(10.0), 0.0, None, true);
        let original_id = added.unwrap().clip_id;

        let next = split_clip(&state, 4.0);
        let track = &next.tracks[0];
        assert_eq!(track.clips.len(), 2);

        let first = &track.clips[0];
        let second = &track.clips[1];
        assert_eq!(first.id, original_id);
        assert_eq!((first.start, first.end()), (0.0, 4.0));
        assert_eq!((second.start, second.end()), (4.0, 10.0));
        assert_ne!(second.id, original_id);
        assert_eq!(second.body.trim_start(), 4.0);
        assert_eq!(next.selected_clip_ids, vec![original_id]);
    }

    #[test]
    fn test_split_round_trip_durations_and_trim() {
        let state = EditorState::new();
        let (state, added) = add_clip(&state, None, &video_asset(10.0), 0.0, None, true);
        let id = added.unwrap().clip_id;
        // Give the original a non-zero source offset first.
        let track_id = state.tracks[0].id.clone();
        let patch = ClipPatch {
            trim_start: Some(2.5),
            ..Default::default()
        };
        let state = update_clip(&state, &track_id, &id, &patch, true);

        let next = split_clip(&state, 3.0);
        let first = &next.tracks[0].clips[0];
        let second = &next.tracks[0].clips[1];

        assert_eq!(first.duration + second.duration, 10.0);
        assert_eq!(first.body.trim_start(), 2.5);
        assert_eq!(second.body.trim_start(), 2.5 + first.duration);
    }

    #[test]
    fn test_split_at_boundary_is_noop() {
        let state = EditorState::new();
        let (state, _) = add_clip(&state, None, &video_asset(10.0), 0.0, None, true);

        assert_eq!(split_clip(&state, 0.0), state);
        assert_eq!(split_clip(&state, 10.0), state);
        assert_eq!(split_clip(&state, 25.0), state);
    }

    #[test]
    fn test_split_skips_locked_tracks() {
        let state = EditorState::new();
        let (mut state, _) = add_clip(&state, None, &video_asset(10.0), 0.0, None, true);
        state.tracks[0].is_locked = true;
        state.selected_clip_ids.clear();

        assert_eq!(split_clip(&state, 4.0), state);
    }

    #[test]
    fn test_split_prefers_selected_clip() {
        // Two stacked video tracks with clips covering time 4; selection
        // points at the lower track's clip.
        let state = EditorState::new();
        let (state, top) = add_clip(&state, None, &video_asset(10.0), 0.0, None, true);
        let top = top.unwrap();
        let state = add_track(&state, "Video 2", TrackKind::Video);
        let lower_track = state.tracks[1].id.clone();
        let (state, lower) =
            add_clip(&state, Some(&lower_track), &video_asset(10.0), 0.0, None, true);
        let lower = lower.unwrap();
        // add_clip left the lower clip selected.
        assert_eq!(state.selected_clip_ids, vec![lower.clip_id.clone()]);

        let next = split_clip(&state, 4.0);
        assert_eq!(next.get_track(&lower_track).unwrap().clips.len(), 2);
        assert_eq!(next.get_track(&top.track_id).unwrap().clips.len(), 1);
    }

    // =========================================================================
    // delete_clips
    // =========================================================================

    #[test]
    fn test_delete_clips_magnetic_repacks() {
        // Scenario 4: [0,2), [2,5), [5,9); deleting the middle repacks to
        // [0,2), [2,6).
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, true);
        let track_id = a.unwrap().track_id;
        let (state, b) = add_clip(&state, Some(&track_id), &video_asset(3.0), 2.0, None, true);
        let (state, _) = add_clip(&state, Some(&track_id), &video_asset(4.0), 5.0, None, true);

        let next = delete_clips(&state, &[b.unwrap().clip_id], true);
        assert_eq!(spans(&next.tracks[0]), vec![(0.0, 2.0), (2.0, 6.0)]);
    }

    #[test]
    fn test_delete_clips_non_magnetic_leaves_gaps() {
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, false);
        let track_id = a.unwrap().track_id;
        let (state, b) = add_clip(&state, Some(&track_id), &video_asset(3.0), 2.0, None, false);
        let (state, _) = add_clip(&state, Some(&track_id), &video_asset(4.0), 5.0, None, false);

        let next = delete_clips(&state, &[b.unwrap().clip_id], false);
        assert_eq!(spans(&next.tracks[0]), vec![(0.0, 2.0), (5.0, 9.0)]);
    }

    #[test]
    fn test_delete_clips_prunes_groups_and_selection() {
        let (state, track_id, a, b) = grouped_state();
        assert_eq!(state.groups.len(), 1);

        let next = delete_clips(&state, &[a.clone()], false);
        // Group fell under two members and dissolved.
        assert!(next.groups.is_empty());
        assert!(!next.selected_clip_ids.contains(&a));
        assert!(next.find_clip(&b).is_some());
        assert!(next.get_track(&track_id).is_some());
    }

    // =========================================================================
    // copy / paste
    // =========================================================================

    #[test]
    fn test_copy_paste_first_fit() {
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(4.0), 0.0, None, false);
        let a = a.unwrap();
        let (state, _) = add_clip(&state, Some(&a.track_id), &video_asset(3.0), 4.0, None, false);
        let state = select(&state, &a.track_id, &a.clip_id, false);

        let copied = copy_selected(&state).unwrap();
        // Playhead at 1.0 collides with a, then with the second clip.
        let (next, pasted) = paste(&state, &copied, 1.0);
        let pasted = pasted.unwrap();

        assert_eq!(pasted.start, 7.0);
        assert_ne!(pasted.clip_id, a.clip_id);
        assert_eq!(next.selected_clip_ids, vec![pasted.clip_id]);
        assert_eq!(next.tracks[0].clips.len(), 3);
    }

    #[test]
    fn test_paste_without_matching_track_is_noop() {
        let state = EditorState::new();
        let clip = Clip::text("Title", 0.0, 2.0);
        let (next, pasted) = paste(&state, &clip, 0.0);

        assert!(pasted.is_none());
        assert_eq!(next, state);
    }

    #[test]
    fn test_copy_without_selection() {
        let state = EditorState::new();
        assert!(copy_selected(&state).is_none());
    }

    // =========================================================================
    // group / ungroup / select
    // =========================================================================

    #[test]
    fn test_group_requires_two_clips() {
        let state = EditorState::new();
        let (state, _) = add_clip(&state, None, &video_asset(2.0), 0.0, None, true);
        // Single selection: grouping is a no-op.
        let next = group_selected(&state);
        assert!(next.groups.is_empty());
    }

    #[test]
    fn test_group_steals_members_from_existing_groups() {
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, false);
        let a = a.unwrap();
        let (state, b) = add_clip(&state, Some(&a.track_id), &video_asset(2.0), 3.0, None, false);
        let b = b.unwrap();
        let (state, c) = add_clip(&state, Some(&a.track_id), &video_asset(2.0), 6.0, None, false);
        let c = c.unwrap();

        let state = select(&state, &a.track_id, &a.clip_id, false);
        let state = select(&state, &a.track_id, &b.clip_id, true);
        let state = group_selected(&state);
        assert_eq!(state.groups.len(), 1);

        // Regroup b with c: the old {a, b} group loses b and dissolves.
        let state = select(&state, &a.track_id, &c.clip_id, false);
        let state = select(&state, &a.track_id, &b.clip_id, true);
        let state = group_selected(&state);

        assert_eq!(state.groups.len(), 1);
        assert!(state.groups[0].contains(&b.clip_id));
        assert!(state.groups[0].contains(&c.clip_id));
        assert!(!state.groups[0].contains(&a.clip_id));
    }

    #[test]
    fn test_ungroup_dissolves_whole_group_from_one_member() {
        let (state, track_id, a, _) = grouped_state();
        let state = select(&state, &track_id, &a, false);
        let next = ungroup_selected(&state);
        assert!(next.groups.is_empty());
    }

    #[test]
    fn test_select_expands_to_group() {
        let (state, track_id, a, b) = grouped_state();
        let next = select(&state, &track_id, &a, false);

        let selection = next.selection_set();
        assert!(selection.contains(a.as_str()));
        assert!(selection.contains(b.as_str()));
    }

    #[test]
    fn test_select_exact_match_is_noop() {
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, true);
        let a = a.unwrap();

        // add_clip already selected the clip; re-selecting matches exactly.
        let next = select(&state, &a.track_id, &a.clip_id, false);
        assert_eq!(next, state);
    }

    #[test]
    fn test_multi_select_toggles() {
        let state = EditorState::new();
        let (state, a) = add_clip(&state, None, &video_asset(2.0), 0.0, None, false);
        let a = a.unwrap();
        let (state, b) = add_clip(&state, Some(&a.track_id), &video_asset(2.0), 3.0, None, false);
        let b = b.unwrap();

        let state = select(&state, &a.track_id, &a.clip_id, false);
        let state = select(&state, &a.track_id, &b.clip_id, true);
        assert_eq!(state.selected_clip_ids.len(), 2);

        // Toggling an already-selected clip removes it.
        let state = select(&state, &a.track_id, &b.clip_id, true);
        assert_eq!(state.selected_clip_ids, vec![a.clip_id.clone()]);
    }

    #[test]
    fn test_select_unknown_clip_is_noop() {
        let state = EditorState::new();
        let state = add_track(&state, "Video 1", TrackKind::Video);
        let track_id = state.tracks[0].id.clone();

        let next = select(&state, &track_id, "missing", false);
        assert_eq!(next, state);
    }

    // =========================================================================
    // Track management
    // =========================================================================

    #[test]
    fn test_remove_track_drops_clips_and_prunes() {
        let (state, track_id, a, _) = grouped_state();
        let next = remove_track(&state, &track_id);

        assert!(next.tracks.is_empty());
        assert!(next.groups.is_empty());
        assert!(next.selected_clip_ids.is_empty());
        assert!(next.find_clip(&a).is_none());
    }

    #[test]
    fn test_remove_missing_track_is_noop() {
        let state = add_track(&EditorState::new(), "Video 1", TrackKind::Video);
        assert_eq!(remove_track(&state, "missing"), state);
    }
}
