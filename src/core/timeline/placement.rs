//! Placement Algorithms
//!
//! Pure functions used by the timeline engine to compute collision-free
//! placement, insertion ripple, and deletion ripple. All functions treat a
//! clip's span as the half-open interval `[start, start + duration)`.

use tracing::debug;

use super::models::{Clip, Track};
use crate::core::TimeSec;

/// Ids of the track's clips sorted by start time (ties by id)
fn sorted_clip_ids(track: &Track) -> Vec<String> {
    track
        .clips_by_start()
        .into_iter()
        .map(|c| c.id.clone())
        .collect()
}

/// Resolves the earliest legal magnetic insertion point at or after the
/// requested start: a start falling inside an existing clip snaps to that
/// clip's end, cascading through covering clips in start order.
pub fn resolve_insertion_point(track: &Track, requested: TimeSec) -> TimeSec {
    let mut point = requested.max(0.0);
    for clip in track.clips_by_start() {
        if clip.start < point && clip.end() > point {
            point = clip.end();
        }
    }
    point
}

/// Inserts a clip magnetically: places it at the resolved insertion point
/// and repacks every clip at or after that point contiguously behind it,
/// preserving relative order. Returns the start the clip landed on.
pub fn insert_magnetic(track: &mut Track, mut clip: Clip) -> TimeSec {
    let point = resolve_insertion_point(track, clip.start);
    debug!(
        track_id = %track.id,
        requested = clip.start,
        resolved = point,
        "magnetic insertion"
    );
    clip.start = point;

    let trailing: Vec<String> = sorted_clip_ids(track)
        .into_iter()
        .filter(|id| {
            track
                .get_clip(id)
                .map(|c| c.start >= point)
                .unwrap_or(false)
        })
        .collect();

    let mut cursor = clip.end();
    track.clips.push(clip);
    for id in trailing {
        if let Some(c) = track.get_clip_mut(&id) {
            c.start = cursor;
            cursor += c.duration;
        }
    }
    point
}

/// Repacks the whole track contiguously from time 0 in start order.
///
/// Used by magnetic deletion and by the magnetic move (reorder-and-repack)
/// branch; magnetic insertion is the only path that preserves a leading gap.
pub fn reflow(track: &mut Track) {
    let mut cursor: TimeSec = 0.0;
    for id in sorted_clip_ids(track) {
        if let Some(c) = track.get_clip_mut(&id) {
            c.start = cursor;
            cursor += c.duration;
        }
    }
}

/// After a resize, keeps track order fixed and ripples only clips after the
/// edited one, each snapped to immediately follow its predecessor.
pub fn ripple_after(track: &mut Track, edited_clip_id: &str) {
    let order = sorted_clip_ids(track);
    let Some(edited_index) = order.iter().position(|id| id == edited_clip_id) else {
        return;
    };

    let mut cursor = match track.get_clip(edited_clip_id) {
        Some(c) => c.end(),
        None => return,
    };
    for id in order.into_iter().skip(edited_index + 1) {
        if let Some(c) = track.get_clip_mut(&id) {
            c.start = cursor;
            cursor += c.duration;
        }
    }
}

/// First clip (in start order) overlapping `[start, end)`, skipping ids in
/// `ignore`
pub fn find_collision<'a>(
    track: &'a Track,
    start: TimeSec,
    end: TimeSec,
    ignore: &[&str],
) -> Option<&'a Clip> {
    track
        .clips_by_start()
        .into_iter()
        .find(|c| !ignore.contains(&c.id.as_str()) && c.overlaps_span(start, end))
}

/// End time of the last clip by start time.
///
/// Non-magnetic collision fallback looks only at this single clip, not at
/// free gaps earlier on the track.
pub fn last_clip_end(track: &Track) -> TimeSec {
    track
        .clips_by_start()
        .last()
        .map(|c| c.end())
        .unwrap_or(0.0)
}

/// First-fit probe used by paste: starting at the requested time, each
/// collision moves the candidate to the colliding clip's end until a free
/// span is found.
pub fn probe_forward(track: &Track, requested: TimeSec, duration: TimeSec) -> TimeSec {
    let mut start = requested.max(0.0);
    loop {
        match find_collision(track, start, start + duration, &[]) {
            Some(collider) => start = collider.end(),
            None => return start,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
