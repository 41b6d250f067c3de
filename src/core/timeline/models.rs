//! Timeline Model Definitions
//!
//! Defines Track, Clip and Group for timeline management. Clip payloads are
//! tagged variants per clip type, so the set of legal properties per type is
//! checked at compile time instead of living in an open property bag.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{
    effects::Effect, new_id, AssetId, AssetKind, ClipId, GroupId, Point2D, TimeSec, TrackId,
};

// =============================================================================
// Transform
// =============================================================================

/// 2D transform applied to visual clips
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    /// Offset from the canvas center, in pixels
    pub position: Point2D,
    /// Uniform scale (1.0 = 100%)
    pub scale: f64,
    /// Rotation in degrees
    pub rotation_deg: f64,
    /// Opacity (0.0 - 1.0)
    pub opacity: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Point2D::zero(),
            scale: 1.0,
            rotation_deg: 0.0,
            opacity: 1.0,
        }
    }
}

/// Partial transform update; unset fields keep their current value
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformPatch {
    pub position: Option<Point2D>,
    pub scale: Option<f64>,
    pub rotation_deg: Option<f64>,
    pub opacity: Option<f64>,
}

impl Transform {
    /// Merges the provided fields over this transform
    pub fn merged(&self, patch: &TransformPatch) -> Self {
        Self {
            position: patch.position.unwrap_or(self.position),
            scale: patch.scale.unwrap_or(self.scale),
            rotation_deg: patch.rotation_deg.unwrap_or(self.rotation_deg),
            opacity: patch.opacity.unwrap_or(self.opacity),
        }
    }
}

// =============================================================================
// Text Styling
// =============================================================================

/// Text clip styling
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    /// Font size in pixels
    pub font_size: f64,
    /// CSS color string
    pub color: String,
    pub bold: bool,
    pub italic: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: "sans-serif".to_string(),
            font_size: 48.0,
            color: "#ffffff".to_string(),
            bold: false,
            italic: false,
        }
    }
}

/// Partial text style update
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStylePatch {
    pub font_family: Option<String>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl TextStyle {
    /// Merges the provided fields over this style
    pub fn merged(&self, patch: &TextStylePatch) -> Self {
        Self {
            font_family: patch
                .font_family
                .clone()
                .unwrap_or_else(|| self.font_family.clone()),
            font_size: patch.font_size.unwrap_or(self.font_size),
            color: patch.color.clone().unwrap_or_else(|| self.color.clone()),
            bold: patch.bold.unwrap_or(self.bold),
            italic: patch.italic.unwrap_or(self.italic),
        }
    }
}

/// Entrance animation applied to a text clip
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextAnimationKind {
    #[default]
    None,
    FadeIn,
    SlideUp,
    Typewriter,
}

/// Text clip animation settings
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnimation {
    pub kind: TextAnimationKind,
    /// Animation length in seconds
    pub duration_sec: TimeSec,
}

impl Default for TextAnimation {
    fn default() -> Self {
        Self {
            kind: TextAnimationKind::None,
            duration_sec: 0.5,
        }
    }
}

/// Partial text animation update
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnimationPatch {
    pub kind: Option<TextAnimationKind>,
    pub duration_sec: Option<TimeSec>,
}

impl TextAnimation {
    /// Merges the provided fields over this animation
    pub fn merged(&self, patch: &TextAnimationPatch) -> Self {
        Self {
            kind: patch.kind.unwrap_or(self.kind),
            duration_sec: patch.duration_sec.unwrap_or(self.duration_sec),
        }
    }
}

// =============================================================================
// Track
// =============================================================================

/// Track type enumeration; constrains which clip bodies a track may hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackKind {
    Video,
    Text,
    Adjustment,
    Audio,
}

impl TrackKind {
    /// Returns true when a clip with the given body may live on this track
    pub fn accepts(&self, body: &ClipBody) -> bool {
        matches!(
            (self, body),
            (TrackKind::Video, ClipBody::Video { .. })
                | (TrackKind::Video, ClipBody::Image { .. })
                | (TrackKind::Audio, ClipBody::Audio { .. })
                | (TrackKind::Text, ClipBody::Text { .. })
                | (TrackKind::Adjustment, ClipBody::Adjustment { .. })
        )
    }

    /// The track kind that hosts clips built from the given asset kind
    pub fn for_asset(kind: AssetKind) -> Self {
        match kind {
            AssetKind::Video | AssetKind::Image => TrackKind::Video,
            AssetKind::Audio => TrackKind::Audio,
        }
    }

    /// Display name used for synthesized tracks
    pub fn display_name(&self) -> &'static str {
        match self {
            TrackKind::Video => "Video",
            TrackKind::Text => "Text",
            TrackKind::Adjustment => "Adjustment",
            TrackKind::Audio => "Audio",
        }
    }
}

/// Track (holds clips directly; order of `clips` is insertion order)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub id: TrackId,
    pub name: String,
    pub kind: TrackKind,
    pub clips: Vec<Clip>,
    pub is_locked: bool,
    pub is_visible: bool,
}

impl Track {
    /// Creates a new empty track
    pub fn new(name: &str, kind: TrackKind) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            kind,
            clips: vec![],
            is_locked: false,
            is_visible: true,
        }
    }

    /// Gets a clip by id
    pub fn get_clip(&self, clip_id: &str) -> Option<&Clip> {
        self.clips.iter().find(|c| c.id == clip_id)
    }

    /// Gets a mutable clip by id
    pub fn get_clip_mut(&mut self, clip_id: &str) -> Option<&mut Clip> {
        self.clips.iter_mut().find(|c| c.id == clip_id)
    }

    /// The clips sorted by start time (insertion order is not positional)
    pub fn clips_by_start(&self) -> Vec<&Clip> {
        let mut sorted: Vec<&Clip> = self.clips.iter().collect();
        sorted.sort_by(|a, b| a.start.total_cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        sorted
    }

    /// End time of the last clip on the track
    pub fn end_time(&self) -> TimeSec {
        self.clips.iter().map(Clip::end).fold(0.0, f64::max)
    }
}

// =============================================================================
// Clip
// =============================================================================

/// Type-specific clip payload
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClipBody {
    Video {
        /// Weak reference to the source asset
        asset_id: AssetId,
        /// Offset into the source asset's own timeline
        trim_start: TimeSec,
        /// Volume percent (0 - 100)
        volume: f64,
        transform: Transform,
    },
    Image {
        asset_id: AssetId,
        transform: Transform,
        /// Progressive 100% -> 110% zoom over the clip's duration
        ken_burns: bool,
    },
    Audio {
        asset_id: AssetId,
        trim_start: TimeSec,
        volume: f64,
    },
    Text {
        content: String,
        style: TextStyle,
        animation: TextAnimation,
        transform: Transform,
    },
    Adjustment {
        effects: Vec<Effect>,
    },
}

impl ClipBody {
    /// The asset this body references, if any
    pub fn asset_id(&self) -> Option<&str> {
        match self {
            ClipBody::Video { asset_id, .. }
            | ClipBody::Image { asset_id, .. }
            | ClipBody::Audio { asset_id, .. } => Some(asset_id),
            _ => None,
        }
    }

    /// Source offset for asset-backed bodies with a source timeline
    pub fn trim_start(&self) -> TimeSec {
        match self {
            ClipBody::Video { trim_start, .. } | ClipBody::Audio { trim_start, .. } => *trim_start,
            _ => 0.0,
        }
    }

    /// Volume percent for audible bodies
    pub fn volume(&self) -> Option<f64> {
        match self {
            ClipBody::Video { volume, .. } | ClipBody::Audio { volume, .. } => Some(*volume),
            _ => None,
        }
    }

    /// Transform for visual bodies
    pub fn transform(&self) -> Option<&Transform> {
        match self {
            ClipBody::Video { transform, .. }
            | ClipBody::Image { transform, .. }
            | ClipBody::Text { transform, .. } => Some(transform),
            _ => None,
        }
    }
}

/// Clip (media segment on the timeline)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    pub id: ClipId,
    pub name: String,
    /// Start time on the timeline (seconds, >= 0)
    pub start: TimeSec,
    /// Duration on the timeline (seconds, > 0)
    pub duration: TimeSec,
    #[serde(flatten)]
    pub body: ClipBody,
}

impl Clip {
    /// Creates a clip with the given payload
    pub fn new(name: &str, start: TimeSec, duration: TimeSec, body: ClipBody) -> Self {
        Self {
            id: new_id(),
            name: name.to_string(),
            start: start.max(0.0),
            duration,
            body,
        }
    }

    /// Builds the clip body for an asset of the given kind
    pub fn body_for_asset(kind: AssetKind, asset_id: &str) -> ClipBody {
        match kind {
            AssetKind::Video => ClipBody::Video {
                asset_id: asset_id.to_string(),
                trim_start: 0.0,
                volume: 100.0,
                transform: Transform::default(),
            },
            AssetKind::Image => ClipBody::Image {
                asset_id: asset_id.to_string(),
                transform: Transform::default(),
                ken_burns: false,
            },
            AssetKind::Audio => ClipBody::Audio {
                asset_id: asset_id.to_string(),
                trim_start: 0.0,
                volume: 100.0,
            },
        }
    }

    /// Creates a text clip
    pub fn text(content: &str, start: TimeSec, duration: TimeSec) -> Self {
        Self::new(
            content,
            start,
            duration,
            ClipBody::Text {
                content: content.to_string(),
                style: TextStyle::default(),
                animation: TextAnimation::default(),
                transform: Transform::default(),
            },
        )
    }

    /// Creates an adjustment clip carrying the given effect stack
    pub fn adjustment(name: &str, start: TimeSec, duration: TimeSec, effects: Vec<Effect>) -> Self {
        Self::new(name, start, duration, ClipBody::Adjustment { effects })
    }

    /// End time on the timeline
    pub fn end(&self) -> TimeSec {
        self.start + self.duration
    }

    /// Checks if the clip's span contains a timeline position (half-open)
    pub fn contains(&self, time: TimeSec) -> bool {
        time >= self.start && time < self.end()
    }

    /// Checks if a timeline position falls strictly inside the clip
    pub fn contains_strictly(&self, time: TimeSec) -> bool {
        time > self.start && time < self.end()
    }

    /// Checks if this clip's span overlaps `[start, end)`
    pub fn overlaps_span(&self, start: TimeSec, end: TimeSec) -> bool {
        self.start < end && self.end() > start
    }

    /// Advances the source offset for bodies with a source timeline
    pub fn advance_trim(&mut self, offset: TimeSec) {
        match &mut self.body {
            ClipBody::Video { trim_start, .. } | ClipBody::Audio { trim_start, .. } => {
                *trim_start += offset;
            }
            _ => {}
        }
    }
}

// =============================================================================
// Clip Patch
// =============================================================================

/// Partial clip update; unset fields keep their current value. Nested
/// transform/style/animation patches merge only their provided sub-fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClipPatch {
    pub name: Option<String>,
    pub start: Option<TimeSec>,
    pub duration: Option<TimeSec>,
    pub trim_start: Option<TimeSec>,
    pub volume: Option<f64>,
    pub content: Option<String>,
    pub ken_burns: Option<bool>,
    pub transform: Option<TransformPatch>,
    pub style: Option<TextStylePatch>,
    pub animation: Option<TextAnimationPatch>,
    pub effects: Option<Vec<Effect>>,
}

impl ClipPatch {
    /// A patch that only moves the clip
    pub fn move_to(start: TimeSec) -> Self {
        Self {
            start: Some(start),
            ..Default::default()
        }
    }

    /// A patch that only resizes the clip
    pub fn resize_to(duration: TimeSec) -> Self {
        Self {
            duration: Some(duration),
            ..Default::default()
        }
    }

    /// True when the patch touches neither start nor duration
    pub fn is_non_positional(&self) -> bool {
        self.start.is_none() && self.duration.is_none()
    }
}

impl Clip {
    /// Returns a copy with the patch merged in.
    ///
    /// Fields that do not exist on this clip's body are ignored. Duration is
    /// floored at the interactive minimum.
    pub fn with_patch(&self, patch: &ClipPatch) -> Clip {
        let mut clip = self.clone();
        if let Some(name) = &patch.name {
            clip.name = name.clone();
        }
        if let Some(start) = patch.start {
            clip.start = start.max(0.0);
        }
        if let Some(duration) = patch.duration {
            clip.duration = duration.max(crate::core::MIN_CLIP_DURATION);
        }

        match &mut clip.body {
            ClipBody::Video {
                trim_start,
                volume,
                transform,
                ..
            } => {
                if let Some(t) = patch.trim_start {
                    *trim_start = t.max(0.0);
                }
                if let Some(v) = patch.volume {
                    *volume = v.clamp(0.0, 100.0);
                }
                if let Some(p) = &patch.transform {
                    *transform = transform.merged(p);
                }
            }
            ClipBody::Image {
                transform,
                ken_burns,
                ..
            } => {
                if let Some(k) = patch.ken_burns {
                    *ken_burns = k;
                }
                if let Some(p) = &patch.transform {
                    *transform = transform.merged(p);
                }
            }
            ClipBody::Audio {
                trim_start, volume, ..
            } => {
                if let Some(t) = patch.trim_start {
                    *trim_start = t.max(0.0);
                }
                if let Some(v) = patch.volume {
                    *volume = v.clamp(0.0, 100.0);
                }
            }
            ClipBody::Text {
                content,
                style,
                animation,
                transform,
            } => {
                if let Some(c) = &patch.content {
                    *content = c.clone();
                }
                if let Some(p) = &patch.style {
                    *style = style.merged(p);
                }
                if let Some(p) = &patch.animation {
                    *animation = animation.merged(p);
                }
                if let Some(p) = &patch.transform {
                    *transform = transform.merged(p);
                }
            }
            ClipBody::Adjustment { effects } => {
                if let Some(e) = &patch.effects {
                    *effects = e.clone();
                }
            }
        }

        clip
    }
}

// =============================================================================
// Group
// =============================================================================

/// A set of clips whose timeline positions move together as one unit.
///
/// Groups bind movement and multi-select only; they impose no positional
/// invariant. A clip belongs to at most one group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub clip_ids: BTreeSet<ClipId>,
}

impl Group {
    /// Creates a group over the given clip ids
    pub fn new(clip_ids: impl IntoIterator<Item = ClipId>) -> Self {
        Self {
            id: new_id(),
            clip_ids: clip_ids.into_iter().collect(),
        }
    }

    /// Returns true when the clip belongs to this group
    pub fn contains(&self, clip_id: &str) -> bool {
        self.clip_ids.contains(clip_id)
    }

    /// Groups under two members dissolve
    pub fn is_viable(&self) -> bool {
        self.clip_ids.len() >= 2
    }
}

// =============================================================================
// Tests
// =============================================================================
