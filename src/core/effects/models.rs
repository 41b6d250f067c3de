//! Effect Model Definitions
//!
//! Adjustment clips carry a fixed seven-slot stack of visual filter
//! effects. Each slot is present in every stack; disabled slots keep their
//! neutral value.

use serde::{Deserialize, Serialize};
use tracing::warn;

// =============================================================================
// Effect Kind
// =============================================================================

/// The seven filter slots of an adjustment clip
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EffectKind {
    Brightness,
    Contrast,
    Saturate,
    Blur,
    Grayscale,
    Sepia,
    Invert,
}

impl EffectKind {
    /// All slots in stack order
    pub const ALL: [EffectKind; 7] = [
        EffectKind::Brightness,
        EffectKind::Contrast,
        EffectKind::Saturate,
        EffectKind::Blur,
        EffectKind::Grayscale,
        EffectKind::Sepia,
        EffectKind::Invert,
    ];

    /// Neutral value for the slot (percent, or pixels for blur)
    pub fn neutral_value(&self) -> f64 {
        match self {
            EffectKind::Brightness | EffectKind::Contrast | EffectKind::Saturate => 100.0,
            EffectKind::Blur | EffectKind::Grayscale | EffectKind::Sepia | EffectKind::Invert => {
                0.0
            }
        }
    }

    /// Blur accumulates across stacked adjustment layers; every other slot
    /// replaces, topmost layer winning.
    pub fn is_stackable(&self) -> bool {
        matches!(self, EffectKind::Blur)
    }

    /// Parses the tool-facing effect name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "brightness" => Some(EffectKind::Brightness),
            "contrast" => Some(EffectKind::Contrast),
            "saturate" => Some(EffectKind::Saturate),
            "blur" => Some(EffectKind::Blur),
            "grayscale" => Some(EffectKind::Grayscale),
            "sepia" => Some(EffectKind::Sepia),
            "invert" => Some(EffectKind::Invert),
            _ => None,
        }
    }

    /// Tool-facing effect name
    pub fn name(&self) -> &'static str {
        match self {
            EffectKind::Brightness => "brightness",
            EffectKind::Contrast => "contrast",
            EffectKind::Saturate => "saturate",
            EffectKind::Blur => "blur",
            EffectKind::Grayscale => "grayscale",
            EffectKind::Sepia => "sepia",
            EffectKind::Invert => "invert",
        }
    }
}

// =============================================================================
// Effect
// =============================================================================

/// One slot of an adjustment clip's effect stack
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    pub kind: EffectKind,
    /// Percent for color slots, pixels for blur
    pub value: f64,
    pub enabled: bool,
}

impl Effect {
    pub fn new(kind: EffectKind, value: f64, enabled: bool) -> Self {
        Self {
            kind,
            value,
            enabled,
        }
    }

    /// Neutral, disabled slot
    pub fn neutral(kind: EffectKind) -> Self {
        Self::new(kind, kind.neutral_value(), false)
    }
}

/// The default seven-slot stack: every slot present, neutral, disabled
pub fn default_effect_stack() -> Vec<Effect> {
    EffectKind::ALL.iter().map(|k| Effect::neutral(*k)).collect()
}

/// Default stack with one named slot enabled and overridden.
///
/// Grayscale additionally enables the saturate slot pinned to zero, since a
/// grayscale layer must also drop saturation in the composited filter.
pub fn effect_stack_with(kind: EffectKind, value: f64) -> Vec<Effect> {
    if !value.is_finite() {
        warn!(effect = kind.name(), value, "non-finite effect value, using neutral");
        return default_effect_stack();
    }
    default_effect_stack()
        .into_iter()
        .map(|mut effect| {
            if effect.kind == kind {
                effect.value = value;
                effect.enabled = true;
            } else if kind == EffectKind::Grayscale && effect.kind == EffectKind::Saturate {
                effect.value = 0.0;
                effect.enabled = true;
            }
            effect
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
