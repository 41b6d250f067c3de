//! Composite Filter Builder
//!
//! Folds the effect stacks of every active adjustment layer into a single
//! filter string applied above all visual layers. Layers are given in track
//! order, topmost first.

use super::models::{Effect, EffectKind};

/// Builds the composite filter string for the given adjustment layers.
///
/// Stackable slots (blur) sum across layers; replacing slots take the
/// topmost enabled layer's value. An enabled grayscale forces saturation to
/// zero regardless of any saturate slot below it. Returns an empty string
/// when nothing is enabled.
pub fn composite_filter(layers: &[&[Effect]]) -> String {
    let mut parts: Vec<String> = Vec::new();
    let mut grayscale_active = false;

    for kind in EffectKind::ALL {
        let value = if kind.is_stackable() {
            let sum: f64 = layers
                .iter()
                .flat_map(|stack| stack.iter())
                .filter(|e| e.kind == kind && e.enabled)
                .map(|e| e.value)
                .sum();
            if sum == 0.0 {
                continue;
            }
            sum
        } else {
            // Topmost enabled layer wins for replacing slots.
            let Some(effect) = layers
                .iter()
                .flat_map(|stack| stack.iter())
                .find(|e| e.kind == kind && e.enabled)
            else {
                continue;
            };
            effect.value
        };

        if kind == EffectKind::Grayscale && value > 0.0 {
            grayscale_active = true;
        }

        parts.push(render_slot(kind, value));
    }

    if grayscale_active {
        // Derived rule: grayscale zeroes saturation even when a saturate
        // slot carried another value.
        for part in parts.iter_mut() {
            if part.starts_with("saturate(") {
                *part = render_slot(EffectKind::Saturate, 0.0);
            }
        }
        if !parts.iter().any(|p| p.starts_with("saturate(")) {
            parts.push(render_slot(EffectKind::Saturate, 0.0));
        }
    }

    parts.join(" ")
}

fn render_slot(kind: EffectKind, value: f64) -> String {
    match kind {
        EffectKind::Blur => format!("blur({}px)", trim_float(value)),
        _ => format!("{}({}%)", kind.name(), trim_float(value)),
    }
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::models::effect_stack_with;

    #[test]
    fn test_empty_layers_yield_empty_filter() {
        assert_eq!(composite_filter(&[]), "");

        let neutral = crate::core::effects::default_effect_stack();
        assert_eq!(composite_filter(&[neutral.as_slice()]), "");
    }

    #[test]
    fn test_single_layer_single_effect() {
        let stack = effect_stack_with(EffectKind::Brightness, 120.0);
        assert_eq!(composite_filter(&[stack.as_slice()]), "brightness(120%)");
    }

    #[test]
    fn test_blur_sums_across_layers() {
        let top = effect_stack_with(EffectKind::Blur, 2.0);
        let bottom = effect_stack_with(EffectKind::Blur, 3.5);

        assert_eq!(
            composite_filter(&[top.as_slice(), bottom.as_slice()]),
            "blur(5.5px)"
        );
    }

    #[test]
    fn test_replacing_effect_topmost_wins() {
        let top = effect_stack_with(EffectKind::Contrast, 150.0);
        let bottom = effect_stack_with(EffectKind::Contrast, 50.0);

        assert_eq!(
            composite_filter(&[top.as_slice(), bottom.as_slice()]),
            "contrast(150%)"
        );
    }

    #[test]
    fn test_grayscale_forces_zero_saturation() {
        // A lower layer raises saturation, an upper layer goes grayscale.
        let top = effect_stack_with(EffectKind::Grayscale, 100.0);
        let bottom = effect_stack_with(EffectKind::Saturate, 180.0);

        let filter = composite_filter(&[top.as_slice(), bottom.as_slice()]);
        assert!(filter.contains("grayscale(100%)"));
        assert!(filter.contains("saturate(0%)"));
        assert!(!filter.contains("saturate(180%)"));
    }

    #[test]
    fn test_mixed_stack_ordering() {
        let top = effect_stack_with(EffectKind::Blur, 1.0);
        let bottom = effect_stack_with(EffectKind::Sepia, 40.0);

        // Slots render in stack order regardless of layer order.
        assert_eq!(
            composite_filter(&[top.as_slice(), bottom.as_slice()]),
            "blur(1px) sepia(40%)"
        );
    }
}
