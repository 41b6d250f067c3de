//! Visual Effects Module
//!
//! The adjustment-layer effect stack and the composite filter-string
//! builder applied above all visual layers during preview.

pub mod filter;
pub mod models;

pub use filter::composite_filter;
pub use models::{default_effect_stack, effect_stack_with, Effect, EffectKind};
