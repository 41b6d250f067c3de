//! Tool Dispatch Layer
//!
//! Routes tool calls from the AI collaborator into session operations and
//! reports structured outcomes. Unmet preconditions come back as
//! `{success: false, message}`; the dispatcher never panics and never
//! leaves the session in a partial state.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::core::{
    assets::AssetKind,
    effects::{effect_stack_with, EffectKind},
    project::EditorSession,
    stock::StockMediaProvider,
    timeline::{ClipPatch, TextStylePatch},
    ClipId, TimeSec,
};

use super::tools::{ToolCall, ToolOutcome};

// =============================================================================
// Argument Types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchStockArgs {
    query: String,
    media_type: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddStockClipArgs {
    stock_id: String,
    track_id: Option<String>,
    start_time: Option<TimeSec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddLibraryClipArgs {
    asset_id: String,
    track_id: Option<String>,
    start_time: Option<TimeSec>,
    duration: Option<TimeSec>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddTextClipArgs {
    content: String,
    start_time: TimeSec,
    duration: TimeSec,
    style: Option<TextStylePatch>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SelectClipsArgs {
    clip_ids: Vec<ClipId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateClipArgs {
    clip_id: ClipId,
    #[serde(flatten)]
    patch: ClipPatch,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplyEffectArgs {
    start_time: TimeSec,
    duration: TimeSec,
    effect: String,
    value: f64,
}

fn parse_args<T: DeserializeOwned>(call: &ToolCall) -> Result<T, ToolOutcome> {
    serde_json::from_value(call.arguments.clone()).map_err(|e| {
        ToolOutcome::fail(&format!("Invalid arguments for {}: {}", call.name, e))
    })
}

fn parse_media_kind(name: &str) -> Result<AssetKind, ToolOutcome> {
    match name {
        "video" => Ok(AssetKind::Video),
        "image" => Ok(AssetKind::Image),
        "audio" => Ok(AssetKind::Audio),
        other => Err(ToolOutcome::fail(&format!(
            "Unknown media type '{}'; expected video, image, or audio",
            other
        ))),
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Translates tool calls into session operations
pub struct ToolDispatcher<'a> {
    session: &'a mut EditorSession,
    stock: Option<Arc<dyn StockMediaProvider>>,
}

impl<'a> ToolDispatcher<'a> {
    pub fn new(session: &'a mut EditorSession) -> Self {
        Self {
            session,
            stock: None,
        }
    }

    pub fn with_stock_provider(mut self, provider: Arc<dyn StockMediaProvider>) -> Self {
        self.stock = Some(provider);
        self
    }

    /// Dispatches one tool call, returning its structured outcome.
    ///
    /// Only `search_stock_media` awaits an external collaborator; every
    /// other tool is a synchronous state transition.
    pub async fn dispatch(&mut self, call: &ToolCall) -> ToolOutcome {
        debug!(tool = %call.name, "dispatching tool call");
        match call.name.as_str() {
            "search_stock_media" => self.search_stock_media(call).await,
            "add_stock_clip" => self.add_stock_clip(call),
            "add_library_clip" => self.add_library_clip(call),
            "add_text_clip" => self.add_text_clip(call),
            "select_clips" => self.select_clips(call),
            "update_clip_properties" => self.update_clip_properties(call),
            "split_at_playhead" => self.split_at_playhead(),
            "delete_selected" => self.delete_selected(),
            "apply_visual_effect" => self.apply_visual_effect(call),
            other => ToolOutcome::fail(&format!("Unknown tool: {}", other)),
        }
    }

    // =========================================================================
    // Stock Media
    // =========================================================================

    async fn search_stock_media(&mut self, call: &ToolCall) -> ToolOutcome {
        let args: SearchStockArgs = match parse_args(call) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let kind = match parse_media_kind(&args.media_type) {
            Ok(kind) => kind,
            Err(outcome) => return outcome,
        };
        let Some(provider) = &self.stock else {
            return ToolOutcome::fail("No stock media provider is configured");
        };

        let results = match provider.search(&args.query, kind).await {
            Ok(results) => results,
            Err(e) => return ToolOutcome::fail(&format!("Stock search failed: {}", e)),
        };

        let summaries: Vec<serde_json::Value> = results
            .iter()
            .map(|r| {
                json!({
                    "id": r.id,
                    "name": r.name,
                    "kind": r.kind,
                    "durationSec": r.duration_sec,
                })
            })
            .collect();
        let count = results.len();
        self.session.cache_stock_results(results);

        ToolOutcome::ok_with_message(&format!("Found {} result(s)", count))
            .with_results(json!(summaries))
    }

    fn add_stock_clip(&mut self, call: &ToolCall) -> ToolOutcome {
        let args: AddStockClipArgs = match parse_args(call) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let Some(result) = self.session.find_stock_result(&args.stock_id).cloned() else {
            return ToolOutcome::fail(&format!(
                "Unknown stock id '{}'; run search_stock_media first",
                args.stock_id
            ));
        };

        // The placeholder downloads in the background; the clip is placed
        // immediately and the preview picks the media up once resolved.
        let asset_id = self.session.import_asset(result.to_placeholder());
        let start = args
            .start_time
            .unwrap_or_else(|| self.session.transport().current_time());

        match self
            .session
            .add_clip(args.track_id.as_deref(), &asset_id, start, None)
        {
            Some(added) => ToolOutcome::created(&added.clip_id, added.duration),
            None => {
                self.session.delete_asset(&asset_id);
                ToolOutcome::fail("Could not place the stock clip on that track")
            }
        }
    }

    // =========================================================================
    // Library / Text Clips
    // =========================================================================

    fn add_library_clip(&mut self, call: &ToolCall) -> ToolOutcome {
        let args: AddLibraryClipArgs = match parse_args(call) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        if self.session.library().get(&args.asset_id).is_none() {
            return ToolOutcome::fail(&format!("Unknown asset id '{}'", args.asset_id));
        }
        let start = args
            .start_time
            .unwrap_or_else(|| self.session.transport().current_time());

        match self
            .session
            .add_clip(args.track_id.as_deref(), &args.asset_id, start, args.duration)
        {
            Some(added) => ToolOutcome::created(&added.clip_id, added.duration),
            None => ToolOutcome::fail("Could not place the clip on that track"),
        }
    }

    fn add_text_clip(&mut self, call: &ToolCall) -> ToolOutcome {
        let args: AddTextClipArgs = match parse_args(call) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let Some(added) = self
            .session
            .add_text_clip(&args.content, args.start_time, args.duration)
        else {
            return ToolOutcome::fail("Text clips need a positive duration");
        };

        if let Some(style) = args.style {
            let patch = ClipPatch {
                style: Some(style),
                ..Default::default()
            };
            self.session
                .update_clip(&added.track_id, &added.clip_id, &patch);
        }
        ToolOutcome::created(&added.clip_id, added.duration)
    }

    // =========================================================================
    // Selection / Properties
    // =========================================================================

    fn select_clips(&mut self, call: &ToolCall) -> ToolOutcome {
        let args: SelectClipsArgs = match parse_args(call) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        if args.clip_ids.is_empty() {
            return ToolOutcome::fail("No clip ids given");
        }

        let unknown: Vec<&str> = args
            .clip_ids
            .iter()
            .filter(|id| !self.session.state().has_clip(id))
            .map(String::as_str)
            .collect();
        if !unknown.is_empty() {
            return ToolOutcome::fail(&format!("Unknown clip ids: {}", unknown.join(", ")));
        }

        self.session.select_many(&args.clip_ids);
        let count = self.session.state().selected_clip_ids.len();
        ToolOutcome::ok_with_message(&format!("Selected {} clip(s)", count))
    }

    fn update_clip_properties(&mut self, call: &ToolCall) -> ToolOutcome {
        let args: UpdateClipArgs = match parse_args(call) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let Some(track_id) = self
            .session
            .state()
            .find_clip(&args.clip_id)
            .map(|(t, _)| t.id.clone())
        else {
            return ToolOutcome::fail(&format!("Unknown clip id '{}'", args.clip_id));
        };

        if self.session.update_clip(&track_id, &args.clip_id, &args.patch) {
            ToolOutcome::ok()
        } else {
            ToolOutcome::ok_with_message("No properties changed")
        }
    }

    // =========================================================================
    // Playhead Operations
    // =========================================================================

    fn split_at_playhead(&mut self) -> ToolOutcome {
        if self.session.split_at_playhead() {
            ToolOutcome::ok()
        } else {
            ToolOutcome::fail("No clip under the playhead to split")
        }
    }

    fn delete_selected(&mut self) -> ToolOutcome {
        match self.session.delete_selected() {
            0 => ToolOutcome::fail("No clips are selected"),
            count => ToolOutcome::ok_with_message(&format!("Deleted {} clip(s)", count)),
        }
    }

    // =========================================================================
    // Effects
    // =========================================================================

    fn apply_visual_effect(&mut self, call: &ToolCall) -> ToolOutcome {
        let args: ApplyEffectArgs = match parse_args(call) {
            Ok(args) => args,
            Err(outcome) => return outcome,
        };
        let Some(kind) = EffectKind::parse(&args.effect) else {
            let known: Vec<&str> = EffectKind::ALL.iter().map(|k| k.name()).collect();
            return ToolOutcome::fail(&format!(
                "Unknown effect '{}'; expected one of {}",
                args.effect,
                known.join(", ")
            ));
        };
        if !args.value.is_finite() {
            return ToolOutcome::fail("Effect value must be a finite number");
        }

        let effects = effect_stack_with(kind, args.value);
        let name = format!("{} effect", kind.name());
        match self
            .session
            .add_adjustment_clip(&name, args.start_time, args.duration, effects)
        {
            Some(added) => ToolOutcome::created(&added.clip_id, added.duration),
            None => ToolOutcome::fail("Effect layers need a positive duration"),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
