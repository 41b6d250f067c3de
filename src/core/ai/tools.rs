//! Editing Tool Catalog
//!
//! The fixed set of named operations the AI collaborator may call, each
//! described by a JSON-schema argument document, plus the call and outcome
//! types exchanged with the dispatcher.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::{ClipId, TimeSec};

// =============================================================================
// Tool Spec
// =============================================================================

/// One entry of the tool catalog
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    /// JSON schema for the argument object
    pub parameters: serde_json::Value,
}

impl ToolSpec {
    fn new(name: &str, description: &str, parameters: serde_json::Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }
}

/// The full catalog published to the chat provider
pub fn tool_catalog() -> Vec<ToolSpec> {
    vec![
        ToolSpec::new(
            "search_stock_media",
            "Search the stock media library for videos, images, or audio.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "Search terms" },
                    "mediaType": {
                        "type": "string",
                        "enum": ["video", "image", "audio"],
                        "description": "Kind of media to search for"
                    }
                },
                "required": ["query", "mediaType"]
            }),
        ),
        ToolSpec::new(
            "add_stock_clip",
            "Add a clip from the latest stock search results to the timeline.",
            json!({
                "type": "object",
                "properties": {
                    "stockId": { "type": "string", "description": "Id from the search results" },
                    "trackId": { "type": "string", "description": "Target track; omit to auto-pick" },
                    "startTime": { "type": "number", "description": "Timeline start in seconds; omit for the playhead" }
                },
                "required": ["stockId"]
            }),
        ),
        ToolSpec::new(
            "add_library_clip",
            "Add a clip from an already-imported library asset to the timeline.",
            json!({
                "type": "object",
                "properties": {
                    "assetId": { "type": "string", "description": "Library asset id" },
                    "trackId": { "type": "string", "description": "Target track; omit to auto-pick" },
                    "startTime": { "type": "number", "description": "Timeline start in seconds; omit for the playhead" },
                    "duration": { "type": "number", "description": "Override duration in seconds" }
                },
                "required": ["assetId"]
            }),
        ),
        ToolSpec::new(
            "add_text_clip",
            "Add a text overlay clip to the timeline.",
            json!({
                "type": "object",
                "properties": {
                    "content": { "type": "string", "description": "Text to display" },
                    "startTime": { "type": "number", "description": "Timeline start in seconds" },
                    "duration": { "type": "number", "description": "Duration in seconds" },
                    "style": {
                        "type": "object",
                        "description": "Partial text style (fontFamily, fontSize, color, bold, italic)"
                    }
                },
                "required": ["content", "startTime", "duration"]
            }),
        ),
        ToolSpec::new(
            "select_clips",
            "Select the given clips on the timeline.",
            json!({
                "type": "object",
                "properties": {
                    "clipIds": {
                        "type": "array",
                        "items": { "type": "string" },
                        "description": "Ids of the clips to select"
                    }
                },
                "required": ["clipIds"]
            }),
        ),
        ToolSpec::new(
            "update_clip_properties",
            "Update properties of a clip. Nested transform/style/animation objects merge only the provided fields.",
            json!({
                "type": "object",
                "properties": {
                    "clipId": { "type": "string" },
                    "name": { "type": "string" },
                    "start": { "type": "number" },
                    "duration": { "type": "number" },
                    "trimStart": { "type": "number" },
                    "volume": { "type": "number", "description": "0 - 100" },
                    "content": { "type": "string" },
                    "kenBurns": { "type": "boolean" },
                    "transform": { "type": "object" },
                    "style": { "type": "object" },
                    "animation": { "type": "object" }
                },
                "required": ["clipId"]
            }),
        ),
        ToolSpec::new(
            "split_at_playhead",
            "Split the clip under the playhead into two.",
            json!({ "type": "object", "properties": {} }),
        ),
        ToolSpec::new(
            "delete_selected",
            "Delete the currently selected clips.",
            json!({ "type": "object", "properties": {} }),
        ),
        ToolSpec::new(
            "apply_visual_effect",
            "Apply a visual effect over a time span via a new adjustment layer.",
            json!({
                "type": "object",
                "properties": {
                    "startTime": { "type": "number", "description": "Layer start in seconds" },
                    "duration": { "type": "number", "description": "Layer duration in seconds" },
                    "effect": {
                        "type": "string",
                        "enum": ["brightness", "contrast", "saturate", "blur", "grayscale", "sepia", "invert"]
                    },
                    "value": { "type": "number", "description": "Percent, or pixels for blur" }
                },
                "required": ["startTime", "duration", "effect", "value"]
            }),
        ),
    ]
}

// =============================================================================
// Tool Call
// =============================================================================

/// One tool invocation requested by the provider
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCall {
    /// Provider-assigned call id, echoed on the result message
    pub id: String,
    pub name: String,
    /// Argument object matching the tool's schema
    pub arguments: serde_json::Value,
}

impl ToolCall {
    pub fn new(id: &str, name: &str, arguments: serde_json::Value) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            arguments,
        }
    }
}

// =============================================================================
// Tool Outcome
// =============================================================================

/// Structured result of a dispatched tool call
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Id of a clip created by the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_clip_id: Option<ClipId>,
    /// Duration of a clip created by the call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_clip_duration: Option<TimeSec>,
    /// Search result summaries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<serde_json::Value>,
}

impl ToolOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Default::default()
        }
    }

    pub fn ok_with_message(message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            success: false,
            message: Some(message.to_string()),
            ..Default::default()
        }
    }

    /// A successful outcome reporting a created clip
    pub fn created(clip_id: &str, duration: TimeSec) -> Self {
        Self {
            success: true,
            new_clip_id: Some(clip_id.to_string()),
            new_clip_duration: Some(duration),
            ..Default::default()
        }
    }

    pub fn with_results(mut self, results: serde_json::Value) -> Self {
        self.results = Some(results);
        self
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_names_are_unique() {
        let catalog = tool_catalog();
        let mut names: Vec<&str> = catalog.iter().map(|t| t.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), catalog.len());
        assert_eq!(catalog.len(), 9);
    }

    #[test]
    fn test_catalog_schemas_are_objects() {
        for spec in tool_catalog() {
            assert_eq!(
                spec.parameters.get("type").and_then(|v| v.as_str()),
                Some("object"),
                "schema of {} must describe an object",
                spec.name
            );
        }
    }

    #[test]
    fn test_outcome_serialization_skips_absent_fields() {
        let outcome = ToolOutcome::created("clip_1", 4.0);
        let value = serde_json::to_value(&outcome).unwrap();

        assert_eq!(value["success"], true);
        assert_eq!(value["newClipId"], "clip_1");
        assert_eq!(value["newClipDuration"], 4.0);
        assert!(value.get("message").is_none());
        assert!(value.get("results").is_none());
    }

    #[test]
    fn test_fail_outcome_carries_message() {
        let outcome = ToolOutcome::fail("no clip at playhead");
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("no clip at playhead"));
    }
}
