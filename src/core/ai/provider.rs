//! Chat Provider Boundary
//!
//! Defines the trait and message types for the conversational AI
//! collaborator. The provider is a black box that turns a conversation and
//! a tool catalog into streamed text plus tool calls; the engine only sees
//! the finished turn.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::CoreResult;

use super::tools::{ToolCall, ToolSpec};

// =============================================================================
// Chat Message
// =============================================================================

/// A single message in a conversation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Role: user, assistant, or tool
    pub role: String,
    /// Message content; tool messages carry the serialized tool outcome
    pub content: String,
    /// For tool messages, the id of the call being answered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
            tool_call_id: None,
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.to_string(),
            tool_call_id: None,
        }
    }

    /// Structured result of a tool call, fed back to the provider
    pub fn tool_result(call_id: &str, content: &str) -> Self {
        Self {
            role: "tool".to_string(),
            content: content.to_string(),
            tool_call_id: Some(call_id.to_string()),
        }
    }
}

// =============================================================================
// Chat Turn
// =============================================================================

/// One completed provider turn: assistant text plus any tool calls
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    /// Assistant-visible text for this turn
    pub text: String,
    /// Tool calls to apply, in order
    pub tool_calls: Vec<ToolCall>,
}

impl ChatTurn {
    /// A text-only turn with no tool calls
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tool_calls: Vec::new(),
        }
    }

    /// A turn consisting of tool calls
    pub fn with_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            text: String::new(),
            tool_calls,
        }
    }
}

// =============================================================================
// Provider Trait
// =============================================================================

/// Boundary trait for conversational AI providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the provider name
    fn name(&self) -> &str;

    /// Sends the conversation so far, with the editing tool catalog, and
    /// returns the provider's next turn
    async fn send_message(
        &self,
        messages: &[ChatMessage],
        tools: &[ToolSpec],
    ) -> CoreResult<ChatTurn>;
}
