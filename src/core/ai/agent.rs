//! Agent Loop
//!
//! Runs one conversation turn against the chat provider: send the prompt,
//! apply any tool calls strictly sequentially (each call reads the state
//! the previous one produced), feed the structured results back, and repeat
//! until the provider answers with text alone. Provider failures never
//! escape as errors; they surface as user-visible apology messages.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::{project::EditorSession, stock::StockMediaProvider};

use super::dispatch::ToolDispatcher;
use super::provider::{ChatMessage, ChatProvider};
use super::tools::{tool_catalog, ToolCall, ToolOutcome};

/// Rounds of tool calls allowed within one conversation turn
const DEFAULT_MAX_TOOL_ROUNDS: usize = 8;

/// Shown when the provider fails for any non-rate-limit reason
const APOLOGY_MESSAGE: &str =
    "Sorry, something went wrong while contacting the assistant. Please try again.";

/// Shown for rate-limit-class failures
const RATE_LIMIT_MESSAGE: &str =
    "The assistant is handling too many requests right now. Please wait a moment and try again.";

// =============================================================================
// Reply
// =============================================================================

/// Record of one dispatched tool call
#[derive(Clone, Debug)]
pub struct ToolTrace {
    pub call: ToolCall,
    pub outcome: ToolOutcome,
}

/// The user-visible result of one conversation turn
#[derive(Clone, Debug)]
pub struct AgentReply {
    /// Assistant text to show the user
    pub message: String,
    /// Every tool call applied during the turn, in order
    pub traces: Vec<ToolTrace>,
}

// =============================================================================
// Agent
// =============================================================================

/// Sequential tool-calling agent over the chat provider boundary
pub struct ChatAgent {
    provider: Arc<dyn ChatProvider>,
    stock: Option<Arc<dyn StockMediaProvider>>,
    max_tool_rounds: usize,
}

impl ChatAgent {
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            stock: None,
            max_tool_rounds: DEFAULT_MAX_TOOL_ROUNDS,
        }
    }

    pub fn with_stock_provider(mut self, provider: Arc<dyn StockMediaProvider>) -> Self {
        self.stock = Some(provider);
        self
    }

    pub fn with_max_tool_rounds(mut self, rounds: usize) -> Self {
        self.max_tool_rounds = rounds.max(1);
        self
    }

    /// Runs one conversation turn, applying tool calls to the session.
    ///
    /// Each tool call is awaited and its structured result appended to the
    /// conversation before the next provider round, so operations within a
    /// turn apply strictly sequentially.
    pub async fn run_turn(&self, session: &mut EditorSession, prompt: &str) -> AgentReply {
        let tools = tool_catalog();
        let mut messages = vec![ChatMessage::user(prompt)];
        let mut traces: Vec<ToolTrace> = Vec::new();
        let mut last_text = String::new();

        for round in 0..self.max_tool_rounds {
            let turn = match self.provider.send_message(&messages, &tools).await {
                Ok(turn) => turn,
                Err(e) if e.is_rate_limit() => {
                    warn!(provider = self.provider.name(), error = %e, "chat request rate-limited");
                    return AgentReply {
                        message: RATE_LIMIT_MESSAGE.to_string(),
                        traces,
                    };
                }
                Err(e) => {
                    warn!(provider = self.provider.name(), error = %e, "chat request failed");
                    return AgentReply {
                        message: APOLOGY_MESSAGE.to_string(),
                        traces,
                    };
                }
            };

            if !turn.text.is_empty() {
                messages.push(ChatMessage::assistant(&turn.text));
                last_text = turn.text.clone();
            }
            if turn.tool_calls.is_empty() {
                return AgentReply {
                    message: last_text,
                    traces,
                };
            }

            debug!(round, calls = turn.tool_calls.len(), "applying tool calls");
            let mut dispatcher = ToolDispatcher::new(session);
            if let Some(stock) = &self.stock {
                dispatcher = dispatcher.with_stock_provider(stock.clone());
            }
            for call in turn.tool_calls {
                let outcome = dispatcher.dispatch(&call).await;
                let serialized = serde_json::to_string(&outcome)
                    .unwrap_or_else(|_| r#"{"success":false}"#.to_string());
                messages.push(ChatMessage::tool_result(&call.id, &serialized));
                traces.push(ToolTrace { call, outcome });
            }
        }

        warn!(rounds = self.max_tool_rounds, "tool-call round limit reached");
        AgentReply {
            message: last_text,
            traces,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
