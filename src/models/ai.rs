// AI exchange models - typed forms of what the completion endpoint sends back

use super::DraftTask;
use serde::{Deserialize, Serialize};

/// Enum for chat message roles with compile-time validation.
/// Serializes/deserializes as lowercase strings to match the wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
    System,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::System => "system",
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            "system" => Ok(MessageRole::System),
            _ => Err(format!(
                "Invalid message role: '{}'. Expected 'user', 'assistant', or 'system'",
                s
            )),
        }
    }
}

/// One role-tagged message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub role: MessageRole,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Normalized chat reply.
///
/// The model is asked to answer with `{response, suggestions, tasks}` but is
/// not contractually bound to; absent fields default so a partial payload
/// still normalizes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ChatReply {
    pub response: String,
    pub suggestions: Vec<String>,
    pub tasks: Vec<DraftTask>,
}

/// Normalized document analysis payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DocumentAnalysis {
    pub summary: String,
    pub insights: Vec<String>,
    pub extracted_tasks: Vec<DraftTask>,
    pub key_topics: Vec<String>,
    pub action_items: Vec<String>,
}
