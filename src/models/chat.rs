use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One turn of the client-held follow-up conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// What the follow-up chat is about: the evaluated idea and the next step
/// the user picked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatContext {
    pub idea_name: Option<String>,
    pub description: Option<String>,
    pub target_market: Option<String>,
    pub step: Option<String>,
}

impl ChatContext {
    /// Reads each key on its own; a missing or non-string value only
    /// clears that field.
    pub fn from_json(value: Option<&Value>) -> Self {
        let field = |key: &str| {
            value
                .and_then(|v| v.get(key))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        Self {
            idea_name: field("ideaName"),
            description: field("description"),
            target_market: field("targetMarket"),
            step: field("step"),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub role: ChatRole,
    pub content: String,
}

impl ChatReply {
    pub fn assistant(content: String) -> Self {
        Self {
            role: ChatRole::Assistant,
            content,
        }
    }
}
