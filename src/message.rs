//! Conversation types accepted by the scorer.
//!
//! Content follows the OpenAI chat shape: either a plain string or a list of
//! typed parts. Parsing is permissive: block types we do not understand and
//! malformed content are kept as explicit `Unknown` / `Other` variants that
//! contribute no text, so a strange request never fails scoring.

use serde::{Deserialize, Serialize};

use crate::error::HeuristicError;

/// Role in a conversation.
///
/// Roles outside the known set are carried through as [`Role::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.as_str() {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "tool" => Self::Tool,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One typed part of a multi-part message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum ContentBlock {
    /// `{"type": "text", "text": "..."}`
    Text(String),
    /// `{"type": "image_url", ...}` or `{"type": "image", ...}`. The payload
    /// is kept as-is and never inspected.
    Image(serde_json::Value),
    /// Any other part, including entries that are not JSON objects.
    Unknown,
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::Image(serde_json::json!({ "url": url.into() }))
    }
}

impl From<serde_json::Value> for ContentBlock {
    fn from(value: serde_json::Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::Unknown;
        };
        match obj.get("type").and_then(|t| t.as_str()) {
            Some("text") => Self::Text(
                obj.get("text")
                    .and_then(|t| t.as_str())
                    .unwrap_or_default()
                    .to_string(),
            ),
            Some(kind @ ("image_url" | "image")) => {
                Self::Image(obj.get(kind).cloned().unwrap_or(serde_json::Value::Null))
            }
            _ => Self::Unknown,
        }
    }
}

/// Message content: a plain string or a sequence of typed blocks.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Blocks(Vec<ContentBlock>),
    /// Content of an unrecognized shape (null, number, bare object).
    Other(serde_json::Value),
}

impl Default for MessageContent {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl From<String> for MessageContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<&str> for MessageContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<Vec<ContentBlock>> for MessageContent {
    fn from(blocks: Vec<ContentBlock>) -> Self {
        Self::Blocks(blocks)
    }
}

/// A message in a conversation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub role: Role,
    #[serde(default)]
    pub content: MessageContent,
}

impl Message {
    pub fn new(role: impl Into<Role>, content: impl Into<MessageContent>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<MessageContent>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A tool made available to the model. Only the number of declarations
/// matters for scoring, so the schema is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolDeclaration(pub serde_json::Value);

impl ToolDeclaration {
    /// Declaration for a function tool with the given name and no parameters.
    pub fn function(name: impl Into<String>) -> Self {
        Self(serde_json::json!({
            "type": "function",
            "function": { "name": name.into() },
        }))
    }
}

/// The part of a chat completion request the scorer looks at.
///
/// Other request keys (`model`, `temperature`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScoreRequest {
    pub messages: Vec<Message>,
    #[serde(default)]
    pub tools: Option<Vec<ToolDeclaration>>,
}

impl ScoreRequest {
    /// Parse a JSON request body.
    ///
    /// The envelope is checked strictly (`messages` must be an array of
    /// objects with a string `role`); message content is parsed permissively.
    pub fn from_json(body: &str) -> Result<Self, HeuristicError> {
        let value: serde_json::Value = serde_json::from_str(body)?;
        Self::from_value(value)
    }

    /// Parse an already-decoded JSON request body. See [`Self::from_json`].
    pub fn from_value(value: serde_json::Value) -> Result<Self, HeuristicError> {
        let Some(obj) = value.as_object() else {
            return Err(HeuristicError::InvalidInput(
                "request body must be a JSON object".to_string(),
            ));
        };
        match obj.get("messages") {
            Some(serde_json::Value::Array(messages)) => {
                for (i, msg) in messages.iter().enumerate() {
                    if !msg.is_object() {
                        return Err(HeuristicError::InvalidInput(format!(
                            "messages[{i}] must be an object"
                        )));
                    }
                    if !msg.get("role").is_some_and(|r| r.is_string()) {
                        return Err(HeuristicError::InvalidInput(format!(
                            "messages[{i}].role must be a string"
                        )));
                    }
                }
            }
            Some(_) => {
                return Err(HeuristicError::InvalidInput(
                    "`messages` must be an array".to_string(),
                ));
            }
            None => {
                return Err(HeuristicError::InvalidInput(
                    "missing `messages`".to_string(),
                ));
            }
        }
        if let Some(tools) = obj.get("tools")
            && !(tools.is_array() || tools.is_null())
        {
            return Err(HeuristicError::InvalidInput(
                "`tools` must be an array".to_string(),
            ));
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Tool declarations as a slice, `None` when absent.
    pub fn tools(&self) -> Option<&[ToolDeclaration]> {
        self.tools.as_deref()
    }
}
