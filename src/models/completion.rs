use serde::{Deserialize, Serialize};

/// Chat completion request sent to the remote completion endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier, one of the names in [`crate::catalog::SupportedModel`]
    pub model: String,
    /// Messages in the conversation
    pub messages: Vec<ChatMessage>,
    /// Whether to stream responses (always false for product analysis)
    pub stream: bool,
    /// Provider-side prompt caching hint. The provider spells this field `enable_catching`.
    #[serde(rename = "enable_catching")]
    pub caching_enabled: bool,
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: system, user, or assistant
    pub role: String,
    /// Message content (supports both string and multimodal parts)
    pub content: MessageContent,
}

/// Message content - either a plain string or an ordered list of content parts
///
/// Requests always use `Parts`; replies from some providers come back as a plain string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text string format: "Hello"
    Text(String),
    /// Content parts format: [{"type": "text", "text": "Hello"}, {"type": "image_url", ...}]
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Extract all text content from either variant, concatenated in order
    pub fn extract_text(&self) -> String {
        match self {
            MessageContent::Text(s) => s.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join(""),
        }
    }
}

/// Content part for multimodal messages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Text content part
    Text { text: String },
    /// Image reference, usually a base64 data URL
    ImageUrl { image_url: ImageUrl },
}

/// Image reference inside a content part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Image detail level (low, high, auto)
    pub detail: String,
    /// `data:` URL carrying the encoded image
    pub url: String,
}

/// Chat completion response envelope (non-streaming)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// Unique identifier
    pub id: String,
    /// Object type (usually "chat.completion")
    #[serde(default)]
    pub object: String,
    /// Creation timestamp (unix seconds)
    #[serde(default)]
    pub created: u64,
    /// Model used
    pub model: String,
    /// Completion choices
    pub choices: Vec<Choice>,
    /// Token usage information
    #[serde(default)]
    pub usage: Usage,
}

impl CompletionResponse {
    /// Text of the first choice, or `None` when the provider returned no choices
    pub fn reply_text(&self) -> Option<String> {
        self.choices
            .first()
            .map(|choice| choice.message.content.extract_text())
    }
}

/// Chat completion choice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// Choice index
    #[serde(default)]
    pub index: u32,
    /// Generated message
    pub message: ChatMessage,
    /// Finish reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    /// Input/prompt tokens
    pub prompt_tokens: u64,
    /// Output/completion tokens
    pub completion_tokens: u64,
    /// Total tokens
    pub total_tokens: u64,
    /// Tokens served from the provider's prompt cache
    pub cache_read_input_tokens: u64,
    /// Tokens written to the provider's prompt cache
    pub cache_write_input_tokens: u64,
}
