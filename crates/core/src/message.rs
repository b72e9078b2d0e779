use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, TranscriptError};

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single turn in a conversation. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// Load a conversation from a JSON file containing an array of messages.
pub fn load_transcript(path: &Path) -> Result<Vec<ChatMessage>> {
    if !path.exists() {
        return Err(TranscriptError::NotFound(path.to_path_buf()).into());
    }

    let content = std::fs::read_to_string(path)?;
    let messages: Vec<ChatMessage> = serde_json::from_str(&content)
        .map_err(|e| TranscriptError::Invalid { path: path.to_path_buf(), reason: e.to_string() })?;

    if messages.is_empty() {
        return Err(TranscriptError::Empty(path.to_path_buf()).into());
    }

    Ok(messages)
}
