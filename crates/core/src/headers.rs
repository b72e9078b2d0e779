//! Builds the navigation tree from a linear message sequence.
//!
//! User turns become level-1 headers; each assistant reply attaches as a
//! level-2 child of the nearest preceding user turn. An assistant message
//! with no preceding user turn contributes no header.

use crate::message::{ChatMessage, Role};

/// Maximum visible title length, prefix and ellipsis included.
const MAX_TITLE_LENGTH: usize = 50;

/// One entry in the navigation tree.
///
/// `position` is the source index of the originating message: monotonically
/// increasing, never reused, and the ordering authority for the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavHeader {
    pub id: String,
    pub title: String,
    pub anchor: String,
    pub level: u8,
    pub position: usize,
    pub children: Vec<NavHeader>,
}

/// Build the header tree for a conversation.
///
/// Stable for stable input, no side effects, safe to call repeatedly.
pub fn generate_headers(messages: &[ChatMessage]) -> Vec<NavHeader> {
    let mut headers: Vec<NavHeader> = Vec::new();

    for (index, message) in messages.iter().enumerate() {
        match message.role {
            Role::User => {
                headers.push(NavHeader {
                    id: format!("message-{}", index),
                    title: derive_title(&message.content, "Q: "),
                    anchor: format!("message-{}", index),
                    level: 1,
                    position: index,
                    children: Vec::new(),
                });
            }
            Role::Assistant => {
                // The nearest preceding level-1 header is always the last
                // top-level entry; an orphan assistant message is skipped.
                if let Some(parent) = headers.last_mut() {
                    parent.children.push(NavHeader {
                        id: format!("message-{}", index),
                        title: derive_title(&message.content, "A: "),
                        anchor: format!("message-{}", index),
                        level: 2,
                        position: index,
                        children: Vec::new(),
                    });
                }
            }
        }
    }

    headers
}

/// Derive a short title from message content.
///
/// Tries the first line, then the first sentence, then truncates with an
/// ellipsis. Total length never exceeds `MAX_TITLE_LENGTH` plus the prefix.
pub fn derive_title(content: &str, prefix: &str) -> String {
    let first_line = content.split('\n').next().unwrap_or("").trim();
    if first_line.chars().count() <= MAX_TITLE_LENGTH {
        return format!("{}{}", prefix, first_line);
    }

    let first_sentence = content.split('.').next().unwrap_or("").trim();
    if first_sentence.chars().count() <= MAX_TITLE_LENGTH {
        return format!("{}{}", prefix, first_sentence);
    }

    let keep = MAX_TITLE_LENGTH - 3 - prefix.chars().count();
    let truncated: String = first_sentence.chars().take(keep).collect();
    format!("{}{}...", prefix, truncated)
}
