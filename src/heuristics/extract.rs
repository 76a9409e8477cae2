//! Flattening of message content into plain text.

use crate::message::{ContentBlock, Message, MessageContent, Role};

/// Stands in for every image block in extracted text.
pub const IMAGE_MARKER: &str = "[IMAGE]";

/// Join the text of `messages` with newlines.
///
/// String content is taken verbatim, text blocks contribute their text and
/// image blocks contribute [`IMAGE_MARKER`]. Unknown blocks and malformed
/// content are skipped.
pub fn extract_text<'a, I>(messages: I) -> String
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut parts: Vec<&str> = Vec::new();
    for msg in messages {
        match &msg.content {
            MessageContent::Text(text) => parts.push(text),
            MessageContent::Blocks(blocks) => {
                for block in blocks {
                    match block {
                        ContentBlock::Text(text) => parts.push(text),
                        ContentBlock::Image(_) => parts.push(IMAGE_MARKER),
                        ContentBlock::Unknown => {}
                    }
                }
            }
            MessageContent::Other(_) => {}
        }
    }
    parts.join("\n")
}

/// Text of all system messages.
pub fn system_text(messages: &[Message]) -> String {
    extract_text(messages.iter().filter(|m| m.role == Role::System))
}

/// Text of the most recent user message, or an empty string if there is none.
pub fn last_user_text(messages: &[Message]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| extract_text(std::iter::once(m)))
        .unwrap_or_default()
}

/// Rough token estimate: ~4 chars per token for English.
///
/// Counts chars, not bytes, so non-ASCII text is not inflated.
pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count() / 4
}
