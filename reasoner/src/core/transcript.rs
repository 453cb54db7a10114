//! Append-only agent transcript and its flattened prompt rendering.

use crate::core::types::{Message, Role};

/// Role-tagged message history owned by a single agent run.
///
/// Always starts with exactly one system message. Messages can only be
/// appended, never removed or reordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![Message {
                role: Role::System,
                content: system_prompt.into(),
            }],
        }
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content.into());
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content.into());
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn render(&self) -> String {
        render_transcript(&self.messages)
    }

    fn push(&mut self, role: Role, content: String) {
        self.messages.push(Message { role, content });
    }
}

/// Flatten messages into a single prompt.
///
/// Each message becomes `"<Label>: <content>"` followed by a blank line.
/// An empty slice renders as an empty string.
pub fn render_transcript(messages: &[Message]) -> String {
    let mut buf = String::new();
    for message in messages {
        buf.push_str(message.role.label());
        buf.push_str(": ");
        buf.push_str(&message.content);
        buf.push_str("\n\n");
    }
    buf
}
