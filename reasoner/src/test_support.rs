//! Test-only generator fakes and reply builders.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::core::types::NextAction;
use crate::io::generator::{GenerationError, Generator};

/// Generator that replays a fixed script and records every prompt it sees.
///
/// Once the script is exhausted every call fails with an invalid response.
pub struct ScriptedGenerator {
    replies: RefCell<VecDeque<Result<String, GenerationError>>>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<Result<String, GenerationError>>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            prompts: RefCell::new(Vec::new()),
        }
    }

    /// Script of successful replies.
    pub fn replying<S: Into<String>>(replies: impl IntoIterator<Item = S>) -> Self {
        Self::new(replies.into_iter().map(|r| Ok(r.into())).collect())
    }

    /// Every prompt passed to [`Generator::generate`], in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.borrow().len()
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.replies
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::InvalidResponse("script exhausted".into())))
    }
}

/// A well-formed step wrapped in a ```` ```json ```` fence.
pub fn step_reply(title: &str, content: &str, next_action: NextAction) -> String {
    format!(
        "```json\n{}\n```",
        raw_step_reply(title, content, next_action)
    )
}

/// A well-formed step as bare JSON.
pub fn raw_step_reply(title: &str, content: &str, next_action: NextAction) -> String {
    serde_json::json!({
        "title": title,
        "content": content,
        "next_action": next_action.as_str(),
    })
    .to_string()
}
