//! Shared deterministic types for the reasoning pipeline.
//!
//! These types define the contracts between the transcript, the response
//! parser and the agents. They carry no I/O and serialize stably so the run
//! log can record them verbatim.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Speaker of a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// Label used when flattening a transcript into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One role-tagged entry of an agent transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Continuation decision declared by the model at the end of each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    Continue,
    FinalAnswer,
}

impl NextAction {
    pub fn as_str(self) -> &'static str {
        match self {
            NextAction::Continue => "continue",
            NextAction::FinalAnswer => "final_answer",
        }
    }
}

/// A parsed step before the agent assigns it an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDraft {
    pub title: String,
    pub content: String,
    pub next_action: NextAction,
}

/// One accepted reasoning step (1-indexed within its agent).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub index: u32,
    pub title: String,
    pub content: String,
    pub next_action: NextAction,
}

impl Step {
    pub fn from_draft(index: u32, draft: StepDraft) -> Self {
        Self {
            index,
            title: draft.title,
            content: draft.content,
            next_action: draft.next_action,
        }
    }

    pub fn is_final(&self) -> bool {
        self.next_action == NextAction::FinalAnswer
    }
}

/// Static definition of one pipeline role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSpec {
    /// Unique identifier within a pipeline.
    pub name: String,
    /// System prompt that establishes the role.
    pub role_prompt: String,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, role_prompt: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role_prompt: role_prompt.into(),
        }
    }
}

/// Coarse state of an agent's step loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentState {
    AwaitingStep,
    Done,
    Failed,
}

/// Why an agent's step loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum AgentStop {
    /// The last step declared `final_answer`.
    FinalAnswer,
    /// The generator errored or returned nothing.
    GenerationFailed,
    /// The reply did not contain a valid step.
    ParseFailed,
    /// `max_steps` steps were accepted without a final answer.
    StepLimitExceeded { limit: u32 },
}

impl AgentStop {
    /// Terminal state this stop reason maps to.
    pub fn state(self) -> AgentState {
        match self {
            AgentStop::FinalAnswer => AgentState::Done,
            _ => AgentState::Failed,
        }
    }

    pub fn is_done(self) -> bool {
        self.state() == AgentState::Done
    }
}

impl fmt::Display for AgentStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentStop::FinalAnswer => f.write_str("final answer"),
            AgentStop::GenerationFailed => f.write_str("generation failure"),
            AgentStop::ParseFailed => f.write_str("parse failure"),
            AgentStop::StepLimitExceeded { limit } => write!(f, "step limit of {limit} exceeded"),
        }
    }
}

/// Compiled output of one agent, in pipeline order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SolutionRecord {
    pub agent_name: String,
    pub compiled_text: String,
    pub stop: AgentStop,
    pub steps: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_action_uses_wire_names() {
        let json = serde_json::to_string(&NextAction::FinalAnswer).expect("serialize");
        assert_eq!(json, "\"final_answer\"");
        let parsed: NextAction = serde_json::from_str("\"continue\"").expect("parse");
        assert_eq!(parsed, NextAction::Continue);
    }

    #[test]
    fn only_final_answer_maps_to_done() {
        assert!(AgentStop::FinalAnswer.is_done());
        assert_eq!(AgentStop::ParseFailed.state(), AgentState::Failed);
        assert_eq!(AgentStop::GenerationFailed.state(), AgentState::Failed);
        assert_eq!(
            AgentStop::StepLimitExceeded { limit: 3 }.state(),
            AgentState::Failed
        );
    }

    #[test]
    fn stop_reason_serializes_with_tag() {
        let value =
            serde_json::to_value(AgentStop::StepLimitExceeded { limit: 4 }).expect("serialize");
        assert_eq!(value["reason"], "step_limit_exceeded");
        assert_eq!(value["limit"], 4);
    }
}
