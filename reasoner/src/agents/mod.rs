//! Reasoning agents and the fixed role roster.

use serde::Serialize;

use crate::core::types::{AgentStop, Step};

pub mod reasoning;
pub mod roster;

/// Observable progress of an agent run.
///
/// Emitted to the caller's sink in the order things happen; the run log
/// serializes each event as one JSON line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AgentEvent<'a> {
    Started {
        agent: &'a str,
        has_previous: bool,
    },
    /// Raw generator reply, before parsing.
    Response {
        agent: &'a str,
        attempt: u32,
        raw: &'a str,
    },
    /// The generator failed or its reply could not be turned into a step.
    Failed {
        agent: &'a str,
        attempt: u32,
        error: String,
    },
    Step {
        agent: &'a str,
        step: &'a Step,
    },
    Stopped {
        agent: &'a str,
        stop: AgentStop,
        steps: u32,
        compiled: &'a str,
    },
}
