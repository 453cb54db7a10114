//! Extraction of a structured step from free-form model output.
//!
//! Replies are located in two ordered attempts: a ```` ```json ```` fenced
//! block anywhere in the text, otherwise the whole text. The located JSON is
//! checked against `schemas/step.schema.json` before it becomes a
//! [`StepDraft`]. A fenced block that fails to parse is not retried as raw
//! text.

use std::sync::LazyLock;

use jsonschema::{Draft, Validator};
use regex::Regex;
use serde_json::Value;

use crate::core::types::StepDraft;

const STEP_SCHEMA: &str = include_str!("../../schemas/step.schema.json");

static FENCED_JSON_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)```json\s*(\{[\s\S]*?\})\s*```").unwrap());

static STEP_VALIDATOR: LazyLock<Validator> = LazyLock::new(|| {
    let schema: Value = serde_json::from_str(STEP_SCHEMA).expect("step schema should be json");
    jsonschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .expect("step schema should compile")
});

/// Why a reply could not be turned into a step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("fenced json block is not valid JSON: {0}")]
    InvalidFencedJson(String),
    #[error("reply is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("reply violates the step contract: {}", .0.join("; "))]
    Contract(Vec<String>),
}

/// Where the step JSON was found in a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonSource<'a> {
    Fenced(&'a str),
    Whole(&'a str),
}

fn locate_json(raw: &str) -> JsonSource<'_> {
    match FENCED_JSON_RE.captures(raw).and_then(|caps| caps.get(1)) {
        Some(block) => JsonSource::Fenced(block.as_str()),
        None => JsonSource::Whole(raw.trim()),
    }
}

/// Parse a raw reply into a step draft.
///
/// Total: every input yields either a validated draft or a [`ParseError`].
pub fn parse_step(raw: &str) -> Result<StepDraft, ParseError> {
    let value: Value = match locate_json(raw) {
        JsonSource::Fenced(block) => serde_json::from_str(block)
            .map_err(|err| ParseError::InvalidFencedJson(err.to_string()))?,
        JsonSource::Whole(text) => {
            serde_json::from_str(text).map_err(|err| ParseError::InvalidJson(err.to_string()))?
        }
    };

    let violations: Vec<String> = STEP_VALIDATOR
        .iter_errors(&value)
        .map(|err| err.to_string())
        .collect();
    if !violations.is_empty() {
        return Err(ParseError::Contract(violations));
    }

    serde_json::from_value(value).map_err(|err| ParseError::Contract(vec![err.to_string()]))
}
