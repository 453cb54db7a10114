//! Compiled solution text for an agent's steps.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::types::Step;

static STEP_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^### Step (\d+): (.*)$").unwrap());

/// Concatenate steps as `### Step <index>: <title>` sections.
///
/// Every section ends with a blank line; no steps yields an empty string.
pub fn compile_solution(steps: &[Step]) -> String {
    let mut buf = String::new();
    for step in steps {
        buf.push_str(&format!(
            "### Step {}: {}\n{}\n\n",
            step.index, step.title, step.content
        ));
    }
    buf
}

/// Heading recovered from compiled solution text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepHeading {
    pub index: u32,
    pub title: String,
}

/// Split compiled text on its `### Step` headings, in order.
pub fn step_headings(compiled: &str) -> Vec<StepHeading> {
    STEP_HEADING_RE
        .captures_iter(compiled)
        .filter_map(|caps| {
            let index = caps.get(1)?.as_str().parse().ok()?;
            let title = caps.get(2)?.as_str().to_string();
            Some(StepHeading { index, title })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::NextAction;

    fn step(index: u32, title: &str, content: &str, next_action: NextAction) -> Step {
        Step {
            index,
            title: title.to_string(),
            content: content.to_string(),
            next_action,
        }
    }

    #[test]
    fn single_final_step_compiles_to_one_section() {
        let compiled = compile_solution(&[step(1, "T", "C", NextAction::FinalAnswer)]);
        assert_eq!(compiled, "### Step 1: T\nC\n\n");
    }

    #[test]
    fn no_steps_compile_to_empty_text() {
        assert_eq!(compile_solution(&[]), "");
    }

    #[test]
    fn headings_recover_titles_and_indices() {
        let steps = vec![
            step(1, "Understand the problem", "line one\nline two", NextAction::Continue),
            step(2, "Check edge cases", "none found", NextAction::Continue),
            step(3, "Answer", "42", NextAction::FinalAnswer),
        ];
        let headings = step_headings(&compile_solution(&steps));
        let expected: Vec<StepHeading> = steps
            .iter()
            .map(|s| StepHeading {
                index: s.index,
                title: s.title.clone(),
            })
            .collect();
        assert_eq!(headings, expected);
    }
}
