//! Prompt texts compiled into the binary and the handoff message template.

use std::sync::LazyLock;

use anyhow::Result;
use minijinja::{Environment, context};

const HANDOFF_TEMPLATE: &str = include_str!("prompts/handoff.md");

pub const INITIAL_SOLVER_ROLE: &str = include_str!("prompts/roles/initial_solver.md");
pub const CRITICAL_REVIEWER_ROLE: &str = include_str!("prompts/roles/critical_reviewer.md");
pub const DOMAIN_EXPERT_ROLE: &str = include_str!("prompts/roles/domain_expert.md");
pub const FINAL_POLISHER_ROLE: &str = include_str!("prompts/roles/final_polisher.md");

/// Assistant turn that opens every agent transcript.
pub const ACKNOWLEDGMENT: &str = "Understood. I will begin my reasoning steps now.";

/// Stands in for a previous solution that compiled to no text.
pub const EMPTY_PREVIOUS_SOLUTION: &str =
    "(The previous agent stopped without producing any reasoning steps.)";

static ENGINE: LazyLock<PromptEngine> = LazyLock::new(PromptEngine::new);

/// Template engine wrapper around minijinja.
struct PromptEngine {
    env: Environment<'static>,
}

impl PromptEngine {
    fn new() -> Self {
        let mut env = Environment::new();
        env.add_template("handoff", HANDOFF_TEMPLATE)
            .expect("handoff template should be valid");
        Self { env }
    }

    fn render_handoff(&self, problem: &str, previous: Option<&str>) -> Result<String> {
        let previous = previous.map(|text| match text.trim() {
            "" => EMPTY_PREVIOUS_SOLUTION,
            trimmed => trimmed,
        });
        let template = self.env.get_template("handoff")?;
        let rendered = template.render(context! {
            problem => problem.trim(),
            previous => previous,
        })?;
        Ok(rendered)
    }
}

/// Render the user message that hands the problem (and the previous agent's
/// solution, when there is one) to an agent.
///
/// A previous solution that is present but empty is rendered as an explicit
/// notice rather than dropped.
pub fn render_handoff(problem: &str, previous: Option<&str>) -> Result<String> {
    ENGINE.render_handoff(problem, previous)
}
