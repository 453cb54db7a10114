//! Step loop for a single role-specialized agent.
//!
//! Each iteration renders the transcript, makes one generation call, parses
//! the reply into a [`Step`] and appends the raw reply to the transcript as
//! an assistant turn. The loop ends on `final_answer`, on the first generation
//! or parse failure, or when the optional step limit is reached.

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::agents::AgentEvent;
use crate::core::compile::compile_solution;
use crate::core::parser::parse_step;
use crate::core::transcript::Transcript;
use crate::core::types::{AgentSpec, AgentState, AgentStop, SolutionRecord, Step};
use crate::io::generator::{GenerationError, Generator};
use crate::io::prompt::{ACKNOWLEDGMENT, render_handoff};

/// Per-agent loop settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentSettings {
    /// Stop after this many accepted steps without a final answer.
    pub max_steps: Option<u32>,
}

/// Result of one agent invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRun {
    pub steps: Vec<Step>,
    pub stop: AgentStop,
    /// Compiled steps; empty when no step was accepted.
    pub compiled: String,
}

impl AgentRun {
    pub fn state(&self) -> AgentState {
        self.stop.state()
    }

    pub fn into_record(self, agent_name: &str) -> SolutionRecord {
        SolutionRecord {
            agent_name: agent_name.to_string(),
            steps: self.steps.len() as u32,
            compiled_text: self.compiled,
            stop: self.stop,
        }
    }
}

/// One pipeline role bound to its loop settings.
#[derive(Debug, Clone)]
pub struct ReasoningAgent {
    spec: AgentSpec,
    settings: AgentSettings,
}

impl ReasoningAgent {
    pub fn new(spec: AgentSpec, settings: AgentSettings) -> Self {
        Self { spec, settings }
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn spec(&self) -> &AgentSpec {
        &self.spec
    }

    /// Run the step loop for `problem`, optionally building on the previous
    /// agent's compiled solution.
    ///
    /// Generation and parse failures end the loop and are reported through
    /// [`AgentRun::stop`]; the returned error is reserved for prompt
    /// rendering failures.
    #[instrument(skip_all, fields(agent = %self.spec.name, has_previous = previous.is_some()))]
    pub fn run<G, F>(
        &self,
        generator: &G,
        problem: &str,
        previous: Option<&str>,
        on_event: &mut F,
    ) -> Result<AgentRun>
    where
        G: Generator + ?Sized,
        F: FnMut(&AgentEvent<'_>),
    {
        let agent = self.spec.name.as_str();
        let mut transcript = Transcript::new(self.spec.role_prompt.as_str());
        transcript.push_user(render_handoff(problem, previous)?);
        transcript.push_assistant(ACKNOWLEDGMENT);
        on_event(&AgentEvent::Started {
            agent,
            has_previous: previous.is_some(),
        });

        let mut steps: Vec<Step> = Vec::new();
        let stop = loop {
            let accepted = steps.len() as u32;
            if let Some(limit) = self.settings.max_steps
                && accepted >= limit
            {
                warn!(limit, "step limit reached without a final answer");
                break AgentStop::StepLimitExceeded { limit };
            }
            let attempt = accepted + 1;

            let reply = generator
                .generate(&transcript.render())
                .and_then(|text| {
                    if text.trim().is_empty() {
                        Err(GenerationError::Empty)
                    } else {
                        Ok(text)
                    }
                });
            let raw = match reply {
                Ok(raw) => raw,
                Err(err) => {
                    warn!(attempt, err = %err, "generation failed");
                    on_event(&AgentEvent::Failed {
                        agent,
                        attempt,
                        error: err.to_string(),
                    });
                    break AgentStop::GenerationFailed;
                }
            };
            debug!(attempt, raw = %raw, "received response");
            on_event(&AgentEvent::Response {
                agent,
                attempt,
                raw: &raw,
            });

            let draft = match parse_step(&raw) {
                Ok(draft) => draft,
                Err(err) => {
                    warn!(attempt, err = %err, raw = %raw, "failed to parse response");
                    on_event(&AgentEvent::Failed {
                        agent,
                        attempt,
                        error: err.to_string(),
                    });
                    break AgentStop::ParseFailed;
                }
            };

            let step = Step::from_draft(attempt, draft);
            info!(
                index = step.index,
                title = %step.title,
                next_action = step.next_action.as_str(),
                "parsed step"
            );
            on_event(&AgentEvent::Step { agent, step: &step });
            transcript.push_assistant(raw);

            let is_final = step.is_final();
            steps.push(step);
            if is_final {
                break AgentStop::FinalAnswer;
            }
        };

        let compiled = compile_solution(&steps);
        info!(steps = steps.len(), stop = %stop, "agent finished");
        on_event(&AgentEvent::Stopped {
            agent,
            stop,
            steps: steps.len() as u32,
            compiled: &compiled,
        });

        Ok(AgentRun {
            steps,
            stop,
            compiled,
        })
    }
}
