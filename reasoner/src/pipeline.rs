//! Sequential handoff across the agent roster.
//!
//! The pipeline is a fold over the configured agents: each agent receives the
//! problem and the previous agent's compiled text, and its own compiled text
//! becomes the next agent's input. A failed agent still hands over whatever it
//! compiled, possibly the empty string.

use std::collections::HashSet;

use anyhow::{Result, bail};
use tracing::{info, instrument, warn};

use crate::agents::AgentEvent;
use crate::agents::reasoning::{AgentSettings, ReasoningAgent};
use crate::agents::roster::standard_roster;
use crate::core::types::{AgentSpec, SolutionRecord};
use crate::io::generator::Generator;

/// Records of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutcome {
    /// One record per configured agent, in pipeline order.
    pub records: Vec<SolutionRecord>,
    /// Compiled text of the last agent.
    pub final_answer: String,
}

impl PipelineOutcome {
    /// Agents that stopped without a final answer.
    pub fn unfinished(&self) -> impl Iterator<Item = &SolutionRecord> {
        self.records.iter().filter(|r| !r.stop.is_done())
    }
}

#[derive(Debug, Clone)]
pub struct AgentPipeline {
    agents: Vec<ReasoningAgent>,
}

impl AgentPipeline {
    /// Build a pipeline from explicit specs. Names must be unique and at
    /// least one agent is required.
    pub fn new(specs: Vec<AgentSpec>, settings: AgentSettings) -> Result<Self> {
        validate_specs(&specs)?;
        let agents = specs
            .into_iter()
            .map(|spec| ReasoningAgent::new(spec, settings))
            .collect();
        Ok(Self { agents })
    }

    /// The four-role pipeline.
    pub fn standard(settings: AgentSettings) -> Result<Self> {
        Self::new(standard_roster(), settings)
    }

    pub fn agent_names(&self) -> impl Iterator<Item = &str> {
        self.agents.iter().map(ReasoningAgent::name)
    }

    /// Run every agent in order.
    ///
    /// Agent failures never stop the pipeline; they show up in each record's
    /// `stop`. The error path is reserved for prompt rendering failures.
    #[instrument(skip_all, fields(agents = self.agents.len()))]
    pub fn run<G, F>(&self, generator: &G, problem: &str, mut on_event: F) -> Result<PipelineOutcome>
    where
        G: Generator + ?Sized,
        F: FnMut(&AgentEvent<'_>),
    {
        let mut records: Vec<SolutionRecord> = Vec::with_capacity(self.agents.len());
        for agent in &self.agents {
            let previous = records.last().map(|r| r.compiled_text.as_str());
            let run = agent.run(generator, problem, previous, &mut on_event)?;
            if run.stop.is_done() {
                info!(agent = agent.name(), steps = run.steps.len(), "agent completed");
            } else {
                warn!(
                    agent = agent.name(),
                    steps = run.steps.len(),
                    stop = %run.stop,
                    "agent stopped early, passing its partial solution forward"
                );
            }
            records.push(run.into_record(agent.name()));
        }

        let final_answer = records
            .last()
            .map(|r| r.compiled_text.clone())
            .unwrap_or_default();
        Ok(PipelineOutcome {
            records,
            final_answer,
        })
    }
}

fn validate_specs(specs: &[AgentSpec]) -> Result<()> {
    if specs.is_empty() {
        bail!("pipeline needs at least one agent");
    }
    let mut seen = HashSet::new();
    for spec in specs {
        if spec.name.trim().is_empty() {
            bail!("agent names must be non-empty");
        }
        if !seen.insert(spec.name.as_str()) {
            bail!("duplicate agent name '{}'", spec.name);
        }
    }
    Ok(())
}
