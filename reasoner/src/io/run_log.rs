//! Append-only JSONL log of a pipeline run under the configured log dir.
//!
//! Each line is one event: the run header, every raw reply, every parsed
//! step, every agent stop, then the run footer. Lines are flushed as they are
//! written so a crashed run still leaves a readable log.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::agents::AgentEvent;
use crate::pipeline::PipelineOutcome;

#[derive(Debug, Serialize)]
struct LogLine<'a, T: Serialize> {
    at: String,
    #[serde(flatten)]
    body: &'a T,
}

#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum RunMarker<'a> {
    RunStarted {
        run_id: &'a str,
        problem: &'a str,
        agents: &'a [&'a str],
    },
    RunFinished {
        run_id: &'a str,
        final_answer: &'a str,
        unfinished: Vec<&'a str>,
    },
}

/// Generate a sortable run id from the current UTC time.
pub fn new_run_id() -> String {
    Utc::now().format("%Y%m%dT%H%M%S%.3fZ").to_string()
}

pub struct RunLog {
    run_id: String,
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RunLog {
    /// Create `<dir>/<run_id>.jsonl` and write the run header.
    pub fn create(dir: &Path, run_id: &str, problem: &str, agents: &[&str]) -> Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("create log dir {}", dir.display()))?;
        let path = dir.join(format!("{run_id}.jsonl"));
        let file =
            File::create(&path).with_context(|| format!("create run log {}", path.display()))?;
        let mut log = Self {
            run_id: run_id.to_string(),
            path,
            writer: BufWriter::new(file),
        };
        log.write_line(&RunMarker::RunStarted {
            run_id,
            problem,
            agents,
        })?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn record(&mut self, event: &AgentEvent<'_>) -> Result<()> {
        self.write_line(event)
    }

    /// Write the run footer.
    pub fn finish(mut self, outcome: &PipelineOutcome) -> Result<PathBuf> {
        let run_id = self.run_id.clone();
        self.write_line(&RunMarker::RunFinished {
            run_id: &run_id,
            final_answer: &outcome.final_answer,
            unfinished: outcome
                .unfinished()
                .map(|r| r.agent_name.as_str())
                .collect(),
        })?;
        Ok(self.path)
    }

    fn write_line<T: Serialize>(&mut self, body: &T) -> Result<()> {
        let line = LogLine {
            at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            body,
        };
        let mut buf = serde_json::to_string(&line).context("serialize run log line")?;
        buf.push('\n');
        self.writer
            .write_all(buf.as_bytes())
            .and_then(|()| self.writer.flush())
            .with_context(|| format!("write {}", self.path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{AgentStop, NextAction, SolutionRecord, Step};
    use serde_json::Value;

    fn read_lines(path: &Path) -> Vec<Value> {
        fs::read_to_string(path)
            .expect("read log")
            .lines()
            .map(|l| serde_json::from_str(l).expect("json line"))
            .collect()
    }

    #[test]
    fn writes_header_events_and_footer() {
        let temp = tempfile::tempdir().expect("tempdir");
        let dir = temp.path().join("runs");
        let mut log = RunLog::create(&dir, "run-1", "What is 2+2?", &["solver"]).expect("create");

        let step = Step {
            index: 1,
            title: "Add".to_string(),
            content: "4".to_string(),
            next_action: NextAction::FinalAnswer,
        };
        log.record(&AgentEvent::Response {
            agent: "solver",
            attempt: 1,
            raw: "{\"title\":\"Add\"}",
        })
        .expect("record response");
        log.record(&AgentEvent::Step {
            agent: "solver",
            step: &step,
        })
        .expect("record step");

        let outcome = PipelineOutcome {
            records: vec![SolutionRecord {
                agent_name: "solver".to_string(),
                compiled_text: "### Step 1: Add\n4\n\n".to_string(),
                stop: AgentStop::FinalAnswer,
                steps: 1,
            }],
            final_answer: "### Step 1: Add\n4\n\n".to_string(),
        };
        let path = log.finish(&outcome).expect("finish");
        assert_eq!(path, dir.join("run-1.jsonl"));

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0]["event"], "run_started");
        assert_eq!(lines[0]["problem"], "What is 2+2?");
        assert_eq!(lines[1]["event"], "response");
        assert_eq!(lines[1]["raw"], "{\"title\":\"Add\"}");
        assert_eq!(lines[2]["event"], "step");
        assert_eq!(lines[2]["step"]["next_action"], "final_answer");
        assert_eq!(lines[3]["event"], "run_finished");
        assert_eq!(lines[3]["unfinished"], serde_json::json!([]));
        assert!(lines.iter().all(|l| l["at"].is_string()));
    }

    #[test]
    fn run_ids_are_timestamps() {
        let id = new_run_id();
        assert!(id.ends_with('Z'));
        assert!(id.contains('T'));
    }
}
