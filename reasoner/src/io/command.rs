//! Generator backed by an external command.
//!
//! The transcript is written to the command's stdin and its stdout is taken
//! as the reply. Any CLI that reads a prompt and prints a completion works.

use std::process::Command;

use tracing::{debug, instrument, warn};

use crate::io::generator::{GenerationError, Generator};
use crate::io::process::{ProcessLimits, run_with_stdin};

/// Characters of stderr quoted in a failure message.
const STDERR_EXCERPT_CHARS: usize = 2_000;

#[derive(Debug, Clone)]
pub struct CommandGenerator {
    argv: Vec<String>,
    limits: ProcessLimits,
}

impl CommandGenerator {
    /// `argv[0]` is the program; the remaining entries are its arguments.
    pub fn new(argv: Vec<String>, limits: ProcessLimits) -> Self {
        Self { argv, limits }
    }
}

impl Generator for CommandGenerator {
    #[instrument(skip_all, fields(program = self.argv.first().map(String::as_str).unwrap_or("")))]
    fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let (program, args) = self
            .argv
            .split_first()
            .ok_or_else(|| GenerationError::Command("empty command".to_string()))?;
        let mut cmd = Command::new(program);
        cmd.args(args);

        let output = run_with_stdin(cmd, prompt.as_bytes(), self.limits)
            .map_err(|err| GenerationError::Command(format!("{err:#}")))?;

        if output.timed_out {
            return Err(GenerationError::TimedOut(self.limits.timeout));
        }
        if !output.status.success() {
            let stderr = output.stderr_text();
            let excerpt: String = stderr.chars().take(STDERR_EXCERPT_CHARS).collect();
            warn!(exit_code = ?output.status.code(), "generator command failed");
            return Err(GenerationError::Command(format!(
                "exit status {:?}: {}",
                output.status.code(),
                excerpt.trim()
            )));
        }
        if output.stdout_truncated > 0 {
            warn!(
                truncated = output.stdout_truncated,
                "generator reply truncated"
            );
        }

        let reply = output.stdout_text();
        debug!(reply_bytes = reply.len(), "generator command replied");
        Ok(reply)
    }
}
