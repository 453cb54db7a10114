//! Problem statement acquisition.

use std::fs;
use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};

/// Where the problem statement comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

/// Read the problem statement. Blank input is rejected.
pub fn read_problem(source: &ProblemSource) -> Result<String> {
    let raw = match source {
        ProblemSource::Inline(text) => text.clone(),
        ProblemSource::File(path) => {
            fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?
        }
        ProblemSource::Stdin => {
            let stdin = std::io::stdin();
            if stdin.is_terminal() {
                eprintln!("Enter the problem statement, then press Ctrl-D:");
            }
            read_problem_from(stdin.lock())?
        }
    };
    normalize(raw)
}

/// Read a problem statement from any reader.
pub fn read_problem_from<R: Read>(mut reader: R) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("read problem from stdin")?;
    Ok(buf)
}

fn normalize(raw: String) -> Result<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("problem statement is empty");
    }
    Ok(trimmed.to_string())
}
