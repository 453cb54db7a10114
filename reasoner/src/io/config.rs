//! Reasoner configuration loaded from a TOML file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::io::process::ProcessLimits;

/// Default location of the config file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = ".reasoner/config.toml";

/// Which generation backend drives the agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Gemini,
    Command,
}

/// Reasoner configuration (TOML).
///
/// Missing fields fall back to [`ReasonerConfig::default`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReasonerConfig {
    pub backend: Backend,

    /// Environment variable holding the Gemini API key.
    pub api_key_env: String,

    /// Maximum steps per agent before it is stopped. Unbounded when unset.
    pub max_steps: Option<u32>,

    /// Directory for JSONL run logs. No run log is written when unset.
    pub log_dir: Option<PathBuf>,

    pub gemini: GeminiConfig,

    pub command: CommandConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeminiConfig {
    pub model: String,
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Let the model run code while it reasons.
    pub code_execution: bool,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 300,
            code_execution: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CommandConfig {
    /// Program and arguments, e.g. `["llm", "-m", "local"]`.
    pub argv: Vec<String>,
    pub timeout_secs: u64,
    /// Truncate replies beyond this many bytes.
    pub output_limit_bytes: usize,
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            argv: Vec::new(),
            timeout_secs: 300,
            output_limit_bytes: 1_000_000,
        }
    }
}

impl CommandConfig {
    pub fn limits(&self) -> ProcessLimits {
        ProcessLimits {
            timeout: Duration::from_secs(self.timeout_secs),
            output_limit_bytes: self.output_limit_bytes,
        }
    }
}

impl Default for ReasonerConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Gemini,
            api_key_env: "API_KEY".to_string(),
            max_steps: None,
            log_dir: None,
            gemini: GeminiConfig::default(),
            command: CommandConfig::default(),
        }
    }
}

impl ReasonerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == Some(0) {
            return Err(anyhow!("max_steps must be > 0 when set"));
        }
        match self.backend {
            Backend::Gemini => {
                if self.api_key_env.trim().is_empty() {
                    return Err(anyhow!("api_key_env must name an environment variable"));
                }
                if self.gemini.model.trim().is_empty() {
                    return Err(anyhow!("gemini.model must be non-empty"));
                }
                if self.gemini.timeout_secs == 0 {
                    return Err(anyhow!("gemini.timeout_secs must be > 0"));
                }
            }
            Backend::Command => {
                if self.command.argv.is_empty() || self.command.argv[0].trim().is_empty() {
                    return Err(anyhow!("command.argv must be a non-empty array"));
                }
                if self.command.timeout_secs == 0 {
                    return Err(anyhow!("command.timeout_secs must be > 0"));
                }
                if self.command.output_limit_bytes == 0 {
                    return Err(anyhow!("command.output_limit_bytes must be > 0"));
                }
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `ReasonerConfig::default()`.
pub fn load_config(path: &Path) -> Result<ReasonerConfig> {
    if !path.exists() {
        return Ok(ReasonerConfig::default());
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: ReasonerConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, ReasonerConfig::default());
        assert_eq!(cfg.max_steps, None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "backend = \"command\"\nmax_steps = 8\n\n[command]\nargv = [\"llm\", \"-m\", \"local\"]\n",
        )
        .expect("write");

        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.backend, Backend::Command);
        assert_eq!(cfg.max_steps, Some(8));
        assert_eq!(cfg.command.argv, vec!["llm", "-m", "local"]);
        assert_eq!(cfg.command.timeout_secs, CommandConfig::default().timeout_secs);
        assert_eq!(cfg.gemini, GeminiConfig::default());
        cfg.validate().expect("valid");
    }

    #[test]
    fn validate_rejects_zero_step_limit() {
        let cfg = ReasonerConfig {
            max_steps: Some(0),
            ..ReasonerConfig::default()
        };
        assert!(cfg.validate().unwrap_err().to_string().contains("max_steps"));
    }

    #[test]
    fn command_backend_requires_argv() {
        let cfg = ReasonerConfig {
            backend: Backend::Command,
            ..ReasonerConfig::default()
        };
        assert!(cfg.validate().unwrap_err().to_string().contains("command.argv"));
    }

    #[test]
    fn unknown_backend_fails_to_parse() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("config.toml");
        fs::write(&path, "backend = \"openai\"\n").expect("write");
        assert!(load_config(&path).is_err());
    }
}
