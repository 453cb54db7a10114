//! Side-effecting pieces: generator backends, subprocesses, config, prompts,
//! problem input, and the run log.

pub mod command;
pub mod config;
pub mod credentials;
pub mod gemini;
pub mod generator;
pub mod input;
pub mod process;
pub mod prompt;
pub mod run_log;
