//! Stable exit codes for reasoner CLI commands.

/// The pipeline ran to the end. Individual agents may still have stopped
/// early; that shows up in the report, not the exit code.
pub const OK: i32 = 0;
/// Invalid config, missing credentials, unreadable or empty problem, or any
/// other error before or outside the pipeline.
pub const INVALID: i32 = 1;
