//! Sequential multi-agent reasoning pipeline.
//!
//! A fixed roster of role-prompted agents solves a problem one after another.
//! Each agent drives a text generator one step at a time, parses every reply
//! into a structured step, and compiles its steps into a solution that becomes
//! the next agent's input.
//!
//! - **[`core`]**: Pure logic (transcript, step parsing, compilation). No I/O.
//! - **[`io`]**: Generator backends, config, prompts, problem input, run log.
//!
//! [`agents`] and [`pipeline`] coordinate the two; [`report`] renders results.

pub mod agents;
pub mod core;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod pipeline;
pub mod report;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
