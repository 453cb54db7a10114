//! Pure deterministic logic: transcript rendering, reply parsing and solution
//! compilation. Nothing in here performs I/O.

pub mod compile;
pub mod parser;
pub mod transcript;
pub mod types;
