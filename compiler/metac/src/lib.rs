//! Meta CLI library.
//!
//! `main.rs` only parses arguments; the pipeline and commands live here so
//! integration tests can drive them without spawning a process.

pub mod commands;
pub mod pipeline;
