//! The two-stage retrieve-then-generate pipeline.
//!
//! Setup (construct → ready) splits and embeds the seed documents exactly
//! once; every call afterwards retrieves the best-matching chunks for a
//! question and conditions a language model's answer on them.

/// Hard-coded demo entry point over a sample journal entry.
pub mod demo;
/// Answer generation from a question and retrieved context.
pub mod generator;
/// Pipeline assembly and the retrieve → generate runner.
pub mod runner;

pub use generator::AnswerGenerator;
pub use runner::{Pipeline, PipelineBuilder};
