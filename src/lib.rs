//! Translation Master - batch translation of source trees
//!
//! Walks a directory, asks a locally served ollama model to translate the
//! user-facing text of every file, and writes the results to a mirrored tree
//! inside a per-run output directory.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod setup;
pub mod translate;
pub mod walker;
pub mod workflow;
