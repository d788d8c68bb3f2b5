//! agent-recommend library exports.
//!
//! This crate provides the command-line front end for the agent recommender.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (best, top, switch, keywords, summary, stats)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{execute, init_logging, run};
