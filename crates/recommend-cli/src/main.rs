//! Agent Recommender CLI
//!
//! Suggests the most relevant agent from a JSON catalog for a free-text query.
//!
//! # Usage
//!
//! ```bash
//! agent-recommend --catalog agents.json best "help me debug a function"
//! agent-recommend --catalog agents.json top "plan a trip" -k 2
//! agent-recommend --catalog agents.json switch "fix this bug" --current 2
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/agent-recommend/config.toml)
//! 3. Environment variables (AGENT_RECOMMEND_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use recommend_cli::{run, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
