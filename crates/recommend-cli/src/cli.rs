//! CLI argument parsing for agent-recommend.
//!
//! CLI flags override all other config sources.

use clap::{Parser, Subcommand};

/// Agent Recommender
///
/// Suggests the best agent from a JSON catalog for a free-text query.
#[derive(Parser, Debug)]
#[command(name = "agent-recommend")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/agent-recommend/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// JSON file with the agent catalog (overrides catalog_path from config)
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Recommender commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the single best agent for a query
    Best {
        /// User query
        query: String,

        /// Agent to leave out (e.g. the one currently in use)
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Show the top-K agents for a query
    Top {
        /// User query
        query: String,

        /// Number of suggestions (default from config)
        #[arg(short, long)]
        k: Option<usize>,

        /// Agent to leave out
        #[arg(long)]
        exclude: Option<String>,
    },

    /// Decide whether to suggest switching away from the current agent
    Switch {
        /// User query
        query: String,

        /// Agent currently in use
        #[arg(long)]
        current: String,

        /// Minimum score advantage (default from config)
        #[arg(short, long)]
        threshold: Option<f32>,
    },

    /// List the terms that characterize an agent
    Keywords {
        /// Agent id
        agent_id: String,

        /// Number of terms
        #[arg(short = 'n', long, default_value = "5")]
        count: usize,
    },

    /// Print an agent's description
    Summary {
        /// Agent id
        agent_id: String,
    },

    /// Show index statistics
    Stats,
}
