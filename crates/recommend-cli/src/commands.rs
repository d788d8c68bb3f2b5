//! Command implementations for agent-recommend.
//!
//! Every command follows the same path:
//! 1. Load configuration (defaults -> file -> env -> CLI)
//! 2. Install the tracing subscriber
//! 3. Rebuild the recommender from the JSON catalog file
//! 4. Answer the query and print the result

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use tracing::info;

use recommend_index::{AgentRecommender, FileCatalog, IndexStats, Recommendation, SwitchAdvice};
use recommend_types::{AgentId, CatalogEvent, Settings};

use crate::cli::{Cli, Commands};

/// Install the global tracing subscriber. RUST_LOG wins over `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Run a parsed command line.
pub fn run(cli: Cli) -> Result<()> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(level) = cli.log_level.as_deref() {
        settings.log_level = level.to_string();
    }
    if let Some(path) = cli.catalog.as_deref() {
        settings.catalog_path = Some(path.to_string());
    }

    init_logging(&settings.log_level)?;

    let catalog_path = settings.catalog_path.clone().ok_or_else(|| {
        anyhow!("No agent catalog configured; pass --catalog or set catalog_path")
    })?;

    let recommender = AgentRecommender::new(settings.recommender.clone());
    let stats = recommender
        .apply_event(&CatalogEvent::Reloaded, &FileCatalog::new(&catalog_path))
        .with_context(|| format!("Failed to load agent catalog from {}", catalog_path))?;
    info!(
        catalog = %catalog_path,
        agent_count = stats.agent_count,
        vocabulary_size = stats.vocabulary_size,
        "Catalog indexed"
    );

    let output = execute(&recommender, &cli.command, cli.json)?;
    println!("{}", output);
    Ok(())
}

/// Execute a command against a trained recommender and render its output.
pub fn execute(recommender: &AgentRecommender, command: &Commands, json: bool) -> Result<String> {
    match command {
        Commands::Best { query, exclude } => {
            let best = match exclude {
                Some(id) => recommender.best_match_excluding(query, &AgentId::from(id.as_str())),
                None => recommender.best_match(query),
            };
            render_recommendations(best.as_slice(), json)
        }
        Commands::Top { query, k, exclude } => {
            let k = k.unwrap_or(recommender.settings().default_top_k);
            let ranked = match exclude {
                Some(id) => recommender.top_k_excluding(query, k, &AgentId::from(id.as_str()))?,
                None => recommender.top_k(query, k)?,
            };
            render_recommendations(&ranked, json)
        }
        Commands::Switch {
            query,
            current,
            threshold,
        } => {
            let current = AgentId::from(current.as_str());
            let advice = match threshold {
                Some(t) => recommender.should_switch_with_threshold(query, &current, *t)?,
                None => recommender.should_switch(query, &current),
            };
            render_switch(&advice, json)
        }
        Commands::Keywords { agent_id, count } => {
            let id = AgentId::from(agent_id.as_str());
            if recommender.snapshot().card(&id).is_none() {
                bail!("Unknown agent: {}", agent_id);
            }
            render_terms(&recommender.top_terms(&id, *count), json)
        }
        Commands::Summary { agent_id } => {
            let summary = recommender
                .expertise_summary(&AgentId::from(agent_id.as_str()))
                .ok_or_else(|| anyhow!("Unknown agent: {}", agent_id))?;
            if json {
                to_json(&serde_json::json!({ "agent_id": agent_id, "description": summary }))
            } else {
                Ok(summary)
            }
        }
        Commands::Stats => render_stats(&recommender.stats(), json),
    }
}

fn render_recommendations(ranked: &[Recommendation], json: bool) -> Result<String> {
    if json {
        return to_json(&ranked);
    }
    if ranked.is_empty() {
        return Ok("No matching agent".to_string());
    }
    Ok(ranked
        .iter()
        .enumerate()
        .map(|(i, r)| format!("{}. {} ({:.3})", i + 1, r.agent_id, r.score))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn render_switch(advice: &SwitchAdvice, json: bool) -> Result<String> {
    if json {
        return to_json(advice);
    }
    Ok(match (&advice.recommended, advice.should_switch) {
        (Some(id), true) => format!("Switch to {} (confidence {:.3})", id, advice.confidence),
        (Some(id), false) => format!(
            "Stay (best match {}, confidence {:.3})",
            id, advice.confidence
        ),
        (None, _) => "Stay (no matching agent)".to_string(),
    })
}

fn render_terms(terms: &[(String, f32)], json: bool) -> Result<String> {
    if json {
        return to_json(&terms);
    }
    Ok(terms
        .iter()
        .map(|(term, weight)| format!("{:<20} {:.3}", term, weight))
        .collect::<Vec<_>>()
        .join("\n"))
}

fn render_stats(stats: &IndexStats, json: bool) -> Result<String> {
    if json {
        return to_json(stats);
    }
    Ok(format!(
        "Trained:         {}\nAgents:          {}\nVocabulary size: {}\nGeneration:      {}",
        stats.trained, stats.agent_count, stats.vocabulary_size, stats.generation
    ))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("Failed to serialize output")
}
