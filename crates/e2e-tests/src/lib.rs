//! End-to-end test infrastructure for the agent recommender.
//!
//! Provides a shared TestHarness plus catalog fixtures for E2E tests
//! covering the catalog-to-query pipeline.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use recommend_index::{AgentRecommender, StaticCatalog};
use recommend_types::{AgentProfile, RecommenderSettings};

/// Words used to generate random agent descriptions and queries.
pub const WORDS: &[&str] = &[
    "code", "review", "debug", "rust", "python", "deploy", "cloud", "database", "query",
    "travel", "trip", "hotel", "flight", "budget", "invoice", "tax", "recipe", "cook",
    "garden", "plant", "music", "guitar", "essay", "grammar", "poem", "fitness", "workout",
    "diet", "market", "stock", "legal", "contract", "design", "logo", "photo", "camera",
];

/// Shared test harness for E2E tests.
///
/// Owns a recommender, an in-memory catalog, and a temp dir for catalog
/// files written to disk.
pub struct TestHarness {
    /// Keeps temp dir alive for the lifetime of the harness
    pub _temp_dir: tempfile::TempDir,
    /// Recommender under test
    pub recommender: Arc<AgentRecommender>,
    /// Catalog owner that emits change events
    pub catalog: Arc<StaticCatalog>,
}

impl TestHarness {
    /// Create a harness with default settings and an empty catalog.
    pub fn new() -> Self {
        Self::with_settings(RecommenderSettings::default())
    }

    pub fn with_settings(settings: RecommenderSettings) -> Self {
        let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        Self {
            _temp_dir: temp_dir,
            recommender: Arc::new(AgentRecommender::new(settings)),
            catalog: Arc::new(StaticCatalog::default()),
        }
    }

    /// Write a catalog JSON document into the temp dir and return its path.
    pub fn write_catalog(&self, name: &str, json: &str) -> PathBuf {
        let path = self._temp_dir.path().join(name);
        let mut file = std::fs::File::create(&path).expect("Failed to create catalog file");
        file.write_all(json.as_bytes())
            .expect("Failed to write catalog file");
        path
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// The two-agent catalog from the product walkthrough.
pub fn scenario_catalog() -> Vec<AgentProfile> {
    vec![
        AgentProfile::new(1i64, "Coding Helper")
            .with_description("assists with code review and debugging"),
        AgentProfile::new(2i64, "Travel Planner").with_description("helps plan trips and itineraries"),
    ]
}

/// Generate `count` agents with random descriptions drawn from [`WORDS`].
///
/// Deterministic for a given seed.
pub fn random_catalog(seed: u64, count: usize) -> Vec<AgentProfile> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            AgentProfile::new(format!("agent-{}", i), format!("Agent {}", i))
                .with_description(random_text(&mut rng, 8))
                .with_instructions(random_text(&mut rng, 4))
        })
        .collect()
}

/// Random query of `len` words drawn from [`WORDS`].
pub fn random_query(seed: u64, len: usize) -> String {
    let mut rng = StdRng::seed_from_u64(seed);
    random_text(&mut rng, len)
}

fn random_text(rng: &mut StdRng, len: usize) -> String {
    (0..len)
        .map(|_| WORDS[rng.random_range(0..WORDS.len())])
        .collect::<Vec<_>>()
        .join(" ")
}
