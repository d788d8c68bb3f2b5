//! Agent recommender: the shared, rebuildable recommendation index.
//!
//! Holds the current [`IndexSnapshot`] behind `RwLock<Arc<_>>`. Readers clone
//! the `Arc` and score without holding the lock; a rebuild constructs the next
//! snapshot off to the side and publishes it with a single pointer swap.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Instant;

use tracing::{debug, info, warn};

use recommend_types::{AgentId, AgentProfile, CatalogEvent, RecommenderSettings};

use crate::analyzer::Analyzer;
use crate::catalog::CatalogSource;
use crate::error::RecommendationError;
use crate::snapshot::IndexSnapshot;
use crate::types::{IndexStats, RebuildStats, Recommendation, SwitchAdvice};

/// Maps free-text queries onto the most relevant agents of the catalog.
pub struct AgentRecommender {
    settings: RecommenderSettings,
    current: RwLock<Arc<IndexSnapshot>>,
    generation: AtomicU64,
}

impl AgentRecommender {
    /// Create an untrained recommender.
    pub fn new(settings: RecommenderSettings) -> Self {
        let analyzer = Analyzer::new(settings.analyzer.clone());
        Self {
            settings,
            current: RwLock::new(Arc::new(IndexSnapshot::untrained(analyzer))),
            generation: AtomicU64::new(0),
        }
    }

    /// Settings this recommender was created with.
    pub fn settings(&self) -> &RecommenderSettings {
        &self.settings
    }

    /// The currently published snapshot.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the index with one built from `profiles`.
    ///
    /// An empty catalog publishes an untrained index. Among concurrent
    /// rebuilds the one that started last wins: a snapshot is never published
    /// over one with a higher generation, so `stats().generation` never
    /// decreases.
    pub fn rebuild(&self, profiles: &[AgentProfile]) -> Result<RebuildStats, RecommendationError> {
        let start = Instant::now();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let duplicates = count_duplicate_ids(profiles);
        if duplicates > 0 {
            warn!(
                generation,
                duplicates, "Catalog contains duplicate agent ids; ranking keeps catalog order"
            );
        }

        let analyzer = Analyzer::new(self.settings.analyzer.clone());
        let snapshot = IndexSnapshot::build(profiles, analyzer, generation);

        let stats = RebuildStats {
            generation,
            agent_count: snapshot.agent_count(),
            vocabulary_size: snapshot.vocabulary_size(),
            empty_documents: snapshot.empty_documents(),
            elapsed_ms: start.elapsed().as_millis() as u64,
            published: false,
        };

        if !self.publish(Arc::new(snapshot)) {
            debug!(generation, "Newer snapshot already published; discarding rebuild");
            return Ok(stats);
        }
        let stats = RebuildStats {
            published: true,
            ..stats
        };

        if stats.agent_count == 0 {
            info!(generation, "Recommendation index reset to untrained (empty catalog)");
        } else {
            info!(
                generation,
                agent_count = stats.agent_count,
                vocabulary_size = stats.vocabulary_size,
                empty_documents = stats.empty_documents,
                elapsed_ms = stats.elapsed_ms,
                "Recommendation index rebuilt"
            );
        }

        Ok(stats)
    }

    /// Reload the catalog from `source` and rebuild once.
    ///
    /// On a catalog failure the previous snapshot stays published.
    pub fn apply_event(
        &self,
        event: &CatalogEvent,
        source: &dyn CatalogSource,
    ) -> Result<RebuildStats, RecommendationError> {
        debug!(
            kind = event.kind(),
            agent_id = ?event.agent_id(),
            "Catalog changed"
        );

        let profiles = source.load_profiles().map_err(|e| {
            warn!(kind = event.kind(), error = %e, "Catalog reload failed; keeping current index");
            e
        })?;

        self.rebuild(&profiles)
    }

    /// Single best agent for a query, or `None` when nothing matches.
    pub fn best_match(&self, query: &str) -> Option<Recommendation> {
        self.ranked(query, 1, None).into_iter().next()
    }

    /// Best agent other than `exclude`.
    pub fn best_match_excluding(&self, query: &str, exclude: &AgentId) -> Option<Recommendation> {
        self.ranked(query, 1, Some(exclude)).into_iter().next()
    }

    /// Up to `k` agents by descending score. `k` must be positive.
    pub fn top_k(&self, query: &str, k: usize) -> Result<Vec<Recommendation>, RecommendationError> {
        validate_k(k)?;
        Ok(self.ranked(query, k, None))
    }

    /// Up to `k` agents other than `exclude`.
    pub fn top_k_excluding(
        &self,
        query: &str,
        k: usize,
        exclude: &AgentId,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        validate_k(k)?;
        Ok(self.ranked(query, k, Some(exclude)))
    }

    /// Top agents using the configured default k.
    pub fn recommend(&self, query: &str) -> Vec<Recommendation> {
        self.ranked(query, self.settings.default_top_k.max(1), None)
    }

    /// Switch advice using the configured threshold.
    pub fn should_switch(&self, query: &str, current: &AgentId) -> SwitchAdvice {
        self.advise_switch(query, current, self.settings.switch_threshold.clamp(0.0, 1.0))
    }

    /// Whether a different agent beats `current` by more than `threshold`.
    pub fn should_switch_with_threshold(
        &self,
        query: &str,
        current: &AgentId,
        threshold: f32,
    ) -> Result<SwitchAdvice, RecommendationError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(RecommendationError::InvalidArgument(format!(
                "threshold must be 0.0-1.0, got {}",
                threshold
            )));
        }
        Ok(self.advise_switch(query, current, threshold))
    }

    /// Description of an agent as of the current snapshot.
    pub fn expertise_summary(&self, id: &AgentId) -> Option<String> {
        self.snapshot().card(id).map(|c| c.description.clone())
    }

    /// Terms that most characterize an agent.
    pub fn top_terms(&self, id: &AgentId, n: usize) -> Vec<(String, f32)> {
        self.snapshot().top_terms(id, n)
    }

    /// Current index status.
    pub fn stats(&self) -> IndexStats {
        let snapshot = self.snapshot();
        IndexStats {
            trained: snapshot.is_trained(),
            agent_count: snapshot.agent_count(),
            vocabulary_size: snapshot.vocabulary_size(),
            generation: snapshot.generation(),
            built_at: snapshot.built_at(),
        }
    }

    /// Swap in `snapshot` unless a newer generation is already current.
    fn publish(&self, snapshot: Arc<IndexSnapshot>) -> bool {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if current.generation() > snapshot.generation() {
            return false;
        }
        *current = snapshot;
        true
    }

    fn ranked(&self, query: &str, limit: usize, exclude: Option<&AgentId>) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        match snapshot.rank(query, limit, exclude) {
            Ok(ranked) => {
                debug!(
                    generation = snapshot.generation(),
                    k = limit,
                    results = ranked.len(),
                    "Ranked agents"
                );
                ranked
            }
            Err(RecommendationError::UntrainedIndex) => {
                debug!("Query against untrained index; no recommendation");
                Vec::new()
            }
            Err(e) => {
                warn!(error = %e, "Ranking failed");
                Vec::new()
            }
        }
    }

    fn advise_switch(&self, query: &str, current: &AgentId, threshold: f32) -> SwitchAdvice {
        let snapshot = self.snapshot();
        let Ok(scores) = snapshot.score(query) else {
            return SwitchAdvice::stay();
        };

        let Some(best) = snapshot.rank_scores(&scores, 1, None).into_iter().next() else {
            return SwitchAdvice::stay();
        };

        let current_score = snapshot
            .position(current)
            .and_then(|i| scores.get(i).copied())
            .unwrap_or(0.0);
        let confidence = best.score - current_score;

        SwitchAdvice {
            should_switch: &best.agent_id != current && confidence > threshold,
            recommended: Some(best.agent_id),
            confidence,
        }
    }
}

impl Default for AgentRecommender {
    fn default() -> Self {
        Self::new(RecommenderSettings::default())
    }
}

fn validate_k(k: usize) -> Result<(), RecommendationError> {
    if k == 0 {
        return Err(RecommendationError::InvalidArgument(
            "k must be > 0".to_string(),
        ));
    }
    Ok(())
}

fn count_duplicate_ids(profiles: &[AgentProfile]) -> usize {
    let mut seen = HashSet::with_capacity(profiles.len());
    profiles.iter().filter(|p| !seen.insert(&p.id)).count()
}
