//! Immutable recommendation index snapshot.
//!
//! A snapshot is built in one pass from a catalog and never mutated. The
//! recommender publishes a new snapshot on each rebuild and readers keep
//! whichever snapshot they already hold.

use chrono::{DateTime, Utc};
use tracing::debug;

use recommend_types::{AgentId, AgentProfile};

use crate::analyzer::Analyzer;
use crate::error::RecommendationError;
use crate::types::{AgentCard, Recommendation};
use crate::vocabulary::Vocabulary;
use crate::weights::TermWeightMatrix;

/// Vocabulary, term-weight matrix and agent ordering from one rebuild.
#[derive(Debug, Clone)]
pub struct IndexSnapshot {
    generation: u64,
    built_at: Option<DateTime<Utc>>,
    analyzer: Analyzer,
    vocabulary: Vocabulary,
    matrix: TermWeightMatrix,
    /// Catalog order at build time; row `i` of the matrix belongs to `agents[i]`
    agents: Vec<AgentCard>,
}

impl IndexSnapshot {
    /// The empty index a recommender starts with.
    pub fn untrained(analyzer: Analyzer) -> Self {
        Self {
            generation: 0,
            built_at: None,
            analyzer,
            vocabulary: Vocabulary::new(),
            matrix: TermWeightMatrix::default(),
            agents: Vec::new(),
        }
    }

    /// Build a snapshot from the full catalog.
    ///
    /// An empty catalog yields an untrained snapshot carrying `generation`.
    pub fn build(profiles: &[AgentProfile], analyzer: Analyzer, generation: u64) -> Self {
        let documents: Vec<Vec<String>> = profiles
            .iter()
            .map(|p| analyzer.analyze(&p.document_text()))
            .collect();

        let vocabulary = Vocabulary::from_documents(&documents);
        let indexed: Vec<Vec<usize>> = documents.iter().map(|d| vocabulary.project(d)).collect();
        let matrix = TermWeightMatrix::fit(&indexed, vocabulary.len());

        let agents = profiles
            .iter()
            .map(|p| AgentCard {
                id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
            })
            .collect();

        Self {
            generation,
            built_at: Some(Utc::now()),
            analyzer,
            vocabulary,
            matrix,
            agents,
        }
    }

    /// True when at least one agent is indexed.
    pub fn is_trained(&self) -> bool {
        !self.agents.is_empty()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn built_at(&self) -> Option<DateTime<Utc>> {
        self.built_at
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Agents in catalog order.
    pub fn agents(&self) -> &[AgentCard] {
        &self.agents
    }

    /// Agents whose document produced no terms.
    pub fn empty_documents(&self) -> usize {
        (0..self.matrix.len())
            .filter(|&i| self.matrix.row(i).is_none_or(|r| r.is_zero()))
            .count()
    }

    /// Catalog position of an agent (first occurrence).
    pub fn position(&self, id: &AgentId) -> Option<usize> {
        self.agents.iter().position(|a| &a.id == id)
    }

    /// Display data for an agent.
    pub fn card(&self, id: &AgentId) -> Option<&AgentCard> {
        self.position(id).map(|i| &self.agents[i])
    }

    /// Cosine similarity of the query to every agent, in catalog order.
    pub fn score(&self, query: &str) -> Result<Vec<f32>, RecommendationError> {
        if !self.is_trained() {
            return Err(RecommendationError::UntrainedIndex);
        }

        let terms = self.analyzer.analyze(query);
        let projected = self.vocabulary.project(&terms);
        let query_vector = self.matrix.project(&projected);

        debug!(
            generation = self.generation,
            query_terms = terms.len(),
            known_terms = projected.len(),
            "Scoring query"
        );

        Ok(self.matrix.similarities(&query_vector))
    }

    /// Rank agents for a query.
    ///
    /// Zero-score agents are never returned. Ties keep catalog order.
    pub fn rank(
        &self,
        query: &str,
        limit: usize,
        exclude: Option<&AgentId>,
    ) -> Result<Vec<Recommendation>, RecommendationError> {
        let scores = self.score(query)?;
        Ok(self.rank_scores(&scores, limit, exclude))
    }

    pub(crate) fn rank_scores(
        &self,
        scores: &[f32],
        limit: usize,
        exclude: Option<&AgentId>,
    ) -> Vec<Recommendation> {
        let mut ranked: Vec<(usize, f32)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|&(i, score)| {
                score > 0.0 && exclude.is_none_or(|ex| &self.agents[i].id != ex)
            })
            .collect();

        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.truncate(limit);

        ranked
            .into_iter()
            .map(|(i, score)| Recommendation::new(self.agents[i].id.clone(), score))
            .collect()
    }

    /// Highest-weighted terms of an agent's document.
    ///
    /// Sorted by weight (highest first), ties by term text.
    pub fn top_terms(&self, id: &AgentId, n: usize) -> Vec<(String, f32)> {
        let Some(row) = self.position(id).and_then(|i| self.matrix.row(i)) else {
            return Vec::new();
        };

        let mut terms: Vec<(String, f32)> = row
            .entries()
            .iter()
            .filter_map(|&(idx, w)| self.vocabulary.term(idx).map(|t| (t.to_string(), w)))
            .collect();

        terms.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        terms.truncate(n);
        terms
    }
}
