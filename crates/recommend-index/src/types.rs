//! Result and status types returned by the recommender.

use chrono::{DateTime, Utc};
use serde::Serialize;

use recommend_types::AgentId;

/// One ranked suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Suggested agent
    pub agent_id: AgentId,
    /// Cosine similarity to the query, in (0, 1]
    pub score: f32,
}

impl Recommendation {
    pub fn new(agent_id: AgentId, score: f32) -> Self {
        Self { agent_id, score }
    }
}

/// Whether the user should be pointed at a different agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwitchAdvice {
    /// True when a different agent beats the current one by more than the threshold
    pub should_switch: bool,
    /// Best-scoring agent for the query, if any agent matched at all
    pub recommended: Option<AgentId>,
    /// Best score minus the current agent's score
    pub confidence: f32,
}

impl SwitchAdvice {
    /// Advice when nothing matched: stay put.
    pub fn stay() -> Self {
        Self {
            should_switch: false,
            recommended: None,
            confidence: 0.0,
        }
    }
}

/// Display data for an agent, copied into the snapshot at build time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentCard {
    pub id: AgentId,
    pub name: String,
    pub description: String,
}

/// Outcome of a rebuild.
#[derive(Debug, Clone, Serialize)]
pub struct RebuildStats {
    /// Generation number of the published snapshot
    pub generation: u64,
    /// Agents indexed
    pub agent_count: usize,
    /// Distinct terms across all documents
    pub vocabulary_size: usize,
    /// Agents whose document produced no terms
    pub empty_documents: usize,
    /// Wall time spent building, in milliseconds
    pub elapsed_ms: u64,
    /// False when a newer snapshot was already current and this one was dropped
    pub published: bool,
}

/// Current index status.
#[derive(Debug, Clone, Serialize)]
pub struct IndexStats {
    /// False until a rebuild with at least one agent has been published
    pub trained: bool,
    pub agent_count: usize,
    pub vocabulary_size: usize,
    /// 0 for the initial untrained index; never decreases
    pub generation: u64,
    /// When the current snapshot was built
    pub built_at: Option<DateTime<Utc>>,
}
