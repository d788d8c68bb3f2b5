//! Catalog change notifications.

use serde::{Deserialize, Serialize};

use crate::profile::AgentId;

/// Emitted by the catalog owner after any change to the agent catalog.
///
/// Every variant leads to the same action on the recommender side: re-read
/// the catalog and rebuild the index once. The variant only informs logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "agent_id", rename_all = "snake_case")]
pub enum CatalogEvent {
    /// An agent was added
    Created(AgentId),
    /// An agent's name, description or instructions changed
    Updated(AgentId),
    /// An agent was removed
    Deleted(AgentId),
    /// The whole catalog was replaced (startup, bulk import)
    Reloaded,
}

impl CatalogEvent {
    /// Agent the event refers to, if any.
    pub fn agent_id(&self) -> Option<&AgentId> {
        match self {
            CatalogEvent::Created(id) | CatalogEvent::Updated(id) | CatalogEvent::Deleted(id) => {
                Some(id)
            }
            CatalogEvent::Reloaded => None,
        }
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            CatalogEvent::Created(_) => "created",
            CatalogEvent::Updated(_) => "updated",
            CatalogEvent::Deleted(_) => "deleted",
            CatalogEvent::Reloaded => "reloaded",
        }
    }
}
