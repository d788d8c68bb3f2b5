//! Catalog ownership seam and rebuild-on-change listener.
//!
//! The catalog owner emits a [`CatalogEvent`] after every create, edit or
//! delete. A single consumer turns those events into rebuilds, so no admin
//! code path calls `rebuild` directly.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use recommend_types::{AgentId, AgentProfile, CatalogEvent};

use crate::error::CatalogSourceError;
use crate::recommender::AgentRecommender;

/// Anything that can produce the full, current agent catalog.
pub trait CatalogSource: Send + Sync {
    /// Load every profile, in catalog order.
    fn load_profiles(&self) -> Result<Vec<AgentProfile>, CatalogSourceError>;
}

/// In-memory catalog owner.
///
/// Mutations return the event that should be sent to the recommender.
#[derive(Debug, Default)]
pub struct StaticCatalog {
    profiles: RwLock<Vec<AgentProfile>>,
}

impl StaticCatalog {
    pub fn new(profiles: Vec<AgentProfile>) -> Self {
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    /// Insert a new profile or replace the one with the same id.
    pub fn upsert(&self, profile: AgentProfile) -> CatalogEvent {
        let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        let id = profile.id.clone();
        match profiles.iter_mut().find(|p| p.id == id) {
            Some(existing) => {
                *existing = profile;
                CatalogEvent::Updated(id)
            }
            None => {
                profiles.push(profile);
                CatalogEvent::Created(id)
            }
        }
    }

    /// Remove a profile. Returns `None` if the id is unknown.
    pub fn remove(&self, id: &AgentId) -> Option<CatalogEvent> {
        let mut profiles = self.profiles.write().unwrap_or_else(PoisonError::into_inner);
        let before = profiles.len();
        profiles.retain(|p| &p.id != id);
        (profiles.len() != before).then(|| CatalogEvent::Deleted(id.clone()))
    }

    /// Replace the whole catalog.
    pub fn replace(&self, new_profiles: Vec<AgentProfile>) -> CatalogEvent {
        *self.profiles.write().unwrap_or_else(PoisonError::into_inner) = new_profiles;
        CatalogEvent::Reloaded
    }

    pub fn len(&self) -> usize {
        self.profiles.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CatalogSource for StaticCatalog {
    fn load_profiles(&self) -> Result<Vec<AgentProfile>, CatalogSourceError> {
        Ok(self
            .profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }
}

/// Catalog read from a JSON array of profiles on disk.
///
/// The file is re-read on every load, so edits made by an admin tool are
/// picked up by the next catalog event.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalog {
    fn load_profiles(&self) -> Result<Vec<AgentProfile>, CatalogSourceError> {
        let json = fs::read_to_string(&self.path).map_err(|e| {
            CatalogSourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })?;
        AgentProfile::parse_catalog(&json).map_err(|e| {
            CatalogSourceError::Unavailable(format!("{}: {}", self.path.display(), e))
        })
    }
}

/// Counters reported when a listener exits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListenerSummary {
    /// Events received
    pub events: u64,
    /// Rebuilds performed (bursts of events share one rebuild)
    pub rebuilds: u64,
    /// Rebuilds skipped because the catalog could not be loaded
    pub failures: u64,
}

/// Consume catalog events and rebuild the recommender.
///
/// Every event already queued when a rebuild starts is folded into that
/// rebuild. The task ends once all senders are dropped.
pub fn spawn_catalog_listener<S>(
    recommender: Arc<AgentRecommender>,
    source: Arc<S>,
    mut events: mpsc::Receiver<CatalogEvent>,
) -> JoinHandle<ListenerSummary>
where
    S: CatalogSource + 'static,
{
    tokio::spawn(async move {
        let mut summary = ListenerSummary::default();

        while let Some(mut event) = events.recv().await {
            summary.events += 1;
            let mut coalesced = 1u64;
            while let Ok(next) = events.try_recv() {
                summary.events += 1;
                coalesced += 1;
                event = next;
            }

            match recommender.apply_event(&event, source.as_ref()) {
                Ok(stats) => {
                    summary.rebuilds += 1;
                    debug!(
                        coalesced,
                        generation = stats.generation,
                        agent_count = stats.agent_count,
                        "Rebuilt after catalog change"
                    );
                }
                Err(e) => {
                    summary.failures += 1;
                    warn!(coalesced, error = %e, "Rebuild after catalog change failed");
                }
            }
        }

        info!(
            events = summary.events,
            rebuilds = summary.rebuilds,
            failures = summary.failures,
            "Catalog listener stopped"
        );
        summary
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coder() -> AgentProfile {
        AgentProfile::new("c", "Coding Helper").with_description("code review and debugging")
    }

    fn planner() -> AgentProfile {
        AgentProfile::new("t", "Travel Planner").with_description("trips and itineraries")
    }

    #[test]
    fn test_upsert_emits_created_then_updated() {
        let catalog = StaticCatalog::default();
        assert!(catalog.is_empty());
        assert_eq!(catalog.upsert(coder()), CatalogEvent::Created(AgentId::from("c")));
        assert_eq!(
            catalog.upsert(coder().with_instructions("be brief")),
            CatalogEvent::Updated(AgentId::from("c"))
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.load_profiles().unwrap()[0].instructions, "be brief");
    }

    #[test]
    fn test_remove() {
        let catalog = StaticCatalog::new(vec![coder(), planner()]);
        assert_eq!(
            catalog.remove(&AgentId::from("c")),
            Some(CatalogEvent::Deleted(AgentId::from("c")))
        );
        assert_eq!(catalog.remove(&AgentId::from("c")), None);
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_replace_preserves_order() {
        let catalog = StaticCatalog::new(vec![coder()]);
        assert_eq!(catalog.replace(vec![planner(), coder()]), CatalogEvent::Reloaded);
        let ids: Vec<String> = catalog
            .load_profiles()
            .unwrap()
            .into_iter()
            .map(|p| p.id.to_string())
            .collect();
        assert_eq!(ids, vec!["t", "c"]);
    }

    #[test]
    fn test_file_catalog_loads_profiles() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("agents.json");
        fs::write(
            &path,
            r#"[{"id": 1, "name": "Coding Helper"}, {"id": "t", "name": "Travel Planner"}]"#,
        )
        .unwrap();

        let profiles = FileCatalog::new(&path).load_profiles().unwrap();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[1].id, AgentId::from("t"));
    }

    #[test]
    fn test_file_catalog_missing_file() {
        let result = FileCatalog::new("/nonexistent/agents.json").load_profiles();
        match result {
            Err(CatalogSourceError::Unavailable(msg)) => assert!(msg.contains("agents.json")),
            other => panic!("Expected Unavailable, got {:?}", other),
        }
    }

    #[test]
    fn test_file_catalog_invalid_json() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(FileCatalog::new(&path).load_profiles().is_err());
    }

    #[tokio::test]
    async fn test_listener_coalesces_queued_events() {
        let recommender = Arc::new(AgentRecommender::default());
        let catalog = Arc::new(StaticCatalog::default());
        let (tx, rx) = mpsc::channel(8);

        tx.send(catalog.upsert(coder())).await.unwrap();
        tx.send(catalog.upsert(planner())).await.unwrap();
        tx.send(catalog.remove(&AgentId::from("c")).unwrap())
            .await
            .unwrap();
        drop(tx);

        let summary = spawn_catalog_listener(recommender.clone(), catalog, rx)
            .await
            .unwrap();

        assert_eq!(summary.events, 3);
        assert_eq!(summary.rebuilds, 1);
        assert_eq!(summary.failures, 0);
        assert_eq!(recommender.stats().agent_count, 1);
        assert!(recommender.best_match("debugging").is_none());
        assert!(recommender.best_match("itineraries").is_some());
    }

    #[tokio::test]
    async fn test_listener_counts_failures() {
        struct Offline;
        impl CatalogSource for Offline {
            fn load_profiles(&self) -> Result<Vec<AgentProfile>, CatalogSourceError> {
                Err(CatalogSourceError::Unavailable("offline".into()))
            }
        }

        let recommender = Arc::new(AgentRecommender::default());
        let (tx, rx) = mpsc::channel(1);
        tx.send(CatalogEvent::Reloaded).await.unwrap();
        drop(tx);

        let summary = spawn_catalog_listener(recommender.clone(), Arc::new(Offline), rx)
            .await
            .unwrap();
        assert_eq!(summary.failures, 1);
        assert_eq!(summary.rebuilds, 0);
        assert!(!recommender.stats().trained);
    }
}
