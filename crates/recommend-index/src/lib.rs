//! # recommend-index
//!
//! Agent recommendation index: maps a free-text query onto the most relevant
//! agent profiles of a dynamic catalog using tf-idf weighting and cosine
//! similarity.
//!
//! ## Features
//! - Fixed text analysis (diacritic folding, stop words, light stemming)
//! - Smoothed idf: ln((1 + N) / (1 + df)) + 1
//! - Unit-normalized sparse rows, so similarity is a dot product
//! - Snapshot isolation: rebuilds publish a new index with one pointer swap
//! - Catalog events coalesced into single rebuilds
//!
//! ## Example
//!
//! ```rust
//! use recommend_index::AgentRecommender;
//! use recommend_types::AgentProfile;
//!
//! let recommender = AgentRecommender::default();
//! recommender
//!     .rebuild(&[
//!         AgentProfile::new(1i64, "Coding Helper")
//!             .with_description("assists with code review and debugging"),
//!         AgentProfile::new(2i64, "Travel Planner")
//!             .with_description("helps plan trips and itineraries"),
//!     ])
//!     .unwrap();
//!
//! let best = recommender.best_match("help me debug a function").unwrap();
//! assert_eq!(best.agent_id.as_str(), "1");
//! ```

pub mod analyzer;
pub mod catalog;
pub mod error;
pub mod recommender;
pub mod snapshot;
pub mod types;
pub mod vocabulary;
pub mod weights;

pub use analyzer::{normalize, Analyzer};
pub use catalog::{
    spawn_catalog_listener, CatalogSource, FileCatalog, ListenerSummary, StaticCatalog,
};
pub use error::{CatalogSourceError, RecommendationError};
pub use recommender::AgentRecommender;
pub use snapshot::IndexSnapshot;
pub use types::{AgentCard, IndexStats, RebuildStats, Recommendation, SwitchAdvice};
pub use vocabulary::Vocabulary;
pub use weights::{smoothed_idf, SparseVector, TermWeightMatrix};
