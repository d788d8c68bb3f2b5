//! # recommend-types
//!
//! Shared domain types for the agent recommendation engine.
//!
//! This crate defines the data structures exchanged between the catalog owner,
//! the recommendation index, and its callers:
//! - Agent profiles: fixed-shape catalog records with empty-string defaults
//! - Catalog events: notifications that the agent catalog changed
//! - Settings: layered configuration for the recommender and its analyzer
//!
//! ## Usage
//!
//! ```rust
//! use recommend_types::AgentProfile;
//!
//! let profile = AgentProfile::new("1", "Coding Helper")
//!     .with_description("assists with code review and debugging");
//! assert_eq!(profile.instructions, "");
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod profile;

pub use config::{AnalyzerSettings, RecommenderSettings, Settings};
pub use error::ConfigError;
pub use event::CatalogEvent;
pub use profile::{AgentField, AgentId, AgentProfile};
