//! Agent profile types.
//!
//! An [`AgentProfile`] is the fixed-shape record the catalog owner hands to
//! the recommender. Every text field is total: missing or non-text values
//! deserialize to the empty string instead of failing.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of an agent in the external catalog.
///
/// Catalogs may key agents by integer or by text; both are carried as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct AgentId(String);

impl AgentId {
    /// Create an identifier from any text.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AgentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for AgentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i64> for AgentId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for AgentId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for AgentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = match Value::deserialize(deserializer)? {
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            _ => String::new(),
        };
        Ok(Self(id))
    }
}

/// Text fields of a profile that feed the recommendation document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentField {
    Name,
    Description,
    Instructions,
}

impl AgentField {
    /// All document fields, in the order they are concatenated.
    pub const ALL: [AgentField; 3] = [
        AgentField::Name,
        AgentField::Description,
        AgentField::Instructions,
    ];
}

/// A named assistant configuration from the agent catalog.
///
/// Catalog records may carry the instructions as `instructions`,
/// `system_prompt`, or both; a non-empty `instructions` wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "CatalogRecord")]
pub struct AgentProfile {
    /// Catalog identifier
    pub id: AgentId,

    /// Display name
    pub name: String,

    /// Short description of what the agent is good at
    pub description: String,

    /// Behavioral instructions (system prompt)
    pub instructions: String,
}

/// Wire shape of a catalog record before the instruction keys are merged.
#[derive(Deserialize)]
struct CatalogRecord {
    #[serde(default)]
    id: AgentId,
    #[serde(default, deserialize_with = "lenient_text")]
    name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    description: String,
    #[serde(default, deserialize_with = "lenient_text")]
    instructions: String,
    #[serde(default, deserialize_with = "lenient_text")]
    system_prompt: String,
}

impl From<CatalogRecord> for AgentProfile {
    fn from(record: CatalogRecord) -> Self {
        let instructions = if record.instructions.is_empty() {
            record.system_prompt
        } else {
            record.instructions
        };
        Self {
            id: record.id,
            name: record.name,
            description: record.description,
            instructions,
        }
    }
}

impl AgentProfile {
    /// Create a profile with an id and name; other fields start empty.
    pub fn new(id: impl Into<AgentId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Read a text field. Never fails; absent fields are empty.
    pub fn field(&self, field: AgentField) -> &str {
        match field {
            AgentField::Name => &self.name,
            AgentField::Description => &self.description,
            AgentField::Instructions => &self.instructions,
        }
    }

    /// Raw (un-normalized) document text: name, description and instructions
    /// joined by single spaces.
    pub fn document_text(&self) -> String {
        AgentField::ALL
            .iter()
            .map(|f| self.field(*f))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse a JSON array of profiles.
    pub fn parse_catalog(json: &str) -> Result<Vec<AgentProfile>, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Accept any JSON value; only strings survive, everything else becomes "".
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        _ => Ok(String::new()),
    }
}
