//! Typed graph edges
//!
//! Edges are produced by the descriptor-parsing layer and are read-only to
//! the filter engine.

pub mod relationship;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use relationship::ProjectRelationship;

/// Kind of edge between two project versions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipType {
    Parent,
    Bom,
    Dependency,
    Plugin,
    PluginDep,
    Extension,
}

impl RelationshipType {
    /// Every relationship type
    pub const ALL: [RelationshipType; 6] = [
        RelationshipType::Parent,
        RelationshipType::Bom,
        RelationshipType::Dependency,
        RelationshipType::Plugin,
        RelationshipType::PluginDep,
        RelationshipType::Extension,
    ];

    pub fn name(self) -> &'static str {
        match self {
            RelationshipType::Parent => "PARENT",
            RelationshipType::Bom => "BOM",
            RelationshipType::Dependency => "DEPENDENCY",
            RelationshipType::Plugin => "PLUGIN",
            RelationshipType::PluginDep => "PLUGIN_DEP",
            RelationshipType::Extension => "EXTENSION",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
