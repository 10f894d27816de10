//! artifact-graph - coordinate identity and relationship filtering for
//! build artifact dependency graphs
//!
//! ## Architecture
//!
//! ```text
//! version  → ident (ProjectRef, ProjectVersionRef, ArtifactRef)
//!          → rel (ProjectRelationship)
//!          → filter (ProjectRelationshipFilter) ← config (TOML)
//! ```
//!
//! A graph builder walks relationships outward from a root project. At each
//! node it asks the current filter whether an edge should be followed, and
//! for every followed edge it derives the filter that governs the target's
//! own edges.

pub mod config;
pub mod error;
pub mod filter;
pub mod ident;
pub mod rel;
pub mod scope;
pub mod version;

pub use config::{FilterConfig, TraversalConfig};
pub use error::{GraphError, Result};
pub use filter::{
    AndFilter, DependencyFilter, OrFilter, ProjectRelationshipFilter, RelationshipFilter,
    TypedFilter, TypedFilterKind, BOM_FILTER, PARENT_FILTER,
};
pub use ident::{ArtifactRef, ProjectRef, ProjectVersionRef};
pub use rel::{ProjectRelationship, RelationshipType};
pub use scope::{DependencyScope, ScopeTransitivity};
pub use version::{CompoundVersion, RangeVersion, SingleVersion, VersionSpec};
