//! Coordinate identity
//!
//! This module provides the versionless `ProjectRef`, the versioned
//! `ProjectVersionRef` and the artifact-level `ArtifactRef` used as edge targets.

pub mod artifact_ref;
pub mod project_ref;
pub mod version_ref;

pub use artifact_ref::ArtifactRef;
pub use project_ref::ProjectRef;
pub use version_ref::ProjectVersionRef;
