//! A single edge declared by a project version

use std::collections::BTreeSet;
use std::fmt;

use crate::error::Result;
use crate::ident::{ArtifactRef, ProjectRef, ProjectVersionRef};
use crate::rel::RelationshipType;
use crate::scope::DependencyScope;
use crate::version::SingleVersion;

/// Directed edge from a declaring project version to a target artifact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRelationship {
    rel_type: RelationshipType,
    declaring: ProjectVersionRef,
    target: ArtifactRef,
    /// Position of the declaration within its section
    index: usize,
    /// Declared in a management section rather than as a concrete edge
    managed: bool,
    scope: Option<DependencyScope>,
    /// Owning plugin, for plugin-level dependencies
    plugin: Option<ProjectRef>,
    excludes: BTreeSet<ProjectRef>,
}

impl ProjectRelationship {
    fn build(
        rel_type: RelationshipType,
        declaring: ProjectVersionRef,
        target: ArtifactRef,
        index: usize,
        managed: bool,
    ) -> Self {
        Self {
            rel_type,
            declaring,
            target,
            index,
            managed,
            scope: None,
            plugin: None,
            excludes: BTreeSet::new(),
        }
    }

    /// A dependency edge with its scope and the projects it excludes beneath it
    pub fn dependency(
        declaring: ProjectVersionRef,
        target: ArtifactRef,
        scope: Option<DependencyScope>,
        index: usize,
        managed: bool,
        excludes: impl IntoIterator<Item = ProjectRef>,
    ) -> Self {
        Self {
            scope,
            excludes: excludes.into_iter().collect(),
            ..Self::build(RelationshipType::Dependency, declaring, target, index, managed)
        }
    }

    /// A build extension edge
    pub fn extension(
        declaring: ProjectVersionRef,
        target: ProjectVersionRef,
        index: usize,
    ) -> Self {
        Self::build(
            RelationshipType::Extension,
            declaring,
            ArtifactRef::jar(target),
            index,
            false,
        )
    }

    /// A build plugin edge
    pub fn plugin(
        declaring: ProjectVersionRef,
        target: ProjectVersionRef,
        index: usize,
        managed: bool,
    ) -> Self {
        Self::build(
            RelationshipType::Plugin,
            declaring,
            ArtifactRef::jar(target),
            index,
            managed,
        )
    }

    /// A dependency declared inside a plugin's configuration
    pub fn plugin_dependency(
        declaring: ProjectVersionRef,
        plugin: ProjectRef,
        target: ArtifactRef,
        index: usize,
        managed: bool,
    ) -> Self {
        Self {
            plugin: Some(plugin),
            ..Self::build(RelationshipType::PluginDep, declaring, target, index, managed)
        }
    }

    /// The parent descriptor edge; a project is its own terminal parent
    pub fn parent(declaring: ProjectVersionRef, target: ProjectVersionRef) -> Self {
        Self::build(
            RelationshipType::Parent,
            declaring,
            ArtifactRef::pom(target),
            0,
            false,
        )
    }

    /// A BOM import edge
    ///
    /// BOM imports sit in the management section but are structural, so they
    /// are recorded as concrete.
    pub fn bom(declaring: ProjectVersionRef, target: ProjectVersionRef, index: usize) -> Self {
        Self::build(
            RelationshipType::Bom,
            declaring,
            ArtifactRef::pom(target),
            index,
            false,
        )
    }

    pub fn rel_type(&self) -> RelationshipType {
        self.rel_type
    }

    pub fn declaring(&self) -> &ProjectVersionRef {
        &self.declaring
    }

    /// The target as a project version
    pub fn target(&self) -> &ProjectVersionRef {
        self.target.as_project_version_ref()
    }

    pub fn target_artifact(&self) -> &ArtifactRef {
        &self.target
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_managed(&self) -> bool {
        self.managed
    }

    /// Declared scope, if this is a dependency edge that declared one
    pub fn scope(&self) -> Option<DependencyScope> {
        self.scope
    }

    /// Declared scope, defaulting to compile
    pub fn effective_scope(&self) -> DependencyScope {
        self.scope.unwrap_or(DependencyScope::Compile)
    }

    /// The plugin that declares this edge, for plugin-level dependencies
    pub fn owning_plugin(&self) -> Option<&ProjectRef> {
        self.plugin.as_ref()
    }

    /// Projects that must not be reached through this edge
    pub fn excludes(&self) -> &BTreeSet<ProjectRef> {
        &self.excludes
    }

    /// True for the parent edge of a project that has no parent
    pub fn is_terminal_parent(&self) -> bool {
        self.rel_type == RelationshipType::Parent && self.declaring == *self.target()
    }

    /// Copy of this edge with the target pinned to `version`
    pub fn select_target(&self, version: &SingleVersion) -> Result<Self> {
        let selected = self.target().select_version(version)?;
        Ok(Self {
            target: self.target.with_version_ref(selected),
            ..self.clone()
        })
    }
}

impl fmt::Display for ProjectRelationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -[{}]-> {}", self.declaring, self.rel_type, self.target)?;
        if let Some(scope) = self.scope {
            write!(f, " ({})", scope)?;
        }
        if self.managed {
            f.write_str(" [managed]")?;
        }
        Ok(())
    }
}
