//! Structural single-type filters
//!
//! Each accepts edges of one primary relationship type, optionally a second
//! pass-through type, and differs only in the filter it hands down:
//!
//! | kind           | accepts              | child                      |
//! |----------------|----------------------|----------------------------|
//! | extension      | EXTENSION, DEPENDENCY| runtime dependency filter  |
//! | extension-only | EXTENSION            | none                       |
//! | bom            | BOM                  | itself                     |
//! | parent         | PARENT               | itself                     |
//!
//! All of them take concrete edges only.

use std::collections::BTreeSet;

use tracing::trace;

use super::{separate, DependencyFilter, ProjectRelationshipFilter, RelationshipFilter};
use crate::rel::{ProjectRelationship, RelationshipType};
use crate::scope::DependencyScope;

/// BOM imports chain through further BOM imports
pub const BOM_FILTER: TypedFilter = TypedFilter::bom();

/// Parent descriptors chain through further parents
pub const PARENT_FILTER: TypedFilter = TypedFilter::parent();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypedFilterKind {
    Extension,
    ExtensionOnly,
    Bom,
    Parent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypedFilter {
    kind: TypedFilterKind,
    primary: RelationshipType,
    /// Also accepted, e.g. dependencies declared by an extension's descriptor
    secondary: Option<RelationshipType>,
    include_managed: bool,
    include_concrete: bool,
}

impl TypedFilter {
    const fn concrete(
        kind: TypedFilterKind,
        primary: RelationshipType,
        secondary: Option<RelationshipType>,
    ) -> Self {
        Self {
            kind,
            primary,
            secondary,
            include_managed: false,
            include_concrete: true,
        }
    }

    /// Extensions, plus the dependencies their descriptors declare
    pub const fn extension() -> Self {
        Self::concrete(
            TypedFilterKind::Extension,
            RelationshipType::Extension,
            Some(RelationshipType::Dependency),
        )
    }

    /// Direct extensions only; nothing beneath them is resolved
    pub const fn extension_only() -> Self {
        Self::concrete(TypedFilterKind::ExtensionOnly, RelationshipType::Extension, None)
    }

    pub const fn bom() -> Self {
        Self::concrete(TypedFilterKind::Bom, RelationshipType::Bom, None)
    }

    pub const fn parent() -> Self {
        Self::concrete(TypedFilterKind::Parent, RelationshipType::Parent, None)
    }

    pub fn kind(&self) -> TypedFilterKind {
        self.kind
    }

    pub fn primary_type(&self) -> RelationshipType {
        self.primary
    }

    pub fn secondary_type(&self) -> Option<RelationshipType> {
        self.secondary
    }

    pub fn includes_managed(&self) -> bool {
        self.include_managed
    }

    pub fn includes_concrete(&self) -> bool {
        self.include_concrete
    }

    fn label(&self) -> &'static str {
        match self.kind {
            TypedFilterKind::Extension => "EXTENSIONS",
            TypedFilterKind::ExtensionOnly => "EXTENSIONS ONLY",
            TypedFilterKind::Bom => "BOM",
            TypedFilterKind::Parent => "PARENTS",
        }
    }
}

impl RelationshipFilter for TypedFilter {
    fn accept(&self, rel: &ProjectRelationship) -> bool {
        let rel_type = rel.rel_type();
        if rel_type != self.primary && Some(rel_type) != self.secondary {
            return false;
        }

        if rel.is_managed() && !self.include_managed {
            trace!("Rejected {}: {} takes no managed edges", rel, self.label());
            return false;
        }
        if !rel.is_managed() && !self.include_concrete {
            trace!("Rejected {}: {} takes no concrete edges", rel, self.label());
            return false;
        }

        true
    }

    fn child_filter(&self, _parent: &ProjectRelationship) -> ProjectRelationshipFilter {
        match self.kind {
            TypedFilterKind::Extension => {
                DependencyFilter::scoped(DependencyScope::Runtime).into()
            }
            TypedFilterKind::ExtensionOnly => ProjectRelationshipFilter::None,
            TypedFilterKind::Bom | TypedFilterKind::Parent => {
                ProjectRelationshipFilter::Typed(*self)
            }
        }
    }

    fn render(&self, buf: &mut String) {
        separate(buf);
        buf.push_str(self.label());
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        let mut types = BTreeSet::from([self.primary]);
        types.extend(self.secondary);
        types
    }
}
