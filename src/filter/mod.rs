//! Relationship filters
//!
//! A filter decides whether a traversal follows an edge (`accept`) and, for an
//! edge it followed, which filter applies to the edges leaving that edge's
//! target (`child_filter`). Filters are immutable: narrowing the scope,
//! accumulating exclusions or cutting off a subtree always yields a new
//! filter, so one filter value can be shared by any number of traversal
//! branches.
//!
//! ```text
//! root filter ──accept(e1)──► follow e1
//!             ──child_filter(e1)──► filter for e1.target
//! ```

pub mod aggregate;
pub mod dependency;
pub mod typed;

use std::collections::BTreeSet;
use std::fmt;

use crate::rel::{ProjectRelationship, RelationshipType};

pub use aggregate::{AndFilter, OrFilter};
pub use dependency::DependencyFilter;
pub use typed::{TypedFilter, TypedFilterKind, BOM_FILTER, PARENT_FILTER};

/// Capabilities every filter variant provides
pub trait RelationshipFilter {
    /// Should the traversal follow this edge
    fn accept(&self, rel: &ProjectRelationship) -> bool;

    /// Filter for the edges leaving `parent`'s target
    fn child_filter(&self, parent: &ProjectRelationship) -> ProjectRelationshipFilter;

    /// Append a description of this filter's constraints to `buf`
    fn render(&self, buf: &mut String);

    /// Relationship types this filter can ever accept
    fn allowed_types(&self) -> BTreeSet<RelationshipType>;
}

/// The closed set of filter variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectRelationshipFilter {
    /// Accepts nothing; its child is itself
    None,
    /// Accepts everything; its child is itself
    Any,
    Dependency(DependencyFilter),
    Typed(TypedFilter),
    And(AndFilter),
    Or(OrFilter),
}

impl ProjectRelationshipFilter {
    pub fn none() -> Self {
        ProjectRelationshipFilter::None
    }

    pub fn any() -> Self {
        ProjectRelationshipFilter::Any
    }

    /// Default dependency filter: test scope, maven transitivity, concrete only
    pub fn dependencies() -> Self {
        ProjectRelationshipFilter::Dependency(DependencyFilter::new())
    }

    pub fn extension() -> Self {
        ProjectRelationshipFilter::Typed(TypedFilter::extension())
    }

    pub fn extension_only() -> Self {
        ProjectRelationshipFilter::Typed(TypedFilter::extension_only())
    }

    pub fn bom() -> Self {
        ProjectRelationshipFilter::Typed(BOM_FILTER)
    }

    pub fn parent() -> Self {
        ProjectRelationshipFilter::Typed(PARENT_FILTER)
    }

    /// Conjunction of `filters`, evaluated in order
    pub fn and(filters: impl IntoIterator<Item = ProjectRelationshipFilter>) -> Self {
        ProjectRelationshipFilter::And(AndFilter::new(filters))
    }

    /// Disjunction of `filters`, short-circuiting in order
    pub fn or(filters: impl IntoIterator<Item = ProjectRelationshipFilter>) -> Self {
        ProjectRelationshipFilter::Or(OrFilter::new(filters))
    }
}

impl RelationshipFilter for ProjectRelationshipFilter {
    fn accept(&self, rel: &ProjectRelationship) -> bool {
        match self {
            ProjectRelationshipFilter::None => false,
            ProjectRelationshipFilter::Any => true,
            ProjectRelationshipFilter::Dependency(f) => f.accept(rel),
            ProjectRelationshipFilter::Typed(f) => f.accept(rel),
            ProjectRelationshipFilter::And(f) => f.accept(rel),
            ProjectRelationshipFilter::Or(f) => f.accept(rel),
        }
    }

    fn child_filter(&self, parent: &ProjectRelationship) -> ProjectRelationshipFilter {
        match self {
            ProjectRelationshipFilter::None | ProjectRelationshipFilter::Any => self.clone(),
            ProjectRelationshipFilter::Dependency(f) => f.child_filter(parent),
            ProjectRelationshipFilter::Typed(f) => f.child_filter(parent),
            ProjectRelationshipFilter::And(f) => f.child_filter(parent),
            ProjectRelationshipFilter::Or(f) => f.child_filter(parent),
        }
    }

    fn render(&self, buf: &mut String) {
        match self {
            ProjectRelationshipFilter::None => {
                separate(buf);
                buf.push_str("NONE");
            }
            ProjectRelationshipFilter::Any => {
                separate(buf);
                buf.push_str("ANY");
            }
            ProjectRelationshipFilter::Dependency(f) => f.render(buf),
            ProjectRelationshipFilter::Typed(f) => f.render(buf),
            ProjectRelationshipFilter::And(f) => f.render(buf),
            ProjectRelationshipFilter::Or(f) => f.render(buf),
        }
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        match self {
            ProjectRelationshipFilter::None => BTreeSet::new(),
            ProjectRelationshipFilter::Any => RelationshipType::ALL.into_iter().collect(),
            ProjectRelationshipFilter::Dependency(f) => f.allowed_types(),
            ProjectRelationshipFilter::Typed(f) => f.allowed_types(),
            ProjectRelationshipFilter::And(f) => f.allowed_types(),
            ProjectRelationshipFilter::Or(f) => f.allowed_types(),
        }
    }
}

impl fmt::Display for ProjectRelationshipFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = String::new();
        self.render(&mut buf);
        f.write_str(&buf)
    }
}

impl From<DependencyFilter> for ProjectRelationshipFilter {
    fn from(filter: DependencyFilter) -> Self {
        ProjectRelationshipFilter::Dependency(filter)
    }
}

impl From<TypedFilter> for ProjectRelationshipFilter {
    fn from(filter: TypedFilter) -> Self {
        ProjectRelationshipFilter::Typed(filter)
    }
}

impl From<AndFilter> for ProjectRelationshipFilter {
    fn from(filter: AndFilter) -> Self {
        ProjectRelationshipFilter::And(filter)
    }
}

impl From<OrFilter> for ProjectRelationshipFilter {
    fn from(filter: OrFilter) -> Self {
        ProjectRelationshipFilter::Or(filter)
    }
}

/// Separate a rendering from whatever `buf` already holds
pub(crate) fn separate(buf: &mut String) {
    if !buf.is_empty() {
        buf.push(' ');
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use crate::scope::DependencyScope;

    #[test]
    fn test_none_filter_is_absorbing() {
        let none = ProjectRelationshipFilter::none();
        let edges = [
            dep("g:a:1", DependencyScope::Compile),
            extension("g:ext:1"),
            bom("g:bom:1"),
            parent("g:parent:1"),
        ];
        for edge in &edges {
            assert!(!none.accept(edge));
            assert_eq!(none.child_filter(edge), ProjectRelationshipFilter::None);
        }
        assert!(none.allowed_types().is_empty());
        assert_eq!(none.to_string(), "NONE");
    }

    #[test]
    fn test_any_filter_accepts_everything() {
        let any = ProjectRelationshipFilter::any();
        let edge = plugin("g:plugin:1");
        assert!(any.accept(&edge));
        assert_eq!(any.child_filter(&edge), ProjectRelationshipFilter::Any);
        assert_eq!(any.allowed_types().len(), RelationshipType::ALL.len());
    }

    #[test]
    fn test_render_separates_from_existing_text() {
        let mut buf = String::from("filter:");
        ProjectRelationshipFilter::any().render(&mut buf);
        assert_eq!(buf, "filter: ANY");
    }

    #[test]
    fn test_filters_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ProjectRelationshipFilter>();
    }
}
