//! AND / OR combinations of filters
//!
//! Both keep their member order, and both derive a child of their own kind
//! whose members are the members' children, so repeated descent keeps the
//! same combination semantics.

use std::collections::BTreeSet;

use tracing::trace;

use super::{separate, ProjectRelationshipFilter, RelationshipFilter};
use crate::rel::{ProjectRelationship, RelationshipType};

fn derive_children(
    filters: &[ProjectRelationshipFilter],
    parent: &ProjectRelationship,
) -> Vec<ProjectRelationshipFilter> {
    filters.iter().map(|f| f.child_filter(parent)).collect()
}

fn render_joined(filters: &[ProjectRelationshipFilter], operator: &str, buf: &mut String) {
    separate(buf);

    let parts: Vec<String> = filters.iter().map(|f| f.to_string()).collect();
    buf.push('[');
    buf.push_str(&parts.join(operator));
    buf.push(']');
}

/// Accepts an edge only if every member accepts it; no members accepts all
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AndFilter {
    filters: Vec<ProjectRelationshipFilter>,
}

impl AndFilter {
    pub fn new(filters: impl IntoIterator<Item = ProjectRelationshipFilter>) -> Self {
        Self {
            filters: filters.into_iter().collect(),
        }
    }

    pub fn filters(&self) -> &[ProjectRelationshipFilter] {
        &self.filters
    }
}

impl RelationshipFilter for AndFilter {
    fn accept(&self, rel: &ProjectRelationship) -> bool {
        self.filters.iter().all(|f| f.accept(rel))
    }

    fn child_filter(&self, parent: &ProjectRelationship) -> ProjectRelationshipFilter {
        ProjectRelationshipFilter::And(AndFilter {
            filters: derive_children(&self.filters, parent),
        })
    }

    fn render(&self, buf: &mut String) {
        render_joined(&self.filters, " && ", buf);
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        let all: BTreeSet<RelationshipType> = RelationshipType::ALL.into_iter().collect();
        self.filters.iter().fold(all, |acc, f| {
            acc.intersection(&f.allowed_types()).copied().collect()
        })
    }
}

/// Accepts an edge if any member accepts it, trying members in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrFilter {
    filters: Vec<ProjectRelationshipFilter>,
}

impl OrFilter {
    pub fn new(filters: impl IntoIterator<Item = ProjectRelationshipFilter>) -> Self {
        Self {
            filters: filters.into_iter().collect(),
        }
    }

    pub fn filters(&self) -> &[ProjectRelationshipFilter] {
        &self.filters
    }
}

impl RelationshipFilter for OrFilter {
    fn accept(&self, rel: &ProjectRelationship) -> bool {
        match self.filters.iter().find(|f| f.accept(rel)) {
            Some(filter) => {
                trace!("Accepted {} by sub-filter {}", rel, filter);
                true
            }
            None => false,
        }
    }

    fn child_filter(&self, parent: &ProjectRelationship) -> ProjectRelationshipFilter {
        ProjectRelationshipFilter::Or(OrFilter {
            filters: derive_children(&self.filters, parent),
        })
    }

    fn render(&self, buf: &mut String) {
        render_joined(&self.filters, " || ", buf);
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        self.filters.iter().flat_map(|f| f.allowed_types()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::test_support::*;
    use crate::filter::{DependencyFilter, TypedFilter, BOM_FILTER};
    use crate::scope::DependencyScope;

    #[test]
    fn test_empty_and_accepts_everything() {
        let filter = AndFilter::default();
        assert!(filter.accept(&dep("g:a:1", DependencyScope::Test)));
        assert!(filter.accept(&bom("g:bom:1")));
        assert!(filter.accept(&plugin("g:plugin:1")));
        assert_eq!(filter.allowed_types().len(), RelationshipType::ALL.len());
    }

    #[test]
    fn test_empty_or_accepts_nothing() {
        let filter = OrFilter::default();
        assert!(!filter.accept(&dep("g:a:1", DependencyScope::Test)));
        assert!(filter.allowed_types().is_empty());
    }

    #[test]
    fn test_and_requires_every_member() {
        let filter = AndFilter::new([
            ProjectRelationshipFilter::dependencies(),
            DependencyFilter::scoped(DependencyScope::Compile).into(),
        ]);
        assert!(filter.accept(&dep("g:a:1", DependencyScope::Compile)));
        assert!(!filter.accept(&dep("g:a:1", DependencyScope::Test)));
        assert!(!filter.accept(&extension("g:ext:1")));
    }

    #[test]
    fn test_or_accepts_when_any_member_does() {
        let filter =
            OrFilter::new([ProjectRelationshipFilter::extension_only(), BOM_FILTER.into()]);
        assert!(filter.accept(&extension("g:ext:1")));
        assert!(filter.accept(&bom("g:bom:1")));
        assert!(!filter.accept(&parent("g:parent:1")));
        assert!(!filter.accept(&dep("g:a:1", DependencyScope::Compile)));
    }

    #[test]
    fn test_or_outcome_is_order_independent() {
        let members = [
            ProjectRelationshipFilter::extension_only(),
            ProjectRelationshipFilter::bom(),
            ProjectRelationshipFilter::dependencies(),
        ];
        let forward = OrFilter::new(members.clone());
        let backward = OrFilter::new(members.into_iter().rev());

        for edge in [
            extension("g:ext:1"),
            bom("g:bom:1"),
            dep("g:a:1", DependencyScope::Runtime),
            parent("g:parent:1"),
            plugin("g:plugin:1"),
        ] {
            assert_eq!(forward.accept(&edge), backward.accept(&edge), "{}", edge);
        }
    }

    #[test]
    fn test_or_child_is_or_of_member_children() {
        let filter = OrFilter::new([
            ProjectRelationshipFilter::extension_only(),
            ProjectRelationshipFilter::bom(),
        ]);
        let edge = extension("g:ext:1");

        let expected = ProjectRelationshipFilter::Or(OrFilter::new([
            ProjectRelationshipFilter::None,
            ProjectRelationshipFilter::bom(),
        ]));
        assert_eq!(filter.child_filter(&edge), expected);
    }

    #[test]
    fn test_and_child_keeps_arity_and_kind() {
        let filter = AndFilter::new([
            ProjectRelationshipFilter::dependencies(),
            ProjectRelationshipFilter::any(),
            TypedFilter::extension().into(),
        ]);
        let child = filter.child_filter(&dep("g:a:1", DependencyScope::Compile));
        match child {
            ProjectRelationshipFilter::And(and) => {
                assert_eq!(and.filters().len(), 3);
                assert!(matches!(and.filters()[0], ProjectRelationshipFilter::Dependency(_)));
                assert_eq!(and.filters()[1], ProjectRelationshipFilter::Any);
            }
            other => panic!("expected an AND filter, got {}", other),
        }
    }

    #[test]
    fn test_nested_combinators_keep_their_semantics() {
        let filter = ProjectRelationshipFilter::or([
            ProjectRelationshipFilter::and([
                ProjectRelationshipFilter::dependencies(),
                DependencyFilter::scoped(DependencyScope::Compile).into(),
            ]),
            ProjectRelationshipFilter::bom(),
        ]);

        let child = filter.child_filter(&dep("g:a:1", DependencyScope::Compile));
        let grandchild = child.child_filter(&dep("g:b:1", DependencyScope::Compile));
        match grandchild {
            ProjectRelationshipFilter::Or(or) => {
                assert!(matches!(or.filters()[0], ProjectRelationshipFilter::And(_)));
                assert_eq!(or.filters()[1], ProjectRelationshipFilter::bom());
            }
            other => panic!("expected an OR filter, got {}", other),
        }
    }

    #[test]
    fn test_allowed_types_union_and_intersection() {
        let or = OrFilter::new([
            ProjectRelationshipFilter::extension(),
            ProjectRelationshipFilter::bom(),
        ]);
        assert_eq!(
            or.allowed_types(),
            BTreeSet::from([
                RelationshipType::Bom,
                RelationshipType::Dependency,
                RelationshipType::Extension
            ])
        );

        let and = AndFilter::new([
            ProjectRelationshipFilter::extension(),
            ProjectRelationshipFilter::dependencies(),
        ]);
        assert_eq!(and.allowed_types(), BTreeSet::from([RelationshipType::Dependency]));
    }

    #[test]
    fn test_rendering() {
        let or = ProjectRelationshipFilter::or([
            ProjectRelationshipFilter::extension(),
            DependencyFilter::scoped(DependencyScope::Runtime).into(),
        ]);
        assert_eq!(
            or.to_string(),
            "[EXTENSIONS || DEPENDENCIES[scope: runtime, transitivity: maven, managed: false, \
             concrete: true]]"
        );

        let and = ProjectRelationshipFilter::and([
            ProjectRelationshipFilter::bom(),
            ProjectRelationshipFilter::parent(),
        ]);
        assert_eq!(and.to_string(), "[BOM && PARENTS]");
        assert_eq!(ProjectRelationshipFilter::and(Vec::new()).to_string(), "[]");
    }
}
