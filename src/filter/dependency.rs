//! Scope-aware dependency filter
//!
//! Accepts dependency edges whose scope is implied by the filter's scope,
//! whose target is not excluded, and whose managed/concrete nature is wanted.
//! Each level down, the scope is narrowed by the transitivity rule and the
//! edge's own exclusions are added to the set.

use std::collections::BTreeSet;

use tracing::trace;

use super::{separate, ProjectRelationshipFilter, RelationshipFilter};
use crate::ident::ProjectRef;
use crate::rel::{ProjectRelationship, RelationshipType};
use crate::scope::{DependencyScope, ScopeTransitivity};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyFilter {
    /// `None` once the transitivity rule has stopped descent
    scope: Option<DependencyScope>,
    transitivity: ScopeTransitivity,
    include_managed: bool,
    include_concrete: bool,
    excludes: BTreeSet<ProjectRef>,
}

impl Default for DependencyFilter {
    fn default() -> Self {
        Self {
            scope: Some(DependencyScope::Test),
            transitivity: ScopeTransitivity::Maven,
            include_managed: false,
            include_concrete: true,
            excludes: BTreeSet::new(),
        }
    }
}

impl DependencyFilter {
    /// Test scope, maven transitivity, concrete edges only, no exclusions
    pub fn new() -> Self {
        Self::default()
    }

    /// Default filter narrowed to `scope`
    pub fn scoped(scope: DependencyScope) -> Self {
        Self {
            scope: Some(scope),
            ..Self::default()
        }
    }

    pub fn with_transitivity(mut self, transitivity: ScopeTransitivity) -> Self {
        self.transitivity = transitivity;
        self
    }

    pub fn with_managed(mut self, include_managed: bool) -> Self {
        self.include_managed = include_managed;
        self
    }

    pub fn with_concrete(mut self, include_concrete: bool) -> Self {
        self.include_concrete = include_concrete;
        self
    }

    pub fn with_excludes(mut self, excludes: impl IntoIterator<Item = ProjectRef>) -> Self {
        self.excludes.extend(excludes);
        self
    }

    pub fn scope(&self) -> Option<DependencyScope> {
        self.scope
    }

    pub fn transitivity(&self) -> ScopeTransitivity {
        self.transitivity
    }

    pub fn includes_managed(&self) -> bool {
        self.include_managed
    }

    pub fn includes_concrete(&self) -> bool {
        self.include_concrete
    }

    pub fn excludes(&self) -> &BTreeSet<ProjectRef> {
        &self.excludes
    }
}

impl RelationshipFilter for DependencyFilter {
    fn accept(&self, rel: &ProjectRelationship) -> bool {
        if rel.rel_type() != RelationshipType::Dependency {
            return false;
        }

        if self.excludes.contains(rel.target().as_project_ref()) {
            trace!("Rejected {}: target is excluded", rel);
            return false;
        }

        let Some(scope) = self.scope else {
            trace!("Rejected {}: descent stopped by {} transitivity", rel, self.transitivity);
            return false;
        };
        if !scope.implies(rel.effective_scope()) {
            trace!("Rejected {}: scope {} does not imply {}", rel, scope, rel.effective_scope());
            return false;
        }

        if rel.is_managed() && !self.include_managed {
            trace!("Rejected {}: managed dependencies excluded", rel);
            return false;
        }
        if !rel.is_managed() && !self.include_concrete {
            trace!("Rejected {}: concrete dependencies excluded", rel);
            return false;
        }

        true
    }

    fn child_filter(&self, parent: &ProjectRelationship) -> ProjectRelationshipFilter {
        let mut excludes = self.excludes.clone();
        excludes.extend(parent.excludes().iter().cloned());

        ProjectRelationshipFilter::Dependency(DependencyFilter {
            scope: self.scope.and_then(|s| self.transitivity.child_for(s)),
            transitivity: self.transitivity,
            include_managed: self.include_managed,
            include_concrete: self.include_concrete,
            excludes,
        })
    }

    fn render(&self, buf: &mut String) {
        separate(buf);

        buf.push_str("DEPENDENCIES[scope: ");
        buf.push_str(self.scope.map_or("none", DependencyScope::real_name));
        buf.push_str(&format!(
            ", transitivity: {}, managed: {}, concrete: {}",
            self.transitivity, self.include_managed, self.include_concrete
        ));

        if !self.excludes.is_empty() {
            let excludes: Vec<String> = self.excludes.iter().map(|e| e.to_string()).collect();
            buf.push_str(&format!(", exclude: {{{}}}", excludes.join(", ")));
        }
        buf.push(']');
    }

    fn allowed_types(&self) -> BTreeSet<RelationshipType> {
        BTreeSet::from([RelationshipType::Dependency])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::test_support::*;
    use DependencyScope::*;

    fn rendered(filter: &DependencyFilter) -> String {
        let mut buf = String::new();
        filter.render(&mut buf);
        buf
    }

    fn child_of(filter: &DependencyFilter, rel: &ProjectRelationship) -> DependencyFilter {
        match filter.child_filter(rel) {
            ProjectRelationshipFilter::Dependency(child) => child,
            other => panic!("expected a dependency filter, got {}", other),
        }
    }

    #[test]
    fn test_default_filter_accepts_concrete_dependencies() {
        let filter = DependencyFilter::new();
        assert!(filter.accept(&dep("g:a:1", Compile)));
        assert!(filter.accept(&dep("g:a:1", Test)));
        assert!(!filter.accept(&extension("g:ext:1")));
        assert!(!filter.accept(&bom("g:bom:1")));
    }

    #[test]
    fn test_compile_scope_rejects_test_edges() {
        let filter = DependencyFilter::scoped(Compile);
        assert!(filter.accept(&dep("g:a:1", Compile)));
        assert!(filter.accept(&dep("g:a:1", Provided)));
        assert!(!filter.accept(&dep("g:a:1", Test)));
        assert!(!filter.accept(&dep("g:a:1", Runtime)));
    }

    #[test]
    fn test_excluded_target_rejected_regardless_of_scope() {
        let filter = DependencyFilter::new().with_excludes([ProjectRef::new("g", "a")]);
        for scope in [Compile, Runtime, Test, Provided] {
            assert!(!filter.accept(&dep("g:a:1", scope)));
            assert!(!filter.accept(&dep("g:a:[1,2)", scope)));
        }
        assert!(filter.accept(&dep("g:b:1", Compile)));
    }

    #[test]
    fn test_managed_and_concrete_flags() {
        let managed = dep_with("g:a:1", Compile, true, &[]);
        let concrete = dep("g:a:1", Compile);

        let default = DependencyFilter::new();
        assert!(!default.accept(&managed));
        assert!(default.accept(&concrete));

        let managed_only = DependencyFilter::new().with_managed(true).with_concrete(false);
        assert!(managed_only.accept(&managed));
        assert!(!managed_only.accept(&concrete));

        let both = DependencyFilter::new().with_managed(true);
        assert!(both.accept(&managed));
        assert!(both.accept(&concrete));
    }

    #[test]
    fn test_child_narrows_scope() {
        let filter = DependencyFilter::new();
        let child = child_of(&filter, &dep("g:a:1", Test));
        assert_eq!(child.scope(), Some(Runtime));

        let grandchild = child_of(&child, &dep("g:b:1", Runtime));
        assert_eq!(grandchild.scope(), Some(Runtime));
        assert!(!grandchild.accept(&dep("g:c:1", Test)));
        assert!(grandchild.accept(&dep("g:c:1", Compile)));
    }

    #[test]
    fn test_child_accumulates_excludes() {
        let filter = DependencyFilter::scoped(Compile).with_excludes([ProjectRef::new("x", "one")]);
        let child = child_of(&filter, &dep_with("g:a:1", Compile, false, &["x:two"]));
        let grandchild = child_of(&child, &dep_with("g:b:1", Compile, false, &["x:three"]));

        let expected: BTreeSet<ProjectRef> = ["x:one", "x:two", "x:three"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(grandchild.excludes(), &expected);
        assert!(!grandchild.accept(&dep("x:two:1", Compile)));

        // the parent filter is untouched
        assert_eq!(filter.excludes().len(), 1);
    }

    #[test]
    fn test_child_inherits_flags() {
        let filter = DependencyFilter::scoped(Compile)
            .with_transitivity(ScopeTransitivity::All)
            .with_managed(true)
            .with_concrete(false);
        let child = child_of(&filter, &dep("g:a:1", Compile));
        assert_eq!(child.transitivity(), ScopeTransitivity::All);
        assert!(child.includes_managed());
        assert!(!child.includes_concrete());
    }

    #[test]
    fn test_stopped_scope_rejects_everything() {
        let filter = DependencyFilter::scoped(System);
        assert!(filter.accept(&dep("g:a:1", System)));

        let child = child_of(&filter, &dep("g:a:1", System));
        assert_eq!(child.scope(), None);
        assert!(!child.accept(&dep("g:b:1", System)));
        assert!(!child.accept(&dep("g:b:1", Compile)));
        assert_eq!(child_of(&child, &dep("g:b:1", System)).scope(), None);
        assert!(rendered(&child).contains("scope: none"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let filter = DependencyFilter::scoped(Compile)
            .with_excludes(["z:z", "a:b", "m:n"].iter().map(|s| s.parse().unwrap()));
        let first = rendered(&filter);
        assert_eq!(
            first,
            "DEPENDENCIES[scope: compile, transitivity: maven, managed: false, concrete: true, \
             exclude: {a:b, m:n, z:z}]"
        );
        assert_eq!(first, rendered(&filter.clone()));

        let plain = rendered(&DependencyFilter::new());
        assert_eq!(
            plain,
            "DEPENDENCIES[scope: test, transitivity: maven, managed: false, concrete: true]"
        );
    }
}
