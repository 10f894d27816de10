//! Dependency scopes and the rules for carrying them down the graph
//!
//! `DependencyScope::implies` answers "is a dependency declared with scope B
//! visible when filtering for scope A". `ScopeTransitivity::child_for`
//! answers "which scope applies one level below a dependency reached at
//! scope A". Both are fixed lookup tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// Declared visibility of a dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Toolchain,
    Provided,
    Embedded,
    System,
    Compile,
    Runtime,
    Test,
    /// BOM import marker in a management section
    Import,
}

impl DependencyScope {
    /// Every declared scope
    pub const ALL: [DependencyScope; 8] = [
        DependencyScope::Toolchain,
        DependencyScope::Provided,
        DependencyScope::Embedded,
        DependencyScope::System,
        DependencyScope::Compile,
        DependencyScope::Runtime,
        DependencyScope::Test,
        DependencyScope::Import,
    ];

    /// Scopes directly implied by this one
    fn implied(self) -> &'static [DependencyScope] {
        use DependencyScope::*;
        match self {
            Toolchain | Import => &[],
            Provided => &[Toolchain],
            Embedded | System => &[Provided],
            Compile => &[Provided, Embedded],
            Runtime => &[Compile],
            Test => &[Runtime, System, Provided],
        }
    }

    /// True if an edge declared with `other` is visible when filtering for `self`
    pub fn implies(self, other: DependencyScope) -> bool {
        self == other || self.implied().iter().any(|s| s.implies(other))
    }

    /// The name used in descriptors
    pub fn real_name(self) -> &'static str {
        match self {
            DependencyScope::Toolchain => "toolchain",
            DependencyScope::Provided => "provided",
            DependencyScope::Embedded => "embedded",
            DependencyScope::System => "system",
            DependencyScope::Compile => "compile",
            DependencyScope::Runtime => "runtime",
            DependencyScope::Test => "test",
            DependencyScope::Import => "import",
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.real_name())
    }
}

impl FromStr for DependencyScope {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DependencyScope::ALL
            .into_iter()
            .find(|scope| scope.real_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                GraphError::config_error_with_hint(
                    format!("Unknown dependency scope '{}'", s),
                    None,
                    "Valid scopes: toolchain, provided, embedded, system, compile, runtime, \
                     test, import",
                )
            })
    }
}

/// Rule deriving the scope that applies beneath a dependency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScopeTransitivity {
    /// Only compile and runtime dependencies are transitive
    #[default]
    Maven,
    /// Every scope is carried down unchanged
    All,
}

impl ScopeTransitivity {
    /// Scope for the children of a dependency reached at `scope`.
    ///
    /// `None` stops descent: nothing beneath is visible.
    pub fn child_for(self, scope: DependencyScope) -> Option<DependencyScope> {
        use DependencyScope::*;
        match self {
            ScopeTransitivity::All => Some(scope),
            ScopeTransitivity::Maven => match scope {
                Compile | Provided | Embedded => Some(Compile),
                Runtime | Test => Some(Runtime),
                Toolchain => Some(Toolchain),
                System | Import => None,
            },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScopeTransitivity::Maven => "maven",
            ScopeTransitivity::All => "all",
        }
    }
}

impl fmt::Display for ScopeTransitivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
