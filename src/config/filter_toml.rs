//! Traversal filter parsing from TOML
//!
//! # Example
//!
//! ```toml
//! [filter]
//! kind = "or"
//!
//! [[filter.filters]]
//! kind = "extension"
//!
//! [[filter.filters]]
//! kind = "dependency"
//! scope = "compile"
//! transitivity = "maven"
//! managed = false
//! concrete = true
//! excludes = ["commons-logging:commons-logging"]
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validation::validate_config;
use crate::error::{hints, GraphError};
use crate::filter::{DependencyFilter, ProjectRelationshipFilter};
use crate::ident::ProjectRef;
use crate::scope::{DependencyScope, ScopeTransitivity};

/// Root configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Filter applied at the traversal root
    pub filter: FilterConfig,
}

/// One filter, selected by its `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FilterConfig {
    None,
    Any,
    Dependency {
        #[serde(default = "default_scope")]
        scope: DependencyScope,
        #[serde(default)]
        transitivity: ScopeTransitivity,
        /// Include edges from management sections
        #[serde(default)]
        managed: bool,
        /// Include ordinary dependency edges
        #[serde(default = "default_true")]
        concrete: bool,
        /// `group:artifact` coordinates never to traverse into
        #[serde(default)]
        excludes: Vec<String>,
    },
    Extension,
    ExtensionOnly,
    Bom,
    Parent,
    And {
        #[serde(default)]
        filters: Vec<FilterConfig>,
    },
    Or {
        #[serde(default)]
        filters: Vec<FilterConfig>,
    },
}

fn default_scope() -> DependencyScope {
    DependencyScope::Test
}

fn default_true() -> bool {
    true
}

impl FilterConfig {
    /// The `kind` value as written in TOML
    pub fn kind_name(&self) -> &'static str {
        match self {
            FilterConfig::None => "none",
            FilterConfig::Any => "any",
            FilterConfig::Dependency { .. } => "dependency",
            FilterConfig::Extension => "extension",
            FilterConfig::ExtensionOnly => "extension-only",
            FilterConfig::Bom => "bom",
            FilterConfig::Parent => "parent",
            FilterConfig::And { .. } => "and",
            FilterConfig::Or { .. } => "or",
        }
    }

    /// Build the filter this configuration describes
    pub fn build(&self) -> Result<ProjectRelationshipFilter> {
        let filter = match self {
            FilterConfig::None => ProjectRelationshipFilter::none(),
            FilterConfig::Any => ProjectRelationshipFilter::any(),
            FilterConfig::Dependency {
                scope,
                transitivity,
                managed,
                concrete,
                excludes,
            } => {
                let excludes = excludes
                    .iter()
                    .map(|e| {
                        ProjectRef::parse(e).with_context(|| format!("Invalid exclude '{}'", e))
                    })
                    .collect::<Result<Vec<_>>>()?;

                DependencyFilter::scoped(*scope)
                    .with_transitivity(*transitivity)
                    .with_managed(*managed)
                    .with_concrete(*concrete)
                    .with_excludes(excludes)
                    .into()
            }
            FilterConfig::Extension => ProjectRelationshipFilter::extension(),
            FilterConfig::ExtensionOnly => ProjectRelationshipFilter::extension_only(),
            FilterConfig::Bom => ProjectRelationshipFilter::bom(),
            FilterConfig::Parent => ProjectRelationshipFilter::parent(),
            FilterConfig::And { filters } => ProjectRelationshipFilter::and(build_all(filters)?),
            FilterConfig::Or { filters } => ProjectRelationshipFilter::or(build_all(filters)?),
        };
        Ok(filter)
    }
}

fn build_all(filters: &[FilterConfig]) -> Result<Vec<ProjectRelationshipFilter>> {
    filters.iter().map(FilterConfig::build).collect()
}

impl TraversalConfig {
    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_context(|| {
            format!("Failed to read filter configuration from {}", path.display())
        })?;

        debug!("Loaded filter configuration from {}", path.display());
        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| {
            GraphError::config_error_with_hint(
                "Failed to parse filter configuration",
                Some(e.into()),
                hints::filter_config(),
            )
        })?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Build the root filter
    pub fn build_filter(&self) -> Result<ProjectRelationshipFilter> {
        let filter = self.filter.build()?;
        debug!("Built traversal filter: {}", filter);
        Ok(filter)
    }
}
