//! Filter configuration validation with helpful error messages

use anyhow::{Context, Result};
use tracing::warn;

use super::{FilterConfig, TraversalConfig};
use crate::error::{hints, GraphError};
use crate::ident::ProjectRef;

/// Deepest AND/OR nesting accepted from a configuration file
pub const MAX_NESTING: usize = 32;

/// Validate the entire traversal configuration
pub fn validate_config(config: &TraversalConfig) -> Result<()> {
    validate_filter(&config.filter, 0)
}

fn validate_filter(filter: &FilterConfig, depth: usize) -> Result<()> {
    if depth > MAX_NESTING {
        return Err(GraphError::config_error_with_hint(
            format!("Filters are nested more than {} levels deep", MAX_NESTING),
            None,
            "Flatten nested 'and'/'or' filters; both accept any number of members",
        )
        .into());
    }

    match filter {
        FilterConfig::Dependency {
            managed,
            concrete,
            excludes,
            ..
        } => {
            if !managed && !concrete {
                return Err(GraphError::config_error_with_hint(
                    "Dependency filter excludes both managed and concrete edges",
                    None,
                    "Set 'concrete = true' (the default), 'managed = true', or both",
                )
                .into());
            }
            for exclude in excludes {
                validate_exclude(exclude)?;
            }
        }
        FilterConfig::Or { filters } if filters.is_empty() => {
            return Err(GraphError::config_error_with_hint(
                "An 'or' filter needs at least one member",
                None,
                "Use kind = \"none\" to reject every relationship",
            )
            .into());
        }
        FilterConfig::And { filters } | FilterConfig::Or { filters } => {
            if filters.is_empty() {
                warn!("Empty 'and' filter accepts every relationship");
            }
            for (index, member) in filters.iter().enumerate() {
                validate_filter(member, depth + 1).with_context(|| {
                    format!("Invalid member #{} of '{}' filter", index, filter.kind_name())
                })?;
            }
        }
        _ => {}
    }

    Ok(())
}

fn validate_exclude(value: &str) -> Result<()> {
    ProjectRef::parse(value).map_err(|e| {
        GraphError::config_error_with_hint(
            format!("Invalid exclude '{}'", value),
            Some(e.into()),
            hints::coordinate_syntax(),
        )
    })?;
    Ok(())
}
