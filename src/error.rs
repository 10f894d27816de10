//! Error types and helpers for graph-building callers
//!
//! Every error surfaces to the immediate caller. Variants carry enough context
//! (the offending coordinate, version or spec) to be reported without the
//! caller re-deriving it, and some carry an actionable hint.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = GraphError> = std::result::Result<T, E>;

/// Errors raised by the coordinate, version and configuration layers
#[derive(Error, Debug)]
pub enum GraphError {
    /// A version reference was built with neither a spec nor a string
    #[error("Version spec AND string cannot both be absent for '{coordinate}'")]
    MissingVersion { coordinate: String },

    /// The version text could not be parsed
    #[error("Invalid version specification '{version}': {message}")]
    InvalidVersion {
        version: String,
        message: String,
        hint: Option<String>,
    },

    /// A concrete version was selected outside of the reference's spec
    #[error("Specified version: {requested} is not contained in spec: {spec}")]
    VersionNotInRange { requested: String, spec: String },

    /// A `group:artifact[:version]` string was malformed
    #[error("Invalid coordinate '{value}': {message}")]
    InvalidCoordinate { value: String, message: String },

    /// Filter configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },
}

impl GraphError {
    /// Create a missing-version error for the given `group:artifact`
    pub fn missing_version(coordinate: impl Into<String>) -> Self {
        Self::MissingVersion {
            coordinate: coordinate.into(),
        }
    }

    /// Create a version parse error
    pub fn invalid_version(version: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidVersion {
            version: version.into(),
            message: message.into(),
            hint: Some(hints::version_syntax().to_string()),
        }
    }

    /// Create a version-not-contained error
    pub fn version_not_in_range(requested: impl Into<String>, spec: impl Into<String>) -> Self {
        Self::VersionNotInRange {
            requested: requested.into(),
            spec: spec.into(),
        }
    }

    /// Create a coordinate parse error
    pub fn invalid_coordinate(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// The actionable hint attached to this error, if any
    pub fn hint(&self) -> Option<&str> {
        match self {
            GraphError::InvalidVersion { hint, .. } | GraphError::Config { hint, .. } => {
                hint.as_deref()
            }
            GraphError::InvalidCoordinate { .. } => Some(hints::coordinate_syntax()),
            GraphError::MissingVersion { .. } | GraphError::VersionNotInRange { .. } => None,
        }
    }

    /// Render the error with its source chain and hint for terminal output
    pub fn render_with_hints(&self) -> String {
        use console::style;

        let mut out = format!("{} {}", style("ERROR:").red().bold(), self);

        let mut source = std::error::Error::source(self);
        while let Some(cause) = source {
            out.push_str(&format!("\n  {} {}", style("caused by:").dim(), cause));
            source = cause.source();
        }

        if let Some(hint) = self.hint() {
            out.push_str(&format!("\n\n{} {}", style("HINT:").yellow().bold(), hint));
        }

        out
    }
}

/// Common error hints
pub mod hints {
    /// Hint for unparseable version text
    pub fn version_syntax() -> &'static str {
        "Versions may be written as:\n\
         • Single: \"1.0\", \"2.3.1-rc1\", \"1.0-SNAPSHOT\"\n\
         • Range: \"[1.0,2.0)\", \"(,1.5]\", \"[1.2,)\"\n\
         • Pinned: \"[1.4]\"\n\
         • Compound: \"[1.0,2.0),[3.0,4.0)\""
    }

    /// Hint for malformed coordinates
    pub fn coordinate_syntax() -> &'static str {
        "Coordinates are written as 'groupId:artifactId' or\n\
         'groupId:artifactId:version', e.g. 'org.example:core:1.2'"
    }

    /// Hint for invalid filter configuration
    pub fn filter_config() -> &'static str {
        "A [filter] table needs a 'kind' of:\n\
         • none, any, extension, extension-only, bom, parent\n\
         • dependency (scope, transitivity, managed, concrete, excludes)\n\
         • and / or (with a nested 'filters' array)"
    }
}
