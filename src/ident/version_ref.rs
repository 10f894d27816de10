//! Versioned `groupId:artifactId:version` identity
//!
//! A `ProjectVersionRef` is built from a parsed `VersionSpec` or from version
//! text. The spec is parsed from the text on first use, and the version
//! string is always the spec's canonical rendering, so the two never
//! disagree. Both are memoized in a `OnceLock`: racing readers may both
//! compute a value, one value wins, and nobody observes a partially written
//! cell.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{GraphError, Result};
use crate::ident::ProjectRef;
use crate::version::{SingleVersion, VersionSpec};

/// A project identity pinned to a version specification
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectVersionRef {
    project: ProjectRef,
    /// Version text as supplied, when built from text
    raw: Option<String>,
    spec: OnceLock<VersionSpec>,
    /// Canonical rendering of `spec`, or `raw` when it does not parse
    text: OnceLock<String>,
}

/// What equality and hashing look at for the version component
#[derive(PartialEq, Hash)]
enum VersionKey<'a> {
    Spec(&'a VersionSpec),
    /// Text that does not parse can still be compared verbatim
    Raw(&'a str),
}

impl ProjectVersionRef {
    /// Create a reference from an already parsed spec
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        spec: VersionSpec,
    ) -> Self {
        Self::with_project(ProjectRef::new(group_id, artifact_id), spec)
    }

    /// Create a reference from a `ProjectRef` and a parsed spec
    pub fn with_project(project: ProjectRef, spec: VersionSpec) -> Self {
        Self {
            project,
            raw: None,
            spec: OnceLock::from(spec),
            text: OnceLock::new(),
        }
    }

    /// Create a reference from version text; parsing is deferred to first use
    pub fn from_string(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self::with_raw(ProjectRef::new(group_id, artifact_id), version.into())
    }

    fn with_raw(project: ProjectRef, raw: String) -> Self {
        Self {
            project,
            raw: Some(raw),
            spec: OnceLock::new(),
            text: OnceLock::new(),
        }
    }

    /// Create a reference from whichever version representations are at hand.
    ///
    /// At least one of `spec` and `text` must be present. When both are, the
    /// text must parse to the same spec.
    pub fn from_parts(
        project: ProjectRef,
        spec: Option<VersionSpec>,
        text: Option<String>,
    ) -> Result<Self> {
        match (spec, text) {
            (None, None) => Err(GraphError::missing_version(project.to_string())),
            (Some(spec), None) => Ok(Self::with_project(project, spec)),
            (None, Some(text)) => Ok(Self::with_raw(project, text)),
            (Some(spec), Some(text)) => {
                if VersionSpec::parse(&text)? != spec {
                    return Err(GraphError::InvalidVersion {
                        message: format!("does not match version spec {}", spec),
                        version: text,
                        hint: None,
                    });
                }
                Ok(Self::with_project(project, spec))
            }
        }
    }

    /// Parse `group:artifact:version`, validating the version eagerly
    pub fn parse(value: &str) -> Result<Self> {
        let value = value.trim();
        let mut parts = value.splitn(3, ':');
        let (Some(group), Some(artifact), Some(version)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(GraphError::invalid_coordinate(
                value,
                "expected groupId:artifactId:version",
            ));
        };

        let project = ProjectRef::parse(&format!("{}:{}", group, artifact)).map_err(|_| {
            GraphError::invalid_coordinate(value, "groupId and artifactId must be non-empty")
        })?;
        let spec = VersionSpec::parse(version)?;

        Ok(Self::with_project(project, spec))
    }

    pub fn group_id(&self) -> &str {
        self.project.group_id()
    }

    pub fn artifact_id(&self) -> &str {
        self.project.artifact_id()
    }

    /// The parsed version, parsing the text on first call
    pub fn version_spec(&self) -> Result<&VersionSpec> {
        if let Some(spec) = self.spec.get() {
            return Ok(spec);
        }

        let parsed = VersionSpec::parse(self.raw.as_deref().unwrap_or_default())?;
        Ok(self.spec.get_or_init(|| parsed))
    }

    /// The version text: the spec's canonical rendering, or the supplied
    /// text verbatim when it does not parse
    pub fn version_string(&self) -> &str {
        self.text.get_or_init(|| match self.version_spec() {
            Ok(spec) => spec.render_standard(),
            Err(_) => self.raw.clone().unwrap_or_default(),
        })
    }

    /// Versionless view of this reference
    pub fn as_project_ref(&self) -> &ProjectRef {
        &self.project
    }

    pub fn as_project_version_ref(&self) -> &ProjectVersionRef {
        self
    }

    /// True when the version is exactly one non-snapshot version
    pub fn is_release(&self) -> Result<bool> {
        Ok(self.version_spec()?.is_concrete())
    }

    /// True when the version denotes exactly one version
    pub fn is_specific_version(&self) -> Result<bool> {
        Ok(self.version_spec()?.is_single())
    }

    /// True when the version denotes a range or set of versions
    pub fn is_compound(&self) -> Result<bool> {
        Ok(!self.version_spec()?.is_single())
    }

    pub fn is_snapshot(&self) -> Result<bool> {
        Ok(!self.is_compound()? && !self.is_release()?)
    }

    /// Check whether `version` is admitted by this reference's spec
    pub fn matches_version(&self, version: &SingleVersion) -> Result<bool> {
        Ok(self.version_spec()?.contains(version))
    }

    /// Pin this reference to a concrete version inside its spec
    ///
    /// Returns an equal copy when the spec already is `version`, and fails
    /// with `VersionNotInRange` when the spec does not contain it.
    pub fn select_version(&self, version: &SingleVersion) -> Result<ProjectVersionRef> {
        let spec = self.version_spec()?;
        if matches!(spec, VersionSpec::Single(current) if current == version) {
            return Ok(self.clone());
        }

        if !spec.contains(version) {
            return Err(GraphError::version_not_in_range(
                version.render_standard(),
                spec.render_standard(),
            ));
        }

        debug!("Selected version {} for {}", version, self);
        Ok(Self::with_project(
            self.project.clone(),
            VersionSpec::Single(version.clone()),
        ))
    }

    /// Equality ignoring the version component
    pub fn versionless_equals(&self, other: &ProjectVersionRef) -> bool {
        self.project == other.project
    }

    fn version_key(&self) -> VersionKey<'_> {
        match self.version_spec() {
            Ok(spec) => VersionKey::Spec(spec),
            Err(_) => VersionKey::Raw(self.version_string()),
        }
    }
}

impl PartialEq for ProjectVersionRef {
    fn eq(&self, other: &Self) -> bool {
        if std::ptr::eq(self, other) {
            return true;
        }
        self.project == other.project && self.version_key() == other.version_key()
    }
}

impl Eq for ProjectVersionRef {}

impl Hash for ProjectVersionRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.project.hash(state);
        self.version_key().hash(state);
    }
}

impl fmt::Display for ProjectVersionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.project, self.version_string())
    }
}

impl FromStr for ProjectVersionRef {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProjectVersionRef {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<ProjectVersionRef> for String {
    fn from(value: ProjectVersionRef) -> Self {
        value.to_string()
    }
}
