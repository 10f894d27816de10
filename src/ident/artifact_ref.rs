//! Artifact-level identity: a versioned project plus type and classifier

use std::fmt;

use crate::ident::{ProjectRef, ProjectVersionRef};

const DEFAULT_TYPE: &str = "jar";

/// One artifact file of a project version, e.g. `g:a:1.0:test-jar:tests`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactRef {
    version_ref: ProjectVersionRef,
    artifact_type: String,
    classifier: Option<String>,
    optional: bool,
}

impl ArtifactRef {
    /// Create an artifact reference; an empty type falls back to "jar"
    pub fn new(
        version_ref: ProjectVersionRef,
        artifact_type: impl Into<String>,
        classifier: Option<String>,
        optional: bool,
    ) -> Self {
        let artifact_type = artifact_type.into();
        Self {
            version_ref,
            artifact_type: if artifact_type.is_empty() {
                DEFAULT_TYPE.to_string()
            } else {
                artifact_type
            },
            classifier: classifier.filter(|c| !c.is_empty()),
            optional,
        }
    }

    /// The main "jar" artifact of a project version
    pub fn jar(version_ref: ProjectVersionRef) -> Self {
        Self::new(version_ref, DEFAULT_TYPE, None, false)
    }

    /// The descriptor ("pom") artifact of a project version
    pub fn pom(version_ref: ProjectVersionRef) -> Self {
        Self::new(version_ref, "pom", None, false)
    }

    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    pub fn classifier(&self) -> Option<&str> {
        self.classifier.as_deref()
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    pub fn as_project_version_ref(&self) -> &ProjectVersionRef {
        &self.version_ref
    }

    pub fn as_project_ref(&self) -> &ProjectRef {
        self.version_ref.as_project_ref()
    }

    /// Copy of this artifact pointing at a different project version
    pub fn with_version_ref(&self, version_ref: ProjectVersionRef) -> Self {
        Self {
            version_ref,
            ..self.clone()
        }
    }
}

impl fmt::Display for ArtifactRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.version_ref, self.artifact_type)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}
