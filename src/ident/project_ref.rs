//! Versionless `groupId:artifactId` identity

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A project identity without a version
///
/// Used as the key of exclusion sets. Ordering is by group then artifact,
/// which is the order exclusions render in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectRef {
    group_id: String,
    artifact_id: String,
}

impl ProjectRef {
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }

    /// Parse `group:artifact`
    pub fn parse(value: &str) -> Result<Self, GraphError> {
        let value = value.trim();
        let mut parts = value.split(':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(group), Some(artifact), None) => {
                if group.is_empty() || artifact.is_empty() {
                    return Err(GraphError::invalid_coordinate(
                        value,
                        "groupId and artifactId must be non-empty",
                    ));
                }
                Ok(Self::new(group, artifact))
            }
            _ => Err(GraphError::invalid_coordinate(
                value,
                "expected exactly one ':' between groupId and artifactId",
            )),
        }
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

impl FromStr for ProjectRef {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProjectRef {
    type Error = GraphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ProjectRef> for String {
    fn from(value: ProjectRef) -> Self {
        value.to_string()
    }
}
