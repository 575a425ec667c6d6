//! Stable, name-based addresses into the scene tree.
//!
//! A path lists item names from the root down. When the last segment does
//! not name a child it may name a parameter on the last resolved item, which
//! is how parameter paths such as `root/Cuboid/LocalXfo` are expressed.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Separator used by the textual form of a [`ScenePath`]
pub const PATH_SEPARATOR: char = '/';

/// A sequence of names from the scene root
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenePath(Vec<String>);

impl ScenePath {
    /// Create a path from segments
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// The path segments
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Return a new path with `segment` appended
    pub fn join(&self, segment: impl Into<String>) -> ScenePath {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        ScenePath(segments)
    }

    /// The final segment
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }
}

impl std::fmt::Display for ScenePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join(&PATH_SEPARATOR.to_string()))
    }
}

impl FromStr for ScenePath {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ScenePath::new(
            s.split(PATH_SEPARATOR).filter(|segment| !segment.is_empty()),
        ))
    }
}
