//! Qualified interface names (`pkg/msg/Type`).

use std::fmt::{Display, Formatter, Result};

/// Namespace segments plus the type's own name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedName {
    /// e.g. `["sensor_msgs", "msg"]`.
    pub namespaces: Vec<String>,
    /// e.g. `"Temperature"`.
    pub name: String,
}

impl QualifiedName {
    pub fn new(namespaces: Vec<String>, name: impl Into<String>) -> Self {
        Self {
            namespaces,
            name: name.into(),
        }
    }

    /// Split a `/`-joined name.  Empty segments are ignored; returns `None`
    /// when no segment remains.
    pub fn parse(qualified: &str) -> Option<Self> {
        let mut parts: Vec<String> = qualified
            .split('/')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .collect();
        let name = parts.pop()?;
        Some(Self {
            namespaces: parts,
            name,
        })
    }

    /// First namespace segment, i.e. the package for ROS 2 names.
    pub fn package(&self) -> Option<&str> {
        self.namespaces.first().map(String::as_str)
    }

    /// Last namespace segment, i.e. `msg` / `srv` / `action` for ROS 2 names.
    pub fn kind(&self) -> Option<&str> {
        self.namespaces.last().map(String::as_str)
    }

    /// Sibling name in the same namespace.
    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self::new(self.namespaces.clone(), name)
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for ns in &self.namespaces {
            write!(f, "{ns}/")?;
        }
        f.write_str(&self.name)
    }
}
