//! Classified import references and graph nodes

use serde::{Deserialize, Serialize};

use super::tier::{DependencyKind, Tier};

/// One classified import reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDependency {
    /// Last path segment of the specifier, extension stripped
    pub name: String,

    /// The import specifier as written
    pub path: String,

    pub kind: DependencyKind,

    /// True for bare package specifiers (not `.` or `/` prefixed)
    pub is_external: bool,

    /// Meaningful for internal references; `atom` for external ones
    pub tier: Tier,

    /// Import statement text(s) that produced this reference
    pub raw_imports: Vec<String>,
}

impl ComponentDependency {
    /// Returns true if this reference points inside the project
    pub fn is_internal(&self) -> bool {
        !self.is_external
    }
}

/// A tracked component in the dependency graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraphNode {
    pub name: String,

    /// The input key the component was registered under
    pub path: String,

    /// Always `component` for tracked nodes
    pub kind: DependencyKind,

    /// Always false for tracked nodes
    pub is_external: bool,

    pub tier: Tier,

    /// Import statements of every classified dependency, in source order
    pub raw_imports: Vec<String>,
}

impl DependencyGraphNode {
    /// Creates a tracked component node
    pub fn new(name: impl Into<String>, path: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: DependencyKind::Component,
            is_external: false,
            tier,
            raw_imports: Vec::new(),
        }
    }

    /// Appends the raw import text of each dependency
    pub fn with_raw_imports<'a>(
        mut self,
        deps: impl IntoIterator<Item = &'a ComponentDependency>,
    ) -> Self {
        for dep in deps {
            self.raw_imports.extend(dep.raw_imports.iter().cloned());
        }
        self
    }
}
