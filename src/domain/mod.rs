//! Domain models for the planner
//!
//! Contains the value types produced by the resolver without any I/O concerns.

mod tier;
mod dependency;
mod graph;

pub use tier::{Tier, DependencyKind, TierError};
pub use dependency::{ComponentDependency, DependencyGraphNode};
pub use graph::DependencyGraph;
