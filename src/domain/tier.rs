//! Abstraction tiers and dependency kinds
//!
//! Tiers follow atomic design: atoms are the smallest building blocks, pages
//! the largest. The rank of a tier is the primary key of the build order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TierError {
    #[error("Unknown tier: '{0}' (expected atom, molecule, organism, template or page)")]
    UnknownTier(String),

    #[error("Unknown dependency kind: '{0}'")]
    UnknownKind(String),
}

/// Atomic design tier of a component
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    #[default]
    Atom,
    Molecule,
    Organism,
    Template,
    Page,
}

impl Tier {
    /// All tiers in build sequence
    pub const ALL: [Tier; 5] = [
        Tier::Atom,
        Tier::Molecule,
        Tier::Organism,
        Tier::Template,
        Tier::Page,
    ];

    /// Returns the sort rank (atom = 0 .. page = 4)
    pub fn rank(&self) -> u8 {
        match self {
            Tier::Atom => 0,
            Tier::Molecule => 1,
            Tier::Organism => 2,
            Tier::Template => 3,
            Tier::Page => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Atom => "atom",
            Tier::Molecule => "molecule",
            Tier::Organism => "organism",
            Tier::Template => "template",
            Tier::Page => "page",
        }
    }

    /// Plural label used for phase names and directory conventions
    pub fn plural(&self) -> &'static str {
        match self {
            Tier::Atom => "atoms",
            Tier::Molecule => "molecules",
            Tier::Organism => "organisms",
            Tier::Template => "templates",
            Tier::Page => "pages",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "atom" | "atoms" => Ok(Tier::Atom),
            "molecule" | "molecules" => Ok(Tier::Molecule),
            "organism" | "organisms" => Ok(Tier::Organism),
            "template" | "templates" => Ok(Tier::Template),
            "page" | "pages" => Ok(Tier::Page),
            _ => Err(TierError::UnknownTier(s.to_string())),
        }
    }
}

/// What an import refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    #[default]
    Component,
    Hook,
    Util,
    Service,
    Type,
}

impl DependencyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyKind::Component => "component",
            DependencyKind::Hook => "hook",
            DependencyKind::Util => "util",
            DependencyKind::Service => "service",
            DependencyKind::Type => "type",
        }
    }
}

impl fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyKind {
    type Err = TierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "component" => Ok(DependencyKind::Component),
            "hook" => Ok(DependencyKind::Hook),
            "util" => Ok(DependencyKind::Util),
            "service" => Ok(DependencyKind::Service),
            "type" => Ok(DependencyKind::Type),
            _ => Err(TierError::UnknownKind(s.to_string())),
        }
    }
}
