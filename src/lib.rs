//! Atomic Planner - dependency resolution for atomic design migrations
//!
//! Takes a flat set of UI components (name -> source text), classifies each
//! one into an atomic design tier, finds import cycles and produces a
//! tier-ordered migration plan split into timed phases.
//!
//! ```
//! use atomic_planner::{resolve, Tier};
//!
//! let strategy = resolve([
//!     ("atoms/Button", ""),
//!     ("molecules/Card", "import Button from './atoms/Button'"),
//! ]);
//!
//! assert_eq!(strategy.graph.build_order(), ["Button", "Card"]);
//! assert_eq!(strategy.phase_for(Tier::Atom).map(|p| p.estimated_minutes), Some(5));
//! ```

pub mod domain;
pub mod config;
pub mod classifier;
pub mod builder;
pub mod cycles;
pub mod order;
pub mod phases;
pub mod strategy;
pub mod resolver;

pub use config::{ConfigError, PhaseMinutes, ResolverConfig, TierRules};
pub use domain::{
    ComponentDependency, DependencyGraph, DependencyGraphNode, DependencyKind, Tier,
};
pub use phases::ConversionPhase;
pub use resolver::{resolve, Resolver};
pub use strategy::ConversionStrategy;
