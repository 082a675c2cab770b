//! Phase planning
//!
//! Splits the build order into one phase per tier (atom to page), skipping
//! tiers without members.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::PhaseMinutes;
use crate::domain::{DependencyGraph, Tier};

/// A group of same-tier components migrated together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionPhase {
    /// Human readable label, e.g. `Phase 1: Atoms`
    pub name: String,

    pub tier: Tier,

    /// Members in input order
    pub components: Vec<String>,

    /// Members in build order
    pub order: Vec<String>,

    pub estimated_minutes: u32,
}

impl ConversionPhase {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn phase_label(number: usize, tier: Tier) -> String {
    let plural = tier.plural();
    let mut chars = plural.chars();
    let title = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("Phase {}: {}", number, title)
}

/// Groups the graph's build order into tier phases
pub fn plan_phases(graph: &DependencyGraph, minutes: &PhaseMinutes) -> Vec<ConversionPhase> {
    let mut phases = Vec::new();

    for tier in Tier::ALL {
        let order: Vec<String> = graph
            .build_order()
            .iter()
            .filter(|name| graph.tier(name) == Some(tier))
            .cloned()
            .collect();

        if order.is_empty() {
            continue;
        }

        let members: HashSet<&str> = order.iter().map(String::as_str).collect();
        let components: Vec<String> = graph
            .component_names()
            .filter(|name| members.contains(name))
            .map(str::to_string)
            .collect();

        let per_component = minutes.for_tier(tier);
        let estimated_minutes = u32::try_from(order.len())
            .unwrap_or(u32::MAX)
            .saturating_mul(per_component);

        phases.push(ConversionPhase {
            name: phase_label(phases.len() + 1, tier),
            tier,
            components,
            order,
            estimated_minutes,
        });
    }

    tracing::debug!(phases = phases.len(), "planned conversion phases");
    phases
}
