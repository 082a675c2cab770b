//! Conversion strategy report
//!
//! Bundles the resolved graph and its phases with operator-facing warnings
//! and a fixed list of migration recommendations.

use serde::{Deserialize, Serialize};

use crate::domain::{DependencyGraph, Tier};
use crate::phases::ConversionPhase;

/// Migration guidance attached to every strategy
pub const RECOMMENDATIONS: [&str; 5] = [
    "Migrate tier by tier: atoms first, then molecules, organisms, templates and pages",
    "Test each phase thoroughly before starting the next one",
    "Keep the legacy components as a reference until the migration is complete",
    "Use strict TypeScript types for all component props",
    "Add error boundaries around organisms and pages",
];

/// The complete migration plan handed to report renderers and generators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionStrategy {
    pub phases: Vec<ConversionPhase>,
    pub graph: DependencyGraph,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl ConversionStrategy {
    /// Returns the summed estimate of all phases
    pub fn total_estimated_minutes(&self) -> u32 {
        self.phases
            .iter()
            .fold(0u32, |total, phase| total.saturating_add(phase.estimated_minutes))
    }

    pub fn phase_for(&self, tier: Tier) -> Option<&ConversionPhase> {
        self.phases.iter().find(|phase| phase.tier == tier)
    }

    /// Returns components that have no place in the build order
    pub fn unscheduled(&self) -> Vec<&str> {
        self.graph.unscheduled()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn circular_warning(count: usize) -> String {
    if count == 1 {
        "1 circular dependency detected".to_string()
    } else {
        format!("{} circular dependencies detected", count)
    }
}

/// Derives warnings for cycles, highly coupled components and name clashes
///
/// Components left out of the build order are not warned about separately;
/// they are blocked by a reported cycle and listed by
/// [`ConversionStrategy::unscheduled`].
pub fn collect_warnings(graph: &DependencyGraph, high_complexity_threshold: usize) -> Vec<String> {
    let mut warnings = Vec::new();

    let cycles = graph.cycles();
    if !cycles.is_empty() {
        warnings.push(circular_warning(cycles.len()));
        warnings.extend(cycles.iter().map(|cycle| cycle.join(" → ")));
    }

    let complex = graph
        .component_names()
        .filter(|name| graph.dependencies(name).len() > high_complexity_threshold)
        .count();
    if complex > 0 {
        warnings.push(format!(
            "{} components with high complexity detected",
            complex
        ));
    }

    for (name, dropped) in graph.duplicates() {
        let kept = graph.component(name).map(|node| node.path.as_str()).unwrap_or_default();
        warnings.push(format!(
            "Duplicate component name {}: {} replaces {}",
            name,
            kept,
            dropped.join(", ")
        ));
    }

    warnings
}

/// Assembles the final strategy
pub fn report(
    graph: DependencyGraph,
    phases: Vec<ConversionPhase>,
    high_complexity_threshold: usize,
) -> ConversionStrategy {
    let warnings = collect_warnings(&graph, high_complexity_threshold);
    if !warnings.is_empty() {
        tracing::debug!(warnings = warnings.len(), "strategy has warnings");
    }

    ConversionStrategy {
        phases,
        graph,
        warnings,
        recommendations: RECOMMENDATIONS.iter().map(|r| r.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DependencyGraphNode;

    fn graph_of(edges: &[(&str, Vec<&str>)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (name, deps) in edges {
            graph.add_component(
                DependencyGraphNode::new(*name, *name, Tier::Organism),
                deps.iter().map(|d| d.to_string()).collect(),
                vec![],
            );
        }
        graph
    }

    fn scheduled(graph: DependencyGraph, cycles: Vec<Vec<String>>) -> DependencyGraph {
        let order = graph.component_names().map(str::to_string).collect();
        graph.with_analysis(order, cycles)
    }

    #[test]
    fn no_warnings_for_simple_graph() {
        let graph = scheduled(graph_of(&[("A", vec!["B"]), ("B", vec![])]), vec![]);
        assert!(collect_warnings(&graph, 5).is_empty());
    }

    #[test]
    fn cycle_warnings() {
        let graph = scheduled(
            graph_of(&[("A", vec!["B"]), ("B", vec!["A"])]),
            vec![vec!["A".into(), "B".into(), "A".into()]],
        );

        assert_eq!(
            collect_warnings(&graph, 5),
            vec!["1 circular dependency detected", "A → B → A"]
        );
    }

    #[test]
    fn plural_cycle_warning() {
        assert_eq!(circular_warning(2), "2 circular dependencies detected");
    }

    #[test]
    fn high_complexity_threshold_is_strict() {
        let five = vec!["B", "C", "D", "E", "F"];
        let six = vec!["B", "C", "D", "E", "F", "G"];

        let graph = scheduled(graph_of(&[("A", five)]), vec![]);
        assert!(collect_warnings(&graph, 5).is_empty());

        let graph = scheduled(graph_of(&[("A", six)]), vec![]);
        assert_eq!(
            collect_warnings(&graph, 5),
            vec!["1 components with high complexity detected"]
        );
    }

    #[test]
    fn unscheduled_components_are_not_warned_twice() {
        let graph = graph_of(&[("A", vec!["B"]), ("B", vec!["A"]), ("C", vec![])]).with_analysis(
            vec!["C".into()],
            vec![vec!["A".into(), "B".into(), "A".into()]],
        );
        assert_eq!(
            collect_warnings(&graph, 5),
            vec!["1 circular dependency detected", "A → B → A"]
        );
    }

    #[test]
    fn duplicate_name_warning() {
        let mut graph = DependencyGraph::new();
        graph.add_component(DependencyGraphNode::new("Button", "atoms/Button", Tier::Atom), vec![], vec![]);
        graph.add_component(
            DependencyGraphNode::new("Button", "molecules/Button", Tier::Molecule),
            vec![],
            vec![],
        );
        let graph = scheduled(graph, vec![]);

        assert_eq!(
            collect_warnings(&graph, 5),
            vec!["Duplicate component name Button: molecules/Button replaces atoms/Button"]
        );
    }

    #[test]
    fn report_carries_static_recommendations() {
        let strategy = report(DependencyGraph::new(), vec![], 5);

        assert_eq!(strategy.recommendations.len(), 5);
        assert!(strategy.recommendations[0].starts_with("Migrate tier by tier"));
        assert!(strategy.phases.is_empty());
        assert!(!strategy.has_warnings());
        assert_eq!(strategy.total_estimated_minutes(), 0);
    }
}
