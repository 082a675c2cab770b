//! Build order computation
//!
//! Two stages:
//!
//! 1. An elimination pass over tracked components. `in_degree[D]` counts how
//!    many tracked components import `D`, so the pass starts from components
//!    nobody imports and emits the most imported ones last.
//! 2. A stable sort by tier rank, with the elimination order as tie-break.
//!
//! The tier sort dominates: the result is not guaranteed to put every
//! dependency before its dependents across tiers. Components that the
//! elimination pass never frees (cycle members and whatever only they
//! import) are left out of the order.

use std::collections::VecDeque;

use indexmap::IndexMap;

use crate::domain::DependencyGraph;

/// Runs the elimination pass and returns the working order
pub fn elimination_order(graph: &DependencyGraph) -> Vec<&str> {
    let mut in_degree: IndexMap<&str, usize> =
        graph.component_names().map(|name| (name, 0)).collect();

    for name in graph.component_names() {
        for dep in graph.dependencies(name) {
            if let Some(count) = in_degree.get_mut(dep.as_str()) {
                *count += 1;
            }
        }
    }

    let mut queue: VecDeque<&str> = in_degree
        .iter()
        .filter(|(_, count)| **count == 0)
        .map(|(name, _)| *name)
        .collect();
    let mut order = Vec::with_capacity(graph.len());

    while let Some(name) = queue.pop_front() {
        order.push(name);

        for dep in graph.dependencies(name) {
            if let Some(count) = in_degree.get_mut(dep.as_str()) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(dep);
                }
            }
        }
    }

    order
}

/// Computes the final build order: elimination order re-sorted by tier
pub fn build_order(graph: &DependencyGraph) -> Vec<String> {
    let mut order = elimination_order(graph);
    order.sort_by_key(|name| graph.tier(name).map(|tier| tier.rank()));

    if order.len() < graph.len() {
        tracing::debug!(
            scheduled = order.len(),
            components = graph.len(),
            "build order is incomplete"
        );
    }

    order.into_iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DependencyGraphNode, Tier};

    fn graph_of(nodes: &[(&str, Tier, Vec<&str>)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (name, tier, deps) in nodes {
            graph.add_component(
                DependencyGraphNode::new(*name, *name, *tier),
                deps.iter().map(|d| d.to_string()).collect(),
                vec![],
            );
        }
        graph
    }

    #[test]
    fn elimination_emits_most_imported_last() {
        let graph = graph_of(&[
            ("Button", Tier::Atom, vec![]),
            ("Card", Tier::Molecule, vec!["Button"]),
            ("LoginPage", Tier::Page, vec!["Card"]),
        ]);

        assert_eq!(elimination_order(&graph), vec!["LoginPage", "Card", "Button"]);
        assert_eq!(build_order(&graph), vec!["Button", "Card", "LoginPage"]);
    }

    #[test]
    fn tier_beats_dependency_direction() {
        // An organism importing a page still comes first
        let graph = graph_of(&[
            ("Sidebar", Tier::Organism, vec!["Settings"]),
            ("Settings", Tier::Page, vec![]),
        ]);

        assert_eq!(build_order(&graph), vec!["Sidebar", "Settings"]);
    }

    #[test]
    fn ties_keep_elimination_order() {
        let graph = graph_of(&[
            ("Icon", Tier::Atom, vec![]),
            ("Label", Tier::Atom, vec![]),
            ("Badge", Tier::Atom, vec!["Icon", "Label"]),
        ]);

        assert_eq!(elimination_order(&graph), vec!["Badge", "Icon", "Label"]);
        assert_eq!(build_order(&graph), vec!["Badge", "Icon", "Label"]);
    }

    #[test]
    fn duplicate_imports_count_twice() {
        let graph = graph_of(&[
            ("Icon", Tier::Atom, vec![]),
            ("Button", Tier::Atom, vec!["Icon", "Icon"]),
        ]);

        assert_eq!(elimination_order(&graph), vec!["Button", "Icon"]);
    }

    #[test]
    fn untracked_dependencies_are_ignored() {
        let graph = graph_of(&[
            ("Card", Tier::Molecule, vec!["Ghost"]),
            ("Button", Tier::Atom, vec![]),
        ]);

        assert_eq!(build_order(&graph), vec!["Button", "Card"]);
    }

    #[test]
    fn cycle_members_are_omitted() {
        let graph = graph_of(&[
            ("A", Tier::Molecule, vec!["B"]),
            ("B", Tier::Molecule, vec!["A", "C"]),
            ("C", Tier::Atom, vec![]),
            ("D", Tier::Page, vec![]),
        ]);

        assert_eq!(build_order(&graph), vec!["D"]);
    }

    #[test]
    fn empty_graph() {
        assert!(build_order(&DependencyGraph::new()).is_empty());
    }
}
