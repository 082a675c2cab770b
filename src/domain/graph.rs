//! Dependency graph for components
//!
//! Edges are plain adjacency lists keyed by component name, so cycles are
//! representable without any reference identity. A graph is assembled once
//! by the builder, annotated with its build order and cycles, and then only
//! read. Petgraph is used for the strongly connected group query.

use std::collections::HashSet;

use indexmap::IndexMap;
use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};

use super::dependency::DependencyGraphNode;
use super::tier::Tier;

/// The resolved component graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyGraph {
    /// Tracked components in input order
    components: IndexMap<String, DependencyGraphNode>,

    /// Internal dependency names per component, in import order
    dependencies: IndexMap<String, Vec<String>>,

    /// Bare package specifiers per component, in import order
    external_dependencies: IndexMap<String, Vec<String>>,

    build_order: Vec<String>,

    cycles: Vec<Vec<String>>,

    /// Paths dropped because a later input derived the same name
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    duplicates: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    /// Creates an empty dependency graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component with its internal and external dependencies
    ///
    /// Registering a name twice replaces the earlier entry but keeps its
    /// position; the replaced path is recorded in [`duplicates`](Self::duplicates).
    /// Returns true if the name was already present.
    pub fn add_component(
        &mut self,
        node: DependencyGraphNode,
        dependencies: Vec<String>,
        external: Vec<String>,
    ) -> bool {
        let name = node.name.clone();
        let replaced = self.components.insert(name.clone(), node);
        self.dependencies.insert(name.clone(), dependencies);
        self.external_dependencies.insert(name.clone(), external);

        match replaced {
            Some(old) => {
                self.duplicates.entry(name).or_default().push(old.path);
                true
            }
            None => false,
        }
    }

    /// Attaches the analysis results, consuming the bare graph
    pub fn with_analysis(mut self, build_order: Vec<String>, cycles: Vec<Vec<String>>) -> Self {
        self.build_order = build_order;
        self.cycles = cycles;
        self
    }

    pub fn components(&self) -> &IndexMap<String, DependencyGraphNode> {
        &self.components
    }

    pub fn adjacency(&self) -> &IndexMap<String, Vec<String>> {
        &self.dependencies
    }

    pub fn build_order(&self) -> &[String] {
        &self.build_order
    }

    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// Returns names derived from more than one input, with the dropped paths
    pub fn duplicates(&self) -> &IndexMap<String, Vec<String>> {
        &self.duplicates
    }

    pub fn component(&self, name: &str) -> Option<&DependencyGraphNode> {
        self.components.get(name)
    }

    pub fn tier(&self, name: &str) -> Option<Tier> {
        self.components.get(name).map(|node| node.tier)
    }

    /// Returns the internal dependencies of a component (tracked or not)
    pub fn dependencies(&self, name: &str) -> &[String] {
        self.dependencies.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns the bare package specifiers a component imports
    pub fn external_dependencies(&self, name: &str) -> &[String] {
        self.external_dependencies
            .get(name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Returns the tracked components that import `name`
    pub fn dependents(&self, name: &str) -> Vec<&str> {
        self.dependencies
            .iter()
            .filter(|(_, deps)| deps.iter().any(|dep| dep == name))
            .map(|(component, _)| component.as_str())
            .collect()
    }

    /// Returns dependency names that are not tracked components, first-seen order
    pub fn untracked_dependencies(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for dep in self.dependencies.values().flatten() {
            if !self.contains(dep) && !seen.contains(&dep.as_str()) {
                seen.push(dep);
            }
        }
        seen
    }

    /// Returns tracked components missing from the build order
    pub fn unscheduled(&self) -> Vec<&str> {
        let scheduled: HashSet<&str> = self.build_order.iter().map(String::as_str).collect();
        self.components
            .keys()
            .filter(|name| !scheduled.contains(name.as_str()))
            .map(String::as_str)
            .collect()
    }

    /// Returns true if every tracked component has a place in the build order
    pub fn is_complete(&self) -> bool {
        self.build_order.len() == self.components.len() && self.unscheduled().is_empty()
    }

    /// Returns true if the graph contains the component
    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Returns the number of tracked components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Returns true if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Returns all component names in input order
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Returns every group of tracked components that import each other
    ///
    /// Unlike [`cycles`](Self::cycles), which reports the closed walks found
    /// by a single depth-first pass, this finds all strongly connected groups
    /// (Tarjan). A group is reported when it has more than one member or its
    /// only member imports itself. Members are listed in input order and
    /// groups are ordered by their first member.
    pub fn cycle_groups(&self) -> Vec<Vec<String>> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.len(), 0);
        let indices: Vec<NodeIndex> = (0..self.len()).map(|i| graph.add_node(i)).collect();

        for (name, deps) in &self.dependencies {
            let Some(from) = self.components.get_index_of(name.as_str()) else {
                continue;
            };
            for dep in deps {
                if let Some(to) = self.components.get_index_of(dep.as_str()) {
                    graph.add_edge(indices[from], indices[to], ());
                }
            }
        }

        let mut groups: Vec<Vec<usize>> = tarjan_scc(&graph)
            .into_iter()
            .filter(|scc| {
                scc.len() > 1 || scc.iter().any(|idx| graph.contains_edge(*idx, *idx))
            })
            .map(|scc| {
                let mut members: Vec<usize> = scc.into_iter().map(|idx| graph[idx]).collect();
                members.sort_unstable();
                members
            })
            .collect();
        groups.sort();

        groups
            .into_iter()
            .map(|members| {
                members
                    .into_iter()
                    .filter_map(|i| self.components.get_index(i).map(|(name, _)| name.clone()))
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_of(edges: &[(&str, Vec<&str>)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for (name, deps) in edges {
            graph.add_component(
                DependencyGraphNode::new(*name, *name, Tier::Molecule),
                deps.iter().map(|d| d.to_string()).collect(),
                vec![],
            );
        }
        graph
    }

    #[test]
    fn empty_graph() {
        let graph = DependencyGraph::new();
        assert!(graph.is_empty());
        assert_eq!(graph.len(), 0);
        assert!(graph.is_complete());
        assert!(graph.cycle_groups().is_empty());
    }

    #[test]
    fn dependencies_and_dependents() {
        let graph = graph_of(&[("Button", vec![]), ("Card", vec!["Button"]), ("Form", vec!["Button"])]);

        assert_eq!(graph.dependencies("Card"), ["Button".to_string()]);
        assert_eq!(graph.dependents("Button"), vec!["Card", "Form"]);
        assert!(graph.dependencies("Missing").is_empty());
    }

    #[test]
    fn adjacency_keys_match_components() {
        let graph = graph_of(&[("Button", vec![]), ("Card", vec!["Button", "Ghost"])]);
        let component_keys: Vec<_> = graph.components().keys().collect();
        let adjacency_keys: Vec<_> = graph.adjacency().keys().collect();
        assert_eq!(component_keys, adjacency_keys);
    }

    #[test]
    fn untracked_dependencies_first_seen() {
        let graph = graph_of(&[
            ("Card", vec!["Ghost", "Button", "Ghost"]),
            ("Button", vec!["Shadow"]),
        ]);
        assert_eq!(graph.untracked_dependencies(), vec!["Ghost", "Shadow"]);
    }

    #[test]
    fn duplicate_name_replaces_in_place() {
        let mut graph = graph_of(&[("Button", vec![]), ("Card", vec!["Button"])]);
        let replaced = graph.add_component(
            DependencyGraphNode::new("Button", "atoms/Button", Tier::Atom),
            vec!["Icon".into()],
            vec!["react".into()],
        );

        assert!(replaced);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.duplicates().get("Button"), Some(&vec!["Button".to_string()]));
        assert_eq!(graph.component_names().collect::<Vec<_>>(), vec!["Button", "Card"]);
        assert_eq!(graph.tier("Button"), Some(Tier::Atom));
        assert_eq!(graph.external_dependencies("Button"), ["react".to_string()]);
    }

    #[test]
    fn unscheduled_components() {
        let graph = graph_of(&[("A", vec!["B"]), ("B", vec!["A"]), ("C", vec![])])
            .with_analysis(vec!["C".into()], vec![]);

        assert_eq!(graph.unscheduled(), vec!["A", "B"]);
        assert!(!graph.is_complete());
    }

    #[test]
    fn cycle_groups_find_every_group() {
        // Two cycles through B; the second is reachable only via a visited node
        let graph = graph_of(&[
            ("A", vec!["B"]),
            ("B", vec!["A", "C"]),
            ("C", vec!["B"]),
            ("D", vec!["D"]),
            ("E", vec!["A"]),
        ]);

        assert_eq!(
            graph.cycle_groups(),
            vec![
                vec!["A".to_string(), "B".to_string(), "C".to_string()],
                vec!["D".to_string()],
            ]
        );
    }

    #[test]
    fn cycle_groups_after_deserializing_reordered_keys() {
        let json = r#"{
            "components": {
                "A": {"name": "A", "path": "A", "kind": "component", "isExternal": false, "tier": "molecule", "rawImports": []},
                "B": {"name": "B", "path": "B", "kind": "component", "isExternal": false, "tier": "molecule", "rawImports": []},
                "C": {"name": "C", "path": "C", "kind": "component", "isExternal": false, "tier": "molecule", "rawImports": []}
            },
            "dependencies": {"C": [], "A": ["B"], "B": ["A"]},
            "externalDependencies": {},
            "buildOrder": ["C"],
            "cycles": [["A", "B", "A"]]
        }"#;
        let graph: DependencyGraph = serde_json::from_str(json).unwrap();

        assert_eq!(
            graph.cycle_groups(),
            vec![vec!["A".to_string(), "B".to_string()]]
        );
        assert!(graph.duplicates().is_empty());
    }

    #[test]
    fn acyclic_graph_has_no_groups() {
        let graph = graph_of(&[("A", vec!["B"]), ("B", vec!["C"]), ("C", vec![])]);
        assert!(graph.cycle_groups().is_empty());
    }
}
