//! Import cycle detection
//!
//! A depth-first search starts from every component not yet visited, in
//! input order. When an edge reaches a name that is on the current
//! recursion stack, the path from that name to the current node, closed by
//! the name again, is recorded as a cycle.
//!
//! The visited set is shared across starts, so a node reached by an earlier
//! search is never explored again. Distinct cycles through such a node are
//! not all reported; [`DependencyGraph::cycle_groups`] gives the complete
//! strongly connected picture.

use std::collections::HashSet;

use crate::domain::DependencyGraph;

struct CycleSearch<'g> {
    graph: &'g DependencyGraph,
    visited: HashSet<&'g str>,
    on_stack: HashSet<&'g str>,
    path: Vec<&'g str>,
    cycles: Vec<Vec<String>>,
}

impl<'g> CycleSearch<'g> {
    fn enter(&mut self, node: &'g str) {
        self.visited.insert(node);
        self.on_stack.insert(node);
        self.path.push(node);
    }

    /// Depth-first search from `root` with an explicit frame stack
    ///
    /// Each frame is a node and the index of its next dependency to look
    /// at, so deep import chains never grow the call stack.
    fn visit(&mut self, root: &'g str) {
        let graph = self.graph;
        let mut frames: Vec<(&'g str, usize)> = vec![(root, 0)];
        self.enter(root);

        while let Some(frame) = frames.last_mut() {
            let (node, next) = *frame;
            let Some(dep) = graph.dependencies(node).get(next) else {
                frames.pop();
                self.path.pop();
                self.on_stack.remove(node);
                continue;
            };
            frame.1 += 1;

            let dep = dep.as_str();
            if self.on_stack.contains(dep) {
                if let Some(start) = self.path.iter().position(|n| *n == dep) {
                    let mut cycle: Vec<String> =
                        self.path[start..].iter().map(|n| n.to_string()).collect();
                    cycle.push(dep.to_string());
                    self.cycles.push(cycle);
                }
            } else if !self.visited.contains(dep) {
                self.enter(dep);
                frames.push((dep, 0));
            }
        }
    }
}

/// Finds import cycles as closed walks (first name repeated at the end)
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<String>> {
    let mut search = CycleSearch {
        graph,
        visited: HashSet::new(),
        on_stack: HashSet::new(),
        path: Vec::new(),
        cycles: Vec::new(),
    };

    for name in graph.component_names() {
        if !search.visited.contains(name) {
            search.visit(name);
        }
    }

    tracing::debug!(cycles = search.cycles.len(), "cycle detection finished");
    search.cycles
}
