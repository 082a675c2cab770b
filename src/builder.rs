//! Graph assembly
//!
//! Runs the classifier over every component source and registers the
//! results as graph nodes. External imports are kept aside per component
//! and never become edges.

use crate::classifier::ImportClassifier;
use crate::domain::{DependencyGraph, DependencyGraphNode};

/// Builds a graph (without build order or cycles) from `name -> source` pairs
///
/// Input order is preserved and determines every later traversal order.
/// Keys are component paths such as `atoms/Button`; the tracked name is the
/// last segment with its extension stripped.
pub fn build_graph<K, V>(
    sources: impl IntoIterator<Item = (K, V)>,
    classifier: &ImportClassifier<'_>,
) -> DependencyGraph
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut graph = DependencyGraph::new();
    let mut edges = 0usize;

    for (key, source) in sources {
        let key = key.as_ref();
        let Some(name) = classifier.component_name(key) else {
            tracing::warn!(key, "skipping component without a usable name");
            continue;
        };

        let tier = classifier.tier_for(key, &name);
        let deps = classifier.classify(source.as_ref(), &name);

        let (internal, external): (Vec<_>, Vec<_>) = deps.iter().partition(|d| d.is_internal());
        let internal: Vec<String> = internal.into_iter().map(|d| d.name.clone()).collect();
        let external: Vec<String> = external.into_iter().map(|d| d.path.clone()).collect();
        edges += internal.len();

        let node = DependencyGraphNode::new(name.as_str(), key, tier).with_raw_imports(&deps);
        if graph.add_component(node, internal, external) {
            tracing::warn!(
                key,
                component = name.as_str(),
                "duplicate component name, later source replaces the earlier one"
            );
        }
    }

    tracing::debug!(components = graph.len(), edges, "built dependency graph");
    graph
}
