//! Resolver entry point
//!
//! Runs the whole pipeline (classify, build, detect cycles, order, plan,
//! report) once per call. The resolver only holds its configuration; every
//! call returns a fresh, independent [`ConversionStrategy`].

use crate::builder::build_graph;
use crate::classifier::ImportClassifier;
use crate::config::ResolverConfig;
use crate::cycles::detect_cycles;
use crate::domain::DependencyGraph;
use crate::order::build_order;
use crate::phases::plan_phases;
use crate::strategy::{report, ConversionStrategy};

/// Pipeline runner bound to one configuration
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: ResolverConfig,
}

impl Resolver {
    pub fn new(config: ResolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Builds the graph and attaches its cycles and build order
    pub fn resolve_graph<K, V>(&self, sources: impl IntoIterator<Item = (K, V)>) -> DependencyGraph
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let classifier = ImportClassifier::new(&self.config.rules);
        let graph = build_graph(sources, &classifier);
        let cycles = detect_cycles(&graph);
        let order = build_order(&graph);
        graph.with_analysis(order, cycles)
    }

    /// Resolves `component name -> source` pairs into a conversion strategy
    pub fn resolve<K, V>(&self, sources: impl IntoIterator<Item = (K, V)>) -> ConversionStrategy
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let _span = tracing::debug_span!("resolve").entered();

        let graph = self.resolve_graph(sources);
        let phases = plan_phases(&graph, &self.config.phase_minutes);
        let strategy = report(graph, phases, self.config.high_complexity_threshold);

        tracing::debug!(
            components = strategy.graph.len(),
            phases = strategy.phases.len(),
            minutes = strategy.total_estimated_minutes(),
            "resolved conversion strategy"
        );
        strategy
    }
}

/// Resolves sources with the default configuration
pub fn resolve<K, V>(sources: impl IntoIterator<Item = (K, V)>) -> ConversionStrategy
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    Resolver::default().resolve(sources)
}
