//! RelGraph Graph - Relationship graph and visualization
//!
//! Builds a directed multigraph from relationship triples, lays it out
//! with a seeded Fruchterman-Reingold spring model and renders it either
//! as an interactive Plotly page or as a static SVG/PNG image.

pub mod layout;
pub mod plotly;
pub mod raster;

pub use layout::{Layout, SpringLayout};

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use tracing::info;

use relgraph_core::{OutputFormat, RelGraphError, Relationship, Result, VisualizationConfig};

// ============================================================================
// Relationship Graph
// ============================================================================

/// Directed multigraph of entities linked by predicates
///
/// Each distinct string is one node. Each triple is one edge, so parallel
/// edges and self-loops survive.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    graph: DiGraph<String, String>,
    index: HashMap<String, NodeIndex>,
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from triples in order
    pub fn from_relationships(relationships: &[Relationship]) -> Self {
        let mut graph = Self::new();
        for rel in relationships {
            graph.add_relationship(rel);
        }
        graph
    }

    /// Add one triple as an edge
    pub fn add_relationship(&mut self, rel: &Relationship) {
        let subject = self.node(&rel.subject);
        let object = self.node(&rel.object);
        self.graph.add_edge(subject, object, rel.predicate.clone());
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&index) = self.index.get(name) {
            return index;
        }
        let index = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), index);
        index
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Node names in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Edges as `(source index, target index, predicate)` in insertion order
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, &str)> + '_ {
        self.graph
            .edge_references()
            .map(|e| (e.source().index(), e.target().index(), e.weight().as_str()))
    }

    /// In-degree plus out-degree; a self-loop counts twice
    pub fn degree(&self, node: usize) -> usize {
        let index = NodeIndex::new(node);
        self.graph.edges_directed(index, Direction::Outgoing).count()
            + self.graph.edges_directed(index, Direction::Incoming).count()
    }

    /// Position of a node by name
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).map(|i| i.index())
    }
}

/// Marker diameter for a node of the given degree
pub fn node_size(degree: usize) -> f64 {
    15.0 + 10.0 * degree as f64
}

// ============================================================================
// Visualizer
// ============================================================================

/// Lays out and renders relationship graphs
#[derive(Debug, Clone)]
pub struct Visualizer {
    config: VisualizationConfig,
}

impl Visualizer {
    pub fn new(config: VisualizationConfig) -> Self {
        Self { config }
    }

    /// Write to a different path than the configured one
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output_path = path.into();
        self
    }

    /// Force an output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.config.format = Some(format);
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Render the relationships and return the written path
    pub fn render(&self, relationships: &[Relationship]) -> Result<PathBuf> {
        let graph = RelationGraph::from_relationships(relationships);
        let positions = SpringLayout::from_config(&self.config).compute(&graph);
        let path = self.config.output_path.clone();

        match self.config.resolved_format() {
            OutputFormat::Html => {
                let html = plotly::render_html(&graph, &positions, &self.config)?;
                std::fs::write(&path, html).map_err(|e| RelGraphError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
            }
            OutputFormat::Svg => raster::render_svg_file(&graph, &positions, &self.config, &path)?,
            OutputFormat::Png => raster::render_png(&graph, &positions, &self.config, &path)?,
        }

        info!(
            path = %path.display(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Graph rendered"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rels() -> Vec<Relationship> {
        vec![
            Relationship::new("UNMIK", "discuss", "mandate"),
            Relationship::new("UNMIK", "is associated with", "KTA"),
            Relationship::new("UNMIK", "support", "KTA"),
            Relationship::new("KTA", "review", "KTA"),
        ]
    }

    #[test]
    fn test_multigraph_keeps_parallel_edges_and_loops() {
        let graph = RelationGraph::from_relationships(&rels());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.nodes().collect::<Vec<_>>(), vec!["UNMIK", "mandate", "KTA"]);
    }

    #[test]
    fn test_degree_and_node_size() {
        let graph = RelationGraph::from_relationships(&rels());
        let unmik = graph.index_of("UNMIK").unwrap();
        let kta = graph.index_of("KTA").unwrap();
        assert_eq!(graph.degree(unmik), 3);
        // two parallel in-edges plus a self-loop in and out
        assert_eq!(graph.degree(kta), 4);
        assert_eq!(node_size(graph.degree(unmik)), 45.0);
        assert_eq!(node_size(0), 15.0);
    }

    #[test]
    fn test_render_html_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.html");
        let written = Visualizer::new(VisualizationConfig::default())
            .with_output(&path)
            .render(&rels())
            .unwrap();
        assert_eq!(written, path);
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("Enhanced Entity Relationship Network"));
        assert!(html.contains("Plotly.newPlot"));
    }

    #[test]
    fn test_render_svg_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("graph.svg");
        Visualizer::new(VisualizationConfig::default())
            .with_output(&path)
            .render(&rels())
            .unwrap();
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_render_empty_graph() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.html");
        let written = Visualizer::new(VisualizationConfig::default())
            .with_output(&path)
            .render(&[])
            .unwrap();
        assert!(written.exists());
    }

    #[test]
    fn test_unwritable_output_fails() {
        let result = Visualizer::new(VisualizationConfig::default())
            .with_output("/nonexistent/dir/graph.html")
            .render(&rels());
        assert!(matches!(result, Err(RelGraphError::Io { .. })));
    }
}
