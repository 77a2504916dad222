//! Read-only graph projection for visualization.
//!
//! Each friendship is stored on both endpoints. The projection folds that
//! back into one undirected edge per unordered pair, with the
//! lexicographically smaller id as `source`.

use crate::profile_store::ProfileStore;
use petgraph::dot::Dot;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// A profile as drawn on the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub name: String,
}

/// An undirected friendship edge for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub quality: u8,
}

/// Nodes and deduplicated edges, both sorted for stable output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GraphProjection {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphProjection {
    /// Projects every profile in `store`.
    ///
    /// Adjacency entries pointing at missing profiles are dropped.
    pub fn from_store(store: &ProfileStore) -> Self {
        let mut nodes: Vec<GraphNode> = store
            .enumerate_all()
            .map(|profile| GraphNode {
                id: profile.id().to_string(),
                name: profile.name().to_string(),
            })
            .collect();
        nodes.sort_by(|a, b| a.id.cmp(&b.id));

        let mut pairs: BTreeMap<(&str, &str), u8> = BTreeMap::new();
        for profile in store.enumerate_all() {
            for (friend_id, quality) in profile.friends() {
                let a = profile.id();
                let b = friend_id.as_str();
                if a == b || !store.exists(b) {
                    continue;
                }
                let key = if a < b { (a, b) } else { (b, a) };
                pairs.entry(key).or_insert(quality.get());
            }
        }

        let edges = pairs
            .into_iter()
            .map(|((source, target), quality)| GraphEdge {
                source: source.to_string(),
                target: target.to_string(),
                quality,
            })
            .collect();

        Self { nodes, edges }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Builds an undirected petgraph graph weighted by quality.
    pub fn to_graph(&self) -> UnGraph<String, u8> {
        let mut graph = UnGraph::with_capacity(self.nodes.len(), self.edges.len());
        let mut by_id: HashMap<&str, NodeIndex> = HashMap::new();

        for node in &self.nodes {
            by_id.insert(&node.id, graph.add_node(node.id.clone()));
        }
        for edge in &self.edges {
            if let (Some(&a), Some(&b)) = (
                by_id.get(edge.source.as_str()),
                by_id.get(edge.target.as_str()),
            ) {
                graph.add_edge(a, b, edge.quality);
            }
        }

        graph
    }

    /// Renders the projection in Graphviz DOT.
    pub fn to_dot(&self) -> String {
        let graph = self.to_graph();
        format!("{}", Dot::new(&graph))
    }
}
