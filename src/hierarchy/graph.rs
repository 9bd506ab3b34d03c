//! petgraph-based child → parent graph over record labels.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};

use crate::load::CandidateRecord;

/// The adjacency mapping: one node per distinct label, one outgoing edge per
/// node pointing at its parent.
///
/// Only the first record carrying a label decides its parent. A parent that
/// is not itself a label gets no edge, which ends any walk through it.
pub struct ParentGraph {
    pub graph: DiGraph<String, ()>,
    pub node_indices: HashMap<String, NodeIndex>,
}

impl ParentGraph {
    pub fn build(records: &[CandidateRecord]) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut first_parent: Vec<&str> = Vec::new();

        // Add all nodes, first occurrence wins
        for record in records {
            if record.label.is_empty() || node_indices.contains_key(&record.label) {
                continue;
            }
            let idx = graph.add_node(record.label.clone());
            node_indices.insert(record.label.clone(), idx);
            first_parent.push(record.parent.as_str());
        }

        // Add parent edges
        for (i, parent) in first_parent.into_iter().enumerate() {
            if let Some(&p) = node_indices.get(parent) {
                graph.add_edge(NodeIndex::new(i), p, ());
            }
        }

        ParentGraph {
            graph,
            node_indices,
        }
    }

    /// The resolved parent node, if any.
    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, petgraph::Direction::Outgoing)
            .next()
    }

    pub fn label(&self, idx: NodeIndex) -> &str {
        &self.graph[idx]
    }
}
