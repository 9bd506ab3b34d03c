//! Cycle detection over the parent graph.
//!
//! Every node has at most one parent, so a walk from any label is a single
//! chain. The walk keeps its own path on an explicit stack instead of
//! recursing, so deep or adversarial sheets cannot exhaust the call stack.

use std::collections::{BTreeSet, HashSet};

use petgraph::graph::NodeIndex;
use petgraph::visit::{VisitMap, Visitable};

use super::graph::ParentGraph;

/// Labels that must be excluded, and the cycles that caused it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Labels on a cycle or whose parent chain runs into one.
    pub problematic: BTreeSet<String>,
    /// Each distinct cycle once, members in walk order.
    pub cycles: Vec<Vec<String>>,
}

impl CycleReport {
    pub fn is_problematic(&self, label: &str) -> bool {
        self.problematic.contains(label)
    }

    pub fn is_clean(&self) -> bool {
        self.problematic.is_empty()
    }
}

enum WalkEnd {
    /// Reached a root, an unresolved parent, or a verified-clean node.
    Clean,
    /// Re-entered the node at this path position.
    Cycle(usize),
    /// Reached a node an earlier walk already flagged.
    Flagged,
}

/// Walk up from every label and flag each walk that ends in a cycle.
pub fn find_cycles(graph: &ParentGraph) -> CycleReport {
    let mut clean = graph.graph.visit_map();
    let mut flagged = graph.graph.visit_map();
    let mut report = CycleReport::default();

    let mut path: Vec<NodeIndex> = Vec::new();
    let mut on_path: HashSet<NodeIndex> = HashSet::new();

    for start in graph.graph.node_indices() {
        if clean.is_visited(&start) || flagged.is_visited(&start) {
            continue;
        }

        path.clear();
        on_path.clear();
        let mut cursor = Some(start);

        let end = loop {
            let Some(node) = cursor else {
                break WalkEnd::Clean;
            };
            if on_path.contains(&node) {
                let entry = path.iter().position(|&n| n == node).unwrap_or(0);
                break WalkEnd::Cycle(entry);
            }
            if clean.is_visited(&node) {
                break WalkEnd::Clean;
            }
            if flagged.is_visited(&node) {
                break WalkEnd::Flagged;
            }
            path.push(node);
            on_path.insert(node);
            cursor = graph.parent(node);
        };

        match end {
            WalkEnd::Clean => {
                for &node in &path {
                    clean.visit(node);
                }
            }
            WalkEnd::Cycle(entry) => {
                let cycle: Vec<String> = path[entry..]
                    .iter()
                    .map(|&n| graph.label(n).to_string())
                    .collect();
                log::warn!("Cycle detected: {}", describe_cycle(&cycle));
                report.cycles.push(cycle);
                flag_path(graph, &path, &mut flagged, &mut report);
            }
            WalkEnd::Flagged => {
                flag_path(graph, &path, &mut flagged, &mut report);
            }
        }
    }

    if !report.is_clean() {
        log::warn!("Problematic nodes: {:?}", report.problematic);
    }

    report
}

fn flag_path(
    graph: &ParentGraph,
    path: &[NodeIndex],
    flagged: &mut <petgraph::graph::DiGraph<String, ()> as Visitable>::Map,
    report: &mut CycleReport,
) {
    for &node in path {
        flagged.visit(node);
        report.problematic.insert(graph.label(node).to_string());
    }
}

/// `A → B → A` style rendering of a cycle.
pub fn describe_cycle(cycle: &[String]) -> String {
    let mut parts: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        parts.push(first.as_str());
    }
    parts.join(" → ")
}
