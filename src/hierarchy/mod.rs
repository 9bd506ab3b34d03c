//! The validated hierarchy handed to the sunburst renderer, plus the graph
//! machinery used to produce it.

pub mod cycles;
pub mod graph;

pub use cycles::{CycleReport, find_cycles};
pub use graph::ParentGraph;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::load::CandidateRecord;

/// Three index-aligned sequences: position `i` of `labels`, `parents` and
/// `content` all describe the same segment. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HierarchyParts")]
pub struct Hierarchy {
    labels: Vec<String>,
    parents: Vec<String>,
    content: Vec<String>,
}

/// Unchecked column form of a `Hierarchy`, as received from JS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HierarchyParts {
    pub labels: Vec<String>,
    pub parents: Vec<String>,
    pub content: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("hierarchy columns are misaligned: {labels} labels, {parents} parents, {content} content")]
    Misaligned {
        labels: usize,
        parents: usize,
        content: usize,
    },
}

impl TryFrom<HierarchyParts> for Hierarchy {
    type Error = HierarchyError;

    fn try_from(parts: HierarchyParts) -> Result<Self, Self::Error> {
        let HierarchyParts {
            labels,
            parents,
            content,
        } = parts;
        if labels.len() != parents.len() || labels.len() != content.len() {
            return Err(HierarchyError::Misaligned {
                labels: labels.len(),
                parents: parents.len(),
                content: content.len(),
            });
        }
        Ok(Hierarchy {
            labels,
            parents,
            content,
        })
    }
}

impl From<Hierarchy> for HierarchyParts {
    fn from(h: Hierarchy) -> Self {
        HierarchyParts {
            labels: h.labels,
            parents: h.parents,
            content: h.content,
        }
    }
}

/// One segment of the chart, borrowed from a `Hierarchy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub label: &'a str,
    pub parent: &'a str,
    pub content: &'a str,
}

impl Hierarchy {
    /// Build from `(label, parent, content)` triples, in display order.
    pub fn from_segments<I, L, P, C>(segments: I) -> Self
    where
        I: IntoIterator<Item = (L, P, C)>,
        L: Into<String>,
        P: Into<String>,
        C: Into<String>,
    {
        let mut h = Hierarchy::default();
        for (label, parent, content) in segments {
            h.labels.push(label.into());
            h.parents.push(parent.into());
            h.content.push(content.into());
        }
        h
    }

    pub(crate) fn from_records<'a>(records: impl IntoIterator<Item = &'a CandidateRecord>) -> Self {
        Self::from_segments(
            records
                .into_iter()
                .map(|r| (r.label.clone(), r.parent.clone(), r.content.clone())),
        )
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn parents(&self) -> &[String] {
        &self.parents
    }

    pub fn content(&self) -> &[String] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn segment(&self, index: usize) -> Option<Segment<'_>> {
        Some(Segment {
            label: self.labels.get(index).map(String::as_str)?,
            parent: self.parents.get(index).map(String::as_str)?,
            content: self.content.get(index).map(String::as_str)?,
        })
    }

    /// Indices whose non-empty parent names no label in the hierarchy.
    /// These are left as-is and only reported (`V001`); the renderer decides
    /// what to do with them.
    pub fn unresolved_parents(&self) -> Vec<usize> {
        let known: HashSet<&str> = self.labels.iter().map(String::as_str).collect();
        self.parents
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty() && !known.contains(p.as_str()))
            .map(|(i, _)| i)
            .collect()
    }
}
