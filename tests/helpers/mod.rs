use std::collections::HashMap;

use sunburst::hierarchy::Hierarchy;
use sunburst::load::{self, CandidateRecord, RecordId, RecordSet};

// =============================================================================
// Record builders
// =============================================================================

/// A record with an integer id.
pub fn record(id: i64, label: &str, parent: &str, content: &str) -> CandidateRecord {
    CandidateRecord::new(id, label, parent, content)
}

/// A labeled record with no id: usable as a parent, never rendered.
pub fn unnumbered(label: &str, parent: &str) -> CandidateRecord {
    CandidateRecord {
        id: RecordId::Missing,
        label: label.into(),
        parent: parent.into(),
        content: String::new(),
    }
}

/// Load rows given as a JSON array literal.
pub fn load_rows(json: &str) -> RecordSet {
    load::load_json(json).expect("rows should parse")
}

pub fn content_rows() -> RecordSet {
    load_rows(include_str!("../fixtures/content_rows.json"))
}

// =============================================================================
// Hierarchy properties
// =============================================================================

pub fn assert_aligned(h: &Hierarchy) {
    assert_eq!(h.labels().len(), h.parents().len(), "labels/parents length");
    assert_eq!(h.labels().len(), h.content().len(), "labels/content length");
}

/// Following parents from any segment reaches a root or an unresolved
/// reference within `len` steps.
pub fn assert_acyclic(h: &Hierarchy) {
    let index: HashMap<&str, usize> = h
        .labels()
        .iter()
        .enumerate()
        .rev()
        .map(|(i, l)| (l.as_str(), i))
        .collect();

    for start in 0..h.len() {
        let mut current = start;
        let mut steps = 0;
        loop {
            let parent = h.parents()[current].as_str();
            let Some(&next) = (!parent.is_empty()).then(|| index.get(parent)).flatten() else {
                break;
            };
            steps += 1;
            assert!(
                steps <= h.len(),
                "parent chain from '{}' does not terminate",
                h.labels()[start]
            );
            current = next;
        }
    }
}
