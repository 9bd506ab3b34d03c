//! Validation phase: candidate records → `Hierarchy`.
//!
//! Builds the parent graph, excludes every label whose chain runs into a
//! cycle, drops records without an integer id, and orders the rest by id.
//! Never fails; bad input only shrinks the output.

use std::collections::BTreeSet;

use crate::error::SheetError;
use crate::hierarchy::{Hierarchy, ParentGraph, cycles};
use crate::load::CandidateRecord;

/// Number of leading items echoed to the debug log after validation.
const PREVIEW_ITEMS: usize = 5;

/// Outcome of one validation pass.
#[derive(Debug, Clone, Default)]
pub struct Validation {
    pub hierarchy: Hierarchy,
    pub problematic: BTreeSet<String>,
    pub diagnostics: Vec<SheetError>,
}

/// Validate and keep only the hierarchy.
pub fn validate(records: &[CandidateRecord]) -> Hierarchy {
    validate_with_report(records).hierarchy
}

/// Validate, keeping the excluded labels, one `C001` per cycle found and one
/// `V001` per segment whose parent is not in the output.
pub fn validate_with_report(records: &[CandidateRecord]) -> Validation {
    // 1. Adjacency
    let graph = ParentGraph::build(records);

    // 2. Cycles
    let report = cycles::find_cycles(&graph);
    let mut diagnostics: Vec<SheetError> = report
        .cycles
        .iter()
        .map(|cycle| {
            SheetError::validate(
                "C001",
                format!("Cycle detected: {}", cycles::describe_cycle(cycle)),
                cycle.first().cloned(),
            )
        })
        .collect();

    // 3. Filter
    let mut kept: Vec<(i64, &CandidateRecord)> = records
        .iter()
        .filter(|r| !report.is_problematic(&r.label))
        .filter_map(|r| r.id.as_int().map(|id| (id, r)))
        .collect();

    // 4. Sort (stable, so duplicate ids keep sheet order)
    kept.sort_by_key(|&(id, _)| id);

    // 5. Project
    let hierarchy = Hierarchy::from_records(kept.into_iter().map(|(_, r)| r));

    // 6. Report parents that name no segment
    for i in hierarchy.unresolved_parents() {
        let (label, parent) = (&hierarchy.labels()[i], &hierarchy.parents()[i]);
        log::debug!("'{}' keeps unresolved parent '{}'", label, parent);
        diagnostics.push(SheetError::validate(
            "V001",
            format!("Parent '{}' is not a segment of the chart", parent),
            Some(label.clone()),
        ));
    }

    log::info!("Loaded {} items", hierarchy.len());
    log::debug!(
        "First items: labels {:?}, parents {:?}",
        &hierarchy.labels()[..hierarchy.len().min(PREVIEW_ITEMS)],
        &hierarchy.parents()[..hierarchy.len().min(PREVIEW_ITEMS)],
    );

    Validation {
        hierarchy,
        problematic: report.problematic,
        diagnostics,
    }
}
