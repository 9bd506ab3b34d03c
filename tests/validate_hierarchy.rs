//! Integration tests for the Validate phase: cycle exclusion, ordering and
//! index alignment of the hierarchy.

#[allow(dead_code)]
mod helpers;

use helpers::*;
use sunburst::validate::{validate, validate_with_report};

#[test]
fn root_child_and_two_node_cycle() {
    let records = vec![
        record(1, "Root", "", "r"),
        record(2, "Child", "Root", "c"),
        record(3, "Bad1", "Bad2", "x"),
        record(4, "Bad2", "Bad1", "y"),
    ];
    let h = validate(&records);
    assert_eq!(h.labels(), ["Root", "Child"]);
    assert_eq!(h.parents(), ["", "Root"]);
    assert_eq!(h.content(), ["r", "c"]);
}

#[test]
fn root_child_snapshot() {
    let records = vec![
        record(2, "Child", "Root", "c"),
        record(1, "Root", "", "r"),
    ];
    let h = validate(&records);
    insta::assert_json_snapshot!(h, @r###"
    {
      "labels": [
        "Root",
        "Child"
      ],
      "parents": [
        "",
        "Root"
      ],
      "content": [
        "r",
        "c"
      ]
    }
    "###);
}

#[test]
fn self_loop_is_excluded() {
    let h = validate(&[record(1, "A", "A", "a"), record(2, "B", "", "b")]);
    assert_eq!(h.labels(), ["B"]);
}

#[test]
fn descendants_of_a_cycle_are_excluded() {
    let records = vec![
        record(1, "A", "B", ""),
        record(2, "B", "A", ""),
        record(3, "Leaf", "A", ""),
        record(4, "Ok", "", ""),
    ];
    let report = validate_with_report(&records);
    assert_eq!(report.hierarchy.labels(), ["Ok"]);
    let flagged: Vec<&str> = report.problematic.iter().map(String::as_str).collect();
    assert_eq!(flagged, vec!["A", "B", "Leaf"]);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, "C001");
    assert_eq!(report.diagnostics[0].message, "Cycle detected: A → B → A");
}

#[test]
fn root_passes_through() {
    let h = validate(&[record(9, "Lonely", "", "only")]);
    assert_eq!(h.labels(), ["Lonely"]);
    assert_eq!(h.parents(), [""]);
}

#[test]
fn output_is_sorted_by_id() {
    let records = vec![
        record(30, "C", "A", ""),
        record(10, "A", "", ""),
        record(20, "B", "A", ""),
        record(-1, "Z", "", ""),
    ];
    let h = validate(&records);
    assert_eq!(h.labels(), ["Z", "A", "B", "C"]);
}

#[test]
fn duplicate_ids_keep_sheet_order() {
    let records = vec![
        record(1, "First", "", ""),
        record(0, "Zero", "", ""),
        record(1, "Second", "", ""),
    ];
    let h = validate(&records);
    assert_eq!(h.labels(), ["Zero", "First", "Second"]);
}

#[test]
fn empty_input_gives_empty_hierarchy() {
    let report = validate_with_report(&[]);
    assert!(report.hierarchy.is_empty());
    assert!(report.hierarchy.parents().is_empty());
    assert!(report.hierarchy.content().is_empty());
    assert!(report.problematic.is_empty());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn all_cyclic_input_gives_empty_hierarchy() {
    let h = validate(&[
        record(1, "A", "B", ""),
        record(2, "B", "C", ""),
        record(3, "C", "A", ""),
        record(4, "D", "D", ""),
    ]);
    assert!(h.is_empty());
    assert_aligned(&h);
}

#[test]
fn id_less_row_is_a_valid_parent() {
    let records = vec![unnumbered("Orphan", ""), record(1, "Kid", "Orphan", "k")];
    let h = validate(&records);
    assert_eq!(h.labels(), ["Kid"]);
    assert_eq!(h.parents(), ["Orphan"]);
}

#[test]
fn id_less_row_still_closes_a_cycle() {
    let records = vec![unnumbered("Hidden", "Kid"), record(1, "Kid", "Hidden", "k")];
    let h = validate(&records);
    assert!(h.is_empty());
}

#[test]
fn unresolved_parent_is_kept_verbatim() {
    let h = validate(&[record(1, "A", "", ""), record(2, "B", "Nowhere", "")]);
    assert_eq!(h.labels(), ["A", "B"]);
    assert_eq!(h.parents(), ["", "Nowhere"]);
    assert_eq!(h.unresolved_parents(), vec![1]);
}

#[test]
fn unresolved_parent_is_reported_as_v001() {
    let report = validate_with_report(&[record(1, "A", "", ""), record(2, "B", "Nowhere", "")]);
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(report.diagnostics[0].code, "V001");
    assert_eq!(report.diagnostics[0].label.as_deref(), Some("B"));
    assert_eq!(
        report.diagnostics[0].to_string(),
        "[Validate:V001] Parent 'Nowhere' is not a segment of the chart (label 'B')"
    );
}

#[test]
fn flagged_labels_do_not_depend_on_sheet_order() {
    let pairs = [
        ("A", "B"),
        ("B", "C"),
        ("C", "A"),
        ("T1", "A"),
        ("T2", "T1"),
        ("R", ""),
        ("K", "R"),
        ("G", "Ghost"),
    ];

    for shift in 0..pairs.len() {
        let mut rotated = pairs.to_vec();
        rotated.rotate_left(shift);
        let records: Vec<_> = rotated
            .iter()
            .enumerate()
            .map(|(i, (label, parent))| record(i as i64, label, parent, ""))
            .collect();

        let report = validate_with_report(&records);
        let flagged: Vec<&str> = report.problematic.iter().map(String::as_str).collect();
        assert_eq!(flagged, vec!["A", "B", "C", "T1", "T2"], "rotation {}", shift);

        let cycles = report.diagnostics.iter().filter(|d| d.code == "C001").count();
        assert_eq!(cycles, 1, "rotation {}", shift);

        let mut kept: Vec<&str> = report.hierarchy.labels().iter().map(String::as_str).collect();
        kept.sort();
        assert_eq!(kept, vec!["G", "K", "R"], "rotation {}", shift);
    }
}

#[test]
fn duplicate_label_uses_first_parent() {
    // The second "Dup" would close a loop, but only the first row's parent counts.
    let records = vec![
        record(1, "Dup", "", "first"),
        record(2, "Other", "Dup", ""),
        record(3, "Dup", "Other", "second"),
    ];
    let h = validate(&records);
    assert_eq!(h.labels(), ["Dup", "Other", "Dup"]);
    assert_eq!(h.content(), ["first", "", "second"]);
}

#[test]
fn duplicate_label_on_a_cycle_drops_every_copy() {
    let records = vec![
        record(1, "A", "A", ""),
        record(2, "A", "", "harmless copy"),
    ];
    assert!(validate(&records).is_empty());
}

#[test]
fn deep_chain_does_not_overflow() {
    let depth = 200_000;
    // Deepest node first, so the first walk covers the whole chain
    let mut records: Vec<_> = (1..depth)
        .rev()
        .map(|i| record(i, &format!("n{}", i), &format!("n{}", i - 1), ""))
        .collect();
    records.push(record(0, "n0", "", ""));
    // Close a loop at the top of a second long chain
    records.push(record(depth, "loop", "loop-tail", ""));
    records.push(record(depth + 1, "loop-tail", "loop", ""));

    let h = validate(&records);
    assert_eq!(h.len(), depth as usize);
    assert_eq!(h.labels()[0], "n0");
    assert_aligned(&h);
}

#[test]
fn fixture_output_is_aligned_and_acyclic() {
    let set = content_rows();
    let report = validate_with_report(&set.records);
    let h = &report.hierarchy;

    assert_aligned(h);
    assert_acyclic(h);
    assert_eq!(
        h.labels(),
        [
            "Stable Diffusion",
            "Prompting",
            "Negative prompts",
            "Preprocessors",
            "ControlNet",
            "Composition",
            "Regional prompter",
        ]
    );
    let flagged: Vec<&str> = report.problematic.iter().map(String::as_str).collect();
    assert_eq!(flagged, vec!["DPM++ 2M", "Samplers", "Schedulers"]);
    // Parent row has no id, so the reference dangles
    assert_eq!(h.unresolved_parents(), vec![6]);
    let codes: Vec<&str> = report.diagnostics.iter().map(|d| d.code.as_str()).collect();
    assert_eq!(codes, vec!["C001", "V001"]);
    assert_eq!(report.diagnostics[1].label.as_deref(), Some("Regional prompter"));
}
