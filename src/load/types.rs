//! Row and record types for the sheet loader.
//!
//! `RawRow` mirrors one object produced by SheetJS `sheet_to_json` on the
//! content workbook. Column names are fixed by the workbook header row.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SheetError;

/// Content shown in place of the chart when nothing could be loaded.
pub const LOAD_FAILURE_CONTENT: &str = "Error loading content. Please try again later.";

/// Label of the single synthetic record emitted on load failure.
pub const LOAD_FAILURE_LABEL: &str = "Error";

// =============================================================================
// RAW ROWS
// =============================================================================

/// One untyped sheet row. Cells keep whatever JSON type the sheet parser gave
/// them; coercion happens in `load::row`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parents: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Value>,
}

impl RawRow {
    /// Pick the known columns out of a row object. Unknown columns and
    /// explicit nulls are discarded.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let mut take = |key: &str| map.remove(key).filter(|v| !v.is_null());
        RawRow {
            id: take("id"),
            labels: take("labels"),
            parents: take("parents"),
            content: take("content"),
        }
    }
}

// =============================================================================
// CANDIDATE RECORDS
// =============================================================================

/// Integer id of a record after `parseInt`-style coercion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum RecordId {
    Int(i64),
    /// The row had no id cell.
    Missing,
    /// The row had an id cell that does not start with an integer.
    Invalid(String),
}

impl RecordId {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            RecordId::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// A normalized, labeled row.
///
/// Every record takes part in the parent mapping; only records with an
/// integer id can end up in the validated hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: RecordId,
    pub label: String,
    /// Empty means root.
    pub parent: String,
    pub content: String,
}

impl CandidateRecord {
    pub fn new(
        id: i64,
        label: impl Into<String>,
        parent: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        CandidateRecord {
            id: RecordId::Int(id),
            label: label.into(),
            parent: parent.into(),
            content: content.into(),
        }
    }

    /// Whether the record may appear in the validated output at all.
    pub fn is_candidate(&self) -> bool {
        self.id.as_int().is_some()
    }
}

/// Everything one load pass produced.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub records: Vec<CandidateRecord>,
    pub diagnostics: Vec<SheetError>,
}

impl RecordSet {
    /// The single-record set substituted for a failed load, so the chart
    /// always has something to explain itself with.
    pub fn load_failure(cause: SheetError) -> Self {
        RecordSet {
            records: vec![CandidateRecord::new(
                0,
                LOAD_FAILURE_LABEL,
                "",
                LOAD_FAILURE_CONTENT,
            )],
            diagnostics: vec![cause],
        }
    }

    pub fn is_load_failure(&self) -> bool {
        self.diagnostics.iter().any(|d| d.code == "L001")
    }
}
