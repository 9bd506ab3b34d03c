//! Cell coercion and per-row normalization.
//!
//! Cells follow JavaScript truthiness, since that is how the workbook has
//! always been read: `0`, `false` and `""` count as empty.

use serde_json::Value;

use super::types::{CandidateRecord, RawRow, RecordId};
use crate::error::SheetError;

/// Sheet row number of the first data row (the header is row 1).
const FIRST_DATA_ROW: usize = 2;

/// Normalize one raw row. Returns `None` for rows without a label; those
/// cannot be referenced by anything and are dropped outright.
pub fn normalize_row(
    raw: &RawRow,
    index: usize,
    diagnostics: &mut Vec<SheetError>,
) -> Option<CandidateRecord> {
    let sheet_row = index + FIRST_DATA_ROW;

    let Some(label) = raw.labels.as_ref().and_then(cell_text) else {
        log::debug!("Dropping sheet row {}: no label", sheet_row);
        diagnostics.push(SheetError::load(
            "R001",
            format!("Sheet row {} has no label and was dropped", sheet_row),
            None,
        ));
        return None;
    };

    let id = match &raw.id {
        Some(cell) => parse_id(cell),
        None => RecordId::Missing,
    };
    match &id {
        RecordId::Int(_) => {}
        RecordId::Missing => {
            log::debug!("Sheet row {} ('{}') has no id", sheet_row, label);
            diagnostics.push(SheetError::load(
                "R002",
                format!(
                    "Sheet row {} has no id; it is only used to resolve parents",
                    sheet_row
                ),
                Some(label.clone()),
            ));
        }
        RecordId::Invalid(text) => {
            log::debug!("Sheet row {} ('{}') has non-integer id {:?}", sheet_row, label, text);
            diagnostics.push(SheetError::load(
                "R003",
                format!(
                    "Sheet row {} has non-integer id '{}'; it is only used to resolve parents",
                    sheet_row, text
                ),
                Some(label.clone()),
            ));
        }
    }

    Some(CandidateRecord {
        id,
        label,
        parent: raw.parents.as_ref().and_then(cell_text).unwrap_or_default(),
        content: raw.content.as_ref().and_then(cell_text).unwrap_or_default(),
    })
}

/// Text of a cell, or `None` when the cell is empty or falsy.
pub fn cell_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".into()),
        _ => None,
    }
}

/// Coerce an id cell the way base-10 `parseInt` would.
pub fn parse_id(value: &Value) -> RecordId {
    let parsed = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => Some(i),
            None => n.as_f64().and_then(truncate_float),
        },
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    };

    match parsed {
        Some(id) => RecordId::Int(id),
        None => RecordId::Invalid(match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }),
    }
}

fn truncate_float(f: f64) -> Option<i64> {
    let t = f.trunc();
    if t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64 {
        Some(t as i64)
    } else {
        None
    }
}

/// Leading whitespace, optional sign, then the longest run of ASCII digits.
/// Anything after the digits is ignored (`"12abc"` is 12).
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
