//! Load phase: sheet rows (JSON) → candidate records.

pub mod row;
pub mod types;

pub use types::*;

use serde_json::Value;

use crate::error::{LoadError, SheetError};

/// Deserialize the rows handed over by the sheet parser.
///
/// The top level must be an array. Elements that are not objects are kept as
/// empty rows so they surface as unlabeled-row diagnostics.
pub fn parse_rows(json: &str) -> Result<Vec<RawRow>, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(items) = value else {
        return Err(LoadError::NotAnArray(json_kind(&value)));
    };

    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => RawRow::from_map(map),
            _ => RawRow::default(),
        })
        .collect())
}

/// Normalize raw rows into labeled records. Never fails; malformed rows are
/// reported in `RecordSet::diagnostics`.
pub fn load(rows: &[RawRow]) -> RecordSet {
    let mut diagnostics = Vec::new();
    let records: Vec<CandidateRecord> = rows
        .iter()
        .enumerate()
        .filter_map(|(index, raw)| row::normalize_row(raw, index, &mut diagnostics))
        .collect();

    log::info!(
        "Read {} labeled records from {} sheet rows",
        records.len(),
        rows.len()
    );

    RecordSet {
        records,
        diagnostics,
    }
}

/// Parse and normalize in one step.
pub fn load_json(json: &str) -> Result<RecordSet, LoadError> {
    let rows = parse_rows(json)?;
    Ok(load(&rows))
}

/// Like `load_json`, but a failed load is replaced by the synthetic
/// single-record error set.
pub fn load_or_fallback(json: &str) -> RecordSet {
    load_json(json).unwrap_or_else(fallback)
}

/// The synthetic record set for a load that failed with `error`.
pub fn fallback(error: LoadError) -> RecordSet {
    log::error!("Error loading content: {}", error);
    RecordSet::load_failure(SheetError::from(error))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
