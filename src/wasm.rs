//! WASM entry points for browser use.
//!
//! The page fetches the workbook, runs SheetJS `sheet_to_json` on the first
//! sheet and passes the resulting rows here as a JSON string.

use wasm_bindgen::prelude::*;

use crate::config::ChartConfig;
use crate::error::{LoadError, SheetError};
use crate::hierarchy::Hierarchy;
use crate::load;
use crate::select;
use crate::validate;

/// Route `log` output to the browser console and panics to `console.error`.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    // A second call finds the logger already set; nothing to do then.
    let _ = console_log::init_with_level(log::Level::Debug);
}

/// Load + validate sheet rows.
/// Returns `{ labels, parents, content, diagnostics }`. Never fails: a load
/// failure yields the single "Error" segment.
#[wasm_bindgen]
pub fn build_hierarchy(rows_json: &str) -> JsValue {
    let result = build_hierarchy_inner(rows_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn build_hierarchy_inner(rows_json: &str) -> HierarchyDto {
    let records = load::load_or_fallback(rows_json);
    hierarchy_dto(records)
}

/// The "Error" hierarchy, for failures before any rows exist (fetch or
/// workbook parse on the JS side).
#[wasm_bindgen]
pub fn fallback_hierarchy(message: &str) -> JsValue {
    let result = fallback_hierarchy_inner(message);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn fallback_hierarchy_inner(message: &str) -> HierarchyDto {
    hierarchy_dto(load::fallback(LoadError::Source(message.to_string())))
}

/// Resolve a clicked point against a hierarchy previously returned by
/// `build_hierarchy`.
/// Returns `{ status: "selected", ... }` or `{ status: "errors", errors }`.
#[wasm_bindgen]
pub fn select_segment(hierarchy: JsValue, point_number: u32, config_json: &str) -> JsValue {
    let hierarchy = serde_wasm_bindgen::from_value::<Hierarchy>(hierarchy);
    let result = select_segment_inner(hierarchy, point_number as usize, config_json);
    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

fn select_segment_inner<E: std::fmt::Display>(
    hierarchy: Result<Hierarchy, E>,
    point_number: usize,
    config_json: &str,
) -> SelectResult {
    let hierarchy = match hierarchy {
        Ok(h) => h,
        Err(e) => {
            let error = SheetError::select("S002", format!("Failed to read hierarchy: {}", e));
            return SelectResult::Errors(vec![ErrorDto::from(error)]);
        }
    };

    let config = match ChartConfig::from_json(config_json) {
        Ok(c) => c,
        Err(e) => return SelectResult::Errors(vec![ErrorDto::from(e)]),
    };

    match select::select(&hierarchy, &config, point_number) {
        Ok(selection) => SelectResult::Selected {
            title: selection.title,
            content: selection.content,
            show_flow_diagram: selection.show_flow_diagram,
        },
        Err(e) => SelectResult::Errors(vec![ErrorDto::from(e)]),
    }
}

fn hierarchy_dto(records: load::RecordSet) -> HierarchyDto {
    let validation = validate::validate_with_report(&records.records);
    let parts = crate::hierarchy::HierarchyParts::from(validation.hierarchy);

    HierarchyDto {
        labels: parts.labels,
        parents: parts.parents,
        content: parts.content,
        diagnostics: records
            .diagnostics
            .into_iter()
            .chain(validation.diagnostics)
            .map(ErrorDto::from)
            .collect(),
    }
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    phase: String,
    message: String,
    label: Option<String>,
}

impl From<SheetError> for ErrorDto {
    fn from(e: SheetError) -> Self {
        ErrorDto {
            code: e.code,
            phase: e.phase.to_string(),
            message: e.message,
            label: e.label,
        }
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
struct HierarchyDto {
    labels: Vec<String>,
    parents: Vec<String>,
    content: Vec<String>,
    diagnostics: Vec<ErrorDto>,
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum SelectResult {
    #[serde(rename = "selected")]
    Selected {
        title: String,
        content: String,
        #[serde(rename = "showFlowDiagram")]
        show_flow_diagram: bool,
    },
    #[serde(rename = "errors")]
    Errors(Vec<ErrorDto>),
}
