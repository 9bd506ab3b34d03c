//! Segment selection: what the page shows when a segment is clicked.

use serde::{Deserialize, Serialize};

use crate::config::ChartConfig;
use crate::error::SheetError;
use crate::hierarchy::Hierarchy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub title: String,
    /// HTML, inserted as-is.
    pub content: String,
    pub show_flow_diagram: bool,
}

/// Resolve a clicked point number to its title and content.
pub fn select(
    hierarchy: &Hierarchy,
    config: &ChartConfig,
    point_number: usize,
) -> Result<Selection, SheetError> {
    let Some(segment) = hierarchy.segment(point_number) else {
        log::warn!(
            "Ignoring click on point {} of a {}-segment chart",
            point_number,
            hierarchy.len()
        );
        return Err(SheetError::select(
            "S001",
            format!(
                "Point {} is out of range for {} segments",
                point_number,
                hierarchy.len()
            ),
        ));
    };

    let show_flow_diagram = config.is_special_section(segment.label);
    log::debug!(
        "Selected '{}' (flow diagram: {})",
        segment.label,
        show_flow_diagram
    );

    Ok(Selection {
        title: segment.label.to_string(),
        content: segment.content.to_string(),
        show_flow_diagram,
    })
}
