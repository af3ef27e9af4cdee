use serde::Serialize;

use crate::depth::{depth_color, LEGEND_LIMITS};
use crate::render::DepthExtent;
use crate::surface::MapSurface;

/// Corner a Leaflet control is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendControl {
    pub position: ControlPosition,
    pub entries: Vec<LegendEntry>,
    /// Pre-rendered list items, inserted as-is by the page script
    pub html: String,
}

impl LegendControl {
    pub fn new(position: ControlPosition, entries: Vec<LegendEntry>) -> Self {
        let html = entries_html(&entries);
        Self { position, entries, html }
    }
}

fn entries_html(entries: &[LegendEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<li style="background-color: {}">{}</li>"#,
                entry.color, entry.label
            )
        })
        .collect()
}

/// One entry per depth bucket: "lower–upper" for closed ranges, "lower+" for the last.
pub fn legend_entries() -> Vec<LegendEntry> {
    LEGEND_LIMITS
        .iter()
        .enumerate()
        .map(|(i, limit)| {
            let label = match LEGEND_LIMITS.get(i + 1) {
                Some(next) => format!("{}\u{2013}{}", limit, next),
                None => format!("{}+", limit),
            };
            LegendEntry {
                label,
                color: depth_color(*limit),
            }
        })
        .collect()
}

/// Attaches the static depth legend to the bottom-right corner.
///
/// The observed extent is only reported; bucket boundaries never follow the data.
pub fn add_depth_legend(surface: &mut impl MapSurface, extent: Option<DepthExtent>) {
    match extent {
        Some(DepthExtent { min, max }) => {
            tracing::info!("Depth extent: [{}, {}] km", min, max)
        }
        None => tracing::info!("Depth extent: undefined (no located features)"),
    }

    surface.add_control(LegendControl::new(ControlPosition::BottomRight, legend_entries()));
}
