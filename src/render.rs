use serde::Serialize;

use crate::constants::{
    MARKER_BORDER_COLOR, MARKER_BORDER_WEIGHT, MARKER_FILL_OPACITY, MARKER_RADIUS_SCALE,
    MIN_MARKER_RADIUS,
};
use crate::depth::depth_color;
use crate::feed::{Feature, Location};
use crate::legend::add_depth_legend;
use crate::surface::{CircleMarker, CircleMarkerOptions, MapSurface};

/// Shallowest and deepest finite depth seen in a feature list
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DepthExtent {
    pub min: f64,
    pub max: f64,
}

impl DepthExtent {
    fn include(extent: Option<Self>, depth: f64) -> Option<Self> {
        if !depth.is_finite() {
            return extent;
        }
        Some(match extent {
            Some(e) => DepthExtent {
                min: e.min.min(depth),
                max: e.max.max(depth),
            },
            None => DepthExtent { min: depth, max: depth },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PlotSummary {
    pub markers_added: usize,
    pub skipped: usize,
    pub depth_extent: Option<DepthExtent>,
}

/// Marker radius in pixels; never below the minimum, even for zero or negative magnitudes
pub fn marker_radius(magnitude: f64) -> f64 {
    (magnitude * MARKER_RADIUS_SCALE).max(MIN_MARKER_RADIUS)
}

fn format_value(value: Option<f64>) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| v.to_string())
}

pub fn popup_text(location: &Location, magnitude: Option<f64>) -> String {
    format!(
        "Location: [{}, {}]<br />Magnitude: {} <br /> Depth: {} km",
        location.longitude,
        location.latitude,
        format_value(magnitude),
        format_value(location.depth)
    )
}

/// Styled circle marker for one feature, `None` if it has no location
pub fn build_marker(feature: &Feature) -> Option<CircleMarker> {
    let location = feature.location()?;
    let magnitude = feature.magnitude();
    // Missing depth classifies like NaN: the open-ended last bucket
    let depth = location.depth.unwrap_or(f64::NAN);

    Some(CircleMarker {
        lat_lng: [location.latitude, location.longitude],
        options: CircleMarkerOptions {
            radius: marker_radius(magnitude.unwrap_or(0.0)),
            color: MARKER_BORDER_COLOR.to_string(),
            fill_color: depth_color(depth).to_string(),
            fill_opacity: MARKER_FILL_OPACITY,
            weight: MARKER_BORDER_WEIGHT,
            dash_array: None,
        },
        popup: popup_text(&location, magnitude),
    })
}

/// Adds one marker per located feature, in input order, then the depth legend.
pub fn plot_earthquake_markers(
    surface: &mut impl MapSurface,
    features: &[Feature],
) -> PlotSummary {
    let mut summary = PlotSummary::default();

    for feature in features {
        let location = feature.location();
        tracing::debug!(
            id = %feature.id,
            place = feature.properties.place.as_deref().unwrap_or(""),
            time = ?feature.time(),
            "Earthquake - Location: {:?}, Magnitude: {}, Depth: {}",
            location.map(|l| [l.longitude, l.latitude]),
            format_value(feature.magnitude()),
            format_value(location.and_then(|l| l.depth))
        );

        match build_marker(feature) {
            Some(marker) => {
                if let Some(depth) = location.and_then(|l| l.depth) {
                    summary.depth_extent = DepthExtent::include(summary.depth_extent, depth);
                }
                surface.add_circle_marker(marker);
                summary.markers_added += 1;
            }
            None => summary.skipped += 1,
        }
    }

    if summary.skipped > 0 {
        tracing::debug!("Skipped {} features without a location", summary.skipped);
    }

    add_depth_legend(surface, summary.depth_extent);
    summary
}
