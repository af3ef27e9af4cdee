use serde::Serialize;

use crate::constants::{TILE_ATTRIBUTION, TILE_URL};
use crate::legend::LegendControl;
use crate::settings::Settings;

/// Render target for markers and controls. Renderers receive it explicitly
/// instead of reaching for a shared map instance.
pub trait MapSurface {
    fn add_circle_marker(&mut self, marker: CircleMarker);
    fn add_control(&mut self, control: LegendControl);
}

/// Leaflet `circleMarker` options, serialized with Leaflet's field names
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleMarkerOptions {
    pub radius: f64,
    /// Border color
    pub color: String,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// Border thickness
    pub weight: u32,
    /// `None` draws a solid outline
    pub dash_array: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CircleMarker {
    /// `[latitude, longitude]`, Leaflet's order
    pub lat_lng: [f64; 2],
    pub options: CircleMarkerOptions,
    pub popup: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    pub url: String,
    pub attribution: String,
}

impl Default for TileLayer {
    fn default() -> Self {
        Self {
            url: TILE_URL.to_string(),
            attribution: TILE_ATTRIBUTION.to_string(),
        }
    }
}

/// Owned map document: one base layer, markers in insertion order, controls.
#[derive(Debug, Clone, Serialize)]
pub struct LeafletMap {
    pub title: String,
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_layer: TileLayer,
    pub markers: Vec<CircleMarker>,
    pub controls: Vec<LegendControl>,
}

impl LeafletMap {
    pub fn new(center: [f64; 2], zoom: u8) -> Self {
        Self {
            title: "Earthquakes".to_string(),
            center,
            zoom,
            tile_layer: TileLayer::default(),
            markers: Vec::new(),
            controls: Vec::new(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new([settings.center_lat, settings.center_lon], settings.zoom)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn legend(&self) -> Option<&LegendControl> {
        self.controls.first()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl MapSurface for LeafletMap {
    fn add_circle_marker(&mut self, marker: CircleMarker) {
        self.markers.push(marker);
    }

    fn add_control(&mut self, control: LegendControl) {
        self.controls.push(control);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_options_use_leaflet_names() {
        let marker = CircleMarker {
            lat_lng: [40.0, -100.0],
            options: CircleMarkerOptions {
                radius: 28.0,
                color: "black".to_string(),
                fill_color: "#B2FF66".to_string(),
                fill_opacity: 0.8,
                weight: 1,
                dash_array: None,
            },
            popup: "p".to_string(),
        };

        let value = serde_json::to_value(&marker).unwrap();
        assert_eq!(value["lat_lng"], serde_json::json!([40.0, -100.0]));
        assert_eq!(value["options"]["fillColor"], "#B2FF66");
        assert_eq!(value["options"]["fillOpacity"], 0.8);
        assert!(value["options"]["dashArray"].is_null());
    }

    #[test]
    fn test_new_map_is_empty() {
        let map = LeafletMap::new([42.52, -102.67], 5);
        assert!(map.markers.is_empty());
        assert!(map.legend().is_none());
        assert!(map.tile_layer.url.contains("openstreetmap"));
    }
}
