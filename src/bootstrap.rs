use serde::Serialize;

use crate::feed::{fetch_feed, FeatureCollection, FeedError};
use crate::render::{plot_earthquake_markers, PlotSummary};
use crate::settings::Settings;
use crate::surface::LeafletMap;

#[derive(Debug, Clone, Serialize)]
pub struct RenderedMap {
    pub map: LeafletMap,
    pub summary: PlotSummary,
}

/// Renders an already fetched collection onto a fresh map surface.
pub fn render_collection(collection: &FeatureCollection, settings: &Settings) -> RenderedMap {
    let mut map = LeafletMap::from_settings(settings);
    if let Some(title) = collection.metadata.as_ref().and_then(|m| m.title.clone()) {
        map = map.with_title(title);
    }

    if collection.features.is_empty() {
        tracing::warn!("Feed contains no earthquakes, rendering an empty map");
    }

    let summary = plot_earthquake_markers(&mut map, &collection.features);
    tracing::info!(
        "Rendered {} markers ({} features without location skipped)",
        summary.markers_added,
        summary.skipped
    );

    RenderedMap { map, summary }
}

/// Fetches the configured feed once and renders it.
pub async fn load_map(
    client: &reqwest::Client,
    settings: &Settings,
) -> Result<RenderedMap, FeedError> {
    tracing::debug!("Map load: fetching {}", settings.feed_url);
    let collection = fetch_feed(client, &settings.feed_url).await?;

    let rendered = render_collection(&collection, settings);
    tracing::debug!("Map load: rendered");

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Feature, FeedMetadata};

    #[test]
    fn test_render_collection_uses_settings_and_title() {
        let collection = FeatureCollection {
            metadata: Some(FeedMetadata {
                title: Some("USGS All Earthquakes, Past Week".to_string()),
                ..Default::default()
            }),
            features: vec![
                Feature::point(-100.0, 40.0, 5.0, Some(4.0)),
                Feature::default(),
            ],
        };
        let settings = Settings {
            zoom: 3,
            ..Settings::default()
        };

        let rendered = render_collection(&collection, &settings);
        assert_eq!(rendered.map.title, "USGS All Earthquakes, Past Week");
        assert_eq!(rendered.map.zoom, 3);
        assert_eq!(rendered.map.center, [42.52, -102.67]);
        assert_eq!(rendered.map.markers.len(), 1);
        assert_eq!(rendered.summary.skipped, 1);
        assert_eq!(rendered.map.controls.len(), 1);
    }

    #[test]
    fn test_render_empty_collection() {
        let collection = FeatureCollection {
            metadata: None,
            features: Vec::new(),
        };
        let rendered = render_collection(&collection, &Settings::default());
        assert!(rendered.map.markers.is_empty());
        assert_eq!(rendered.map.legend().unwrap().entries.len(), 6);
        assert_eq!(rendered.map.title, "Earthquakes");
    }
}
