//! USGS earthquake feed client.
//!
//! Feed documentation: https://earthquake.usgs.gov/earthquakes/feed/v1.0/geojson.php

use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

use crate::constants::USGS_FEED_BASE;

// ============================================================================
// Errors
// ============================================================================

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("feed {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("feed {url} is not a GeoJSON feature collection: {source}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// Feed selection
// ============================================================================

/// Summary feeds published by USGS, refreshed every minute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeedType {
    AllHour,
    AllDay,
    #[default]
    AllWeek,
    AllMonth,
    SignificantWeek,
    SignificantMonth,
    M45Day,
    M45Week,
    M25Day,
    M25Week,
}

impl FeedType {
    pub const ALL: [FeedType; 10] = [
        FeedType::AllHour,
        FeedType::AllDay,
        FeedType::AllWeek,
        FeedType::AllMonth,
        FeedType::SignificantWeek,
        FeedType::SignificantMonth,
        FeedType::M45Day,
        FeedType::M45Week,
        FeedType::M25Day,
        FeedType::M25Week,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            FeedType::AllHour => "all_hour",
            FeedType::AllDay => "all_day",
            FeedType::AllWeek => "all_week",
            FeedType::AllMonth => "all_month",
            FeedType::SignificantWeek => "significant_week",
            FeedType::SignificantMonth => "significant_month",
            FeedType::M45Day => "4.5_day",
            FeedType::M45Week => "4.5_week",
            FeedType::M25Day => "2.5_day",
            FeedType::M25Week => "2.5_week",
        }
    }

    pub fn url(&self) -> String {
        format!("{}/{}.geojson", USGS_FEED_BASE, self.slug())
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for FeedType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().trim_end_matches(".geojson");
        FeedType::ALL
            .iter()
            .copied()
            .find(|feed| feed.slug() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = FeedType::ALL.iter().map(|f| f.slug()).collect();
                format!("unknown feed '{}', expected one of: {}", s, known.join(", "))
            })
    }
}

// ============================================================================
// GeoJSON structures
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedMetadata {
    pub title: Option<String>,
    /// Generation time, epoch milliseconds
    pub generated: Option<i64>,
    pub count: Option<usize>,
}

impl FeedMetadata {
    pub fn generated_at(&self) -> Option<DateTime<Utc>> {
        self.generated.and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: Properties,
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Properties {
    pub mag: Option<f64>,
    pub place: Option<String>,
    /// Origin time, epoch milliseconds
    pub time: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Geometry {
    /// `[longitude, latitude, depth]`; individual entries may be null in the feed
    #[serde(default)]
    pub coordinates: Option<Vec<Option<f64>>>,
}

/// Epicentre of one event, depth in km (positive downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub longitude: f64,
    pub latitude: f64,
    pub depth: Option<f64>,
}

impl Feature {
    /// Builds a point feature the way the feed encodes it
    #[cfg(test)]
    pub(crate) fn point(longitude: f64, latitude: f64, depth: f64, mag: Option<f64>) -> Self {
        Feature {
            id: String::new(),
            properties: Properties { mag, ..Default::default() },
            geometry: Some(Geometry {
                coordinates: Some(vec![Some(longitude), Some(latitude), Some(depth)]),
            }),
        }
    }

    /// `None` when the geometry or its longitude/latitude pair is missing or null
    pub fn location(&self) -> Option<Location> {
        let coords = self.geometry.as_ref()?.coordinates.as_ref()?;
        match coords.as_slice() {
            [Some(longitude), Some(latitude), rest @ ..] => Some(Location {
                longitude: *longitude,
                latitude: *latitude,
                depth: rest.first().copied().flatten(),
            }),
            _ => None,
        }
    }

    pub fn magnitude(&self) -> Option<f64> {
        self.properties.mag
    }

    pub fn time(&self) -> Option<DateTime<Utc>> {
        self.properties
            .time
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

// ============================================================================
// Client
// ============================================================================

pub fn build_client(timeout: Duration) -> Result<reqwest::Client, FeedError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("quakemap/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Decodes a feed body already in memory
pub fn parse_feed(body: &[u8], url: &str) -> Result<FeatureCollection, FeedError> {
    serde_json::from_slice(body).map_err(|source| FeedError::Parse {
        url: url.to_string(),
        source,
    })
}

/// Issues one GET for the feed and decodes the feature collection.
pub async fn fetch_feed(
    client: &reqwest::Client,
    url: &str,
) -> Result<FeatureCollection, FeedError> {
    tracing::info!("Fetching earthquake feed from {}", url);

    let response = client
        .get(url)
        .header(ACCEPT, "application/geo+json, application/json")
        .send()
        .await
        .map_err(|source| FeedError::Network {
            url: url.to_string(),
            source,
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|source| FeedError::Network {
        url: url.to_string(),
        source,
    })?;

    let collection = parse_feed(&body, url)?;

    if let Some(meta) = &collection.metadata {
        tracing::info!(
            title = meta.title.as_deref().unwrap_or("untitled"),
            generated = ?meta.generated_at(),
            "Fetched {} earthquake features",
            collection.features.len()
        );
    } else {
        tracing::info!("Fetched {} earthquake features", collection.features.len());
    }
    tracing::debug!("Fetched earthquake data: {:?}", collection);

    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "metadata": {"generated": 1701302400000, "title": "USGS All Earthquakes, Past Week",
                     "count": 3, "status": 200},
        "features": [
            {"type": "Feature", "id": "us7000a",
             "properties": {"mag": 4.2, "place": "10 km N of Somewhere", "time": 1701300000000},
             "geometry": {"type": "Point", "coordinates": [-100.0, 40.0, 5.0]}},
            {"type": "Feature", "id": "ak0231",
             "properties": {"mag": null, "place": null, "time": null},
             "geometry": null},
            {"type": "Feature", "id": "nc7331",
             "properties": {"mag": 1.1},
             "geometry": {"type": "Point", "coordinates": [-122.8, 38.8]}}
        ],
        "bbox": [-180, -90, -5, 180, 90, 700]
    }"#;

    #[test]
    fn test_parse_sample_feed() {
        let feed = parse_feed(SAMPLE.as_bytes(), "test").unwrap();
        assert_eq!(feed.features.len(), 3);

        let first = &feed.features[0];
        assert_eq!(first.id, "us7000a");
        assert_eq!(first.magnitude(), Some(4.2));
        assert_eq!(
            first.location(),
            Some(Location { longitude: -100.0, latitude: 40.0, depth: Some(5.0) })
        );
        assert!(first.time().is_some());

        assert!(feed.features[1].location().is_none());
        assert!(feed.features[1].magnitude().is_none());

        let shallow = feed.features[2].location().unwrap();
        assert_eq!(shallow.depth, None);

        let meta = feed.metadata.unwrap();
        assert_eq!(meta.count, Some(3));
        assert_eq!(meta.generated_at().unwrap().timestamp(), 1_701_302_400);
    }

    #[test]
    fn test_parse_rejects_payload_without_features() {
        let err = parse_feed(br#"{"type": "FeatureCollection"}"#, "x").unwrap_err();
        assert!(matches!(err, FeedError::Parse { .. }));

        let err = parse_feed(b"<html>502 Bad Gateway</html>", "x").unwrap_err();
        assert!(err.to_string().contains("not a GeoJSON feature collection"));
    }

    #[test]
    fn test_short_coordinates_have_no_location() {
        let mut feature = Feature::point(1.0, 2.0, 3.0, Some(1.0));
        feature.geometry = Some(Geometry { coordinates: Some(vec![Some(1.0)]) });
        assert!(feature.location().is_none());

        feature.geometry = Some(Geometry { coordinates: Some(vec![None, Some(2.0), Some(3.0)]) });
        assert!(feature.location().is_none());

        feature.geometry = Some(Geometry { coordinates: None });
        assert!(feature.location().is_none());
    }

    #[test]
    fn test_null_coordinate_entries_do_not_fail_the_feed() {
        let body = br#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "id": "good", "properties": {"mag": 2.0},
             "geometry": {"type": "Point", "coordinates": [-118.5, 34.1, 12.0]}},
            {"type": "Feature", "id": "null-depth", "properties": {"mag": 1.0},
             "geometry": {"type": "Point", "coordinates": [-120.0, 35.0, null]}},
            {"type": "Feature", "id": "null-lat", "properties": {"mag": 1.0},
             "geometry": {"type": "Point", "coordinates": [-121.0, null, 4.0]}}
        ]}"#;

        let feed = parse_feed(body, "test").unwrap();
        assert_eq!(feed.features.len(), 3);
        assert_eq!(feed.features[0].location().unwrap().depth, Some(12.0));
        assert_eq!(
            feed.features[1].location(),
            Some(Location { longitude: -120.0, latitude: 35.0, depth: None })
        );
        assert!(feed.features[2].location().is_none());

        let mut map = crate::surface::LeafletMap::new([0.0, 0.0], 2);
        let summary = crate::render::plot_earthquake_markers(&mut map, &feed.features);
        assert_eq!(summary.markers_added, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(map.markers[1].lat_lng, [35.0, -120.0]);
        assert!(map.markers[1].popup.contains("Depth: unknown km"));
    }

    #[test]
    fn test_feed_type_urls() {
        assert_eq!(
            FeedType::default().url(),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson"
        );
        assert_eq!("4.5_day".parse::<FeedType>().unwrap(), FeedType::M45Day);
        assert_eq!("all_hour.geojson".parse::<FeedType>().unwrap(), FeedType::AllHour);
        assert!("weekly".parse::<FeedType>().is_err());
        for feed in FeedType::ALL {
            assert_eq!(feed.to_string().parse::<FeedType>().unwrap(), feed);
        }
    }
}
