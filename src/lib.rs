//! Earthquake map: fetches the USGS GeoJSON feed and renders each event as a
//! depth-colored circle marker on a Leaflet map with a depth legend.

pub mod bootstrap;
pub mod constants;
pub mod depth;
pub mod feed;
pub mod html_template;
pub mod legend;
pub mod render;
pub mod server;
pub mod settings;
pub mod surface;
pub mod utils;

pub use bootstrap::{load_map, render_collection, RenderedMap};
pub use feed::{fetch_feed, Feature, FeatureCollection, FeedError, FeedType};
pub use settings::Settings;
pub use surface::{LeafletMap, MapSurface};
