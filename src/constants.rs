// Port configuration
pub const DEFAULT_PORT: u16 = 3001;

// USGS summary feeds
pub const USGS_FEED_BASE: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";
pub const DEFAULT_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// Base map
pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";
pub const DEFAULT_CENTER: (f64, f64) = (42.52, -102.67);
pub const DEFAULT_ZOOM: u8 = 5;

// Circle markers: radius = max(magnitude * MARKER_RADIUS_SCALE, MIN_MARKER_RADIUS)
pub const MARKER_RADIUS_SCALE: f64 = 7.0;
pub const MIN_MARKER_RADIUS: f64 = 5.0;
pub const MARKER_BORDER_COLOR: &str = "black";
pub const MARKER_BORDER_WEIGHT: u32 = 1;
pub const MARKER_FILL_OPACITY: f64 = 0.8;

pub const DEFAULT_OUTPUT_FILE: &str = "quakemap.html";
