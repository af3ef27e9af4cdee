use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CENTER, DEFAULT_FEED_URL, DEFAULT_OUTPUT_FILE, DEFAULT_PORT,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_ZOOM,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub feed_url: String,
    pub port: u16,
    pub output_path: String,
    pub center_lat: f64,
    pub center_lon: f64,
    pub zoom: u8,
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub auto_open_browser: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_string(),
            port: DEFAULT_PORT,
            output_path: DEFAULT_OUTPUT_FILE.to_string(),
            center_lat: DEFAULT_CENTER.0,
            center_lon: DEFAULT_CENTER.1,
            zoom: DEFAULT_ZOOM,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            auto_open_browser: false,
        }
    }
}

fn parse_into<T: std::str::FromStr>(map: &HashMap<String, String>, key: &str, slot: &mut T) {
    if let Some(raw) = map.get(key) {
        match raw.parse::<T>() {
            Ok(value) => *slot = value,
            Err(_) => tracing::warn!("Ignoring invalid value for '{}': {}", key, raw),
        }
    }
}

impl Settings {
    /// Loads `quakemap.ini` next to the executable, creating it with defaults on first run
    pub fn load() -> Result<Self> {
        Self::load_or_init(&Self::config_path())
    }

    /// Like `load_from`, but writes a default config file when none exists yet
    pub fn load_or_init(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            return Self::load_from(config_path);
        }

        let settings = Settings::default();
        match settings.save_to(config_path) {
            Ok(()) => tracing::info!("Created default config at {}", config_path.display()),
            Err(e) => tracing::warn!("Could not write default config: {:#}", e),
        }
        Ok(settings)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!("No config file at {}, using defaults", config_path.display());
            return Ok(Settings::default());
        }

        let file = File::open(config_path).context("Failed to open config file")?;
        let mut content = String::new();
        for line in BufReader::new(file).lines() {
            let line = line.context("Failed to read line from config")?;
            content.push_str(&line);
            content.push('\n');
        }

        let settings = Self::parse(&content);
        tracing::info!("Loaded settings from {}", config_path.display());
        Ok(settings)
    }

    /// Parses `key = value` lines; unknown keys and bad values are ignored
    pub fn parse(content: &str) -> Self {
        let mut settings = Settings::default();
        let mut config_map = HashMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.starts_with('#') || line.is_empty() {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                config_map.insert(
                    key.trim().to_string(),
                    value.trim().trim_matches('"').to_string(),
                );
            }
        }

        if let Some(url) = config_map.get("feed_url") {
            settings.feed_url = url.clone();
        }
        if let Some(path) = config_map.get("output_path") {
            settings.output_path = path.clone();
        }
        parse_into(&config_map, "port", &mut settings.port);
        parse_into(&config_map, "center_lat", &mut settings.center_lat);
        parse_into(&config_map, "center_lon", &mut settings.center_lon);
        parse_into(&config_map, "zoom", &mut settings.zoom);
        parse_into(&config_map, "request_timeout_secs", &mut settings.request_timeout_secs);
        parse_into(&config_map, "auto_open_browser", &mut settings.auto_open_browser);

        settings
    }

    pub fn to_ini(&self) -> String {
        let mut content = String::new();
        content.push_str("# QuakeMap Configuration File\n");
        content.push_str(&format!("feed_url = \"{}\"\n", self.feed_url));
        content.push_str(&format!("port = {}\n", self.port));
        content.push_str(&format!("output_path = \"{}\"\n", self.output_path));
        content.push_str(&format!("center_lat = {}\n", self.center_lat));
        content.push_str(&format!("center_lon = {}\n", self.center_lon));
        content.push_str(&format!("zoom = {}\n", self.zoom));
        content.push_str(&format!("request_timeout_secs = {}\n", self.request_timeout_secs));
        content.push_str(&format!("auto_open_browser = {}\n", self.auto_open_browser));
        content
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Creating config directory")?;
        }
        std::fs::write(config_path, self.to_ini()).context("Failed to write to config file")?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        let mut path = std::env::current_exe()
            .unwrap_or_default()
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        if path.ends_with("target/debug") || path.ends_with("target/release") {
            path.pop();
            path.pop();
        }
        path.push("quakemap.ini");
        path
    }
}
