use anyhow::{Context, Result};
use rust_embed::RustEmbed;

use crate::surface::LeafletMap;

#[derive(RustEmbed)]
#[folder = "frontend/"]
pub struct Asset;

/// Embedded frontend file as UTF-8 text
pub fn asset_text(name: &str) -> Result<String> {
    let file = Asset::get(name).with_context(|| format!("Missing embedded asset '{}'", name))?;
    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("Embedded asset '{}' is not UTF-8", name))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Standalone page: styles, script and map data are all inlined, so the file
/// works when opened straight from disk.
pub fn render_page(map: &LeafletMap) -> Result<String> {
    let template = asset_text("index.html")?;
    let style = asset_text("style.css")?;
    let script = asset_text("quakemap.js")?;

    // No raw '<' inside the inline script: "</script" and "<!--" both change how it parses
    let map_json = map
        .to_json()
        .context("Failed to serialize map")?
        .replace('<', "\\u003c");

    let html = template
        .replace("<!-- TITLE -->", &escape_html(&map.title))
        .replace("/* STYLE */", &style)
        .replace("/* MAP_DATA */", &map_json)
        .replace("/* SCRIPT */", &script);
    Ok(html)
}
