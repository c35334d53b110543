//! Brewery map fragment

use askama::Template;
use serde::Deserialize;

use super::{script_json, RenderError};
use crate::data::MapView;

/// Zoom level the map opens at
const MAP_ZOOM: u8 = 11;

/// Options accepted by the map view
///
/// Missing fields fall back to a 300x500 map of Austin.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MapOptions {
    /// Canvas height in pixels
    pub height: u32,
    /// Canvas width in pixels
    pub width: u32,
    /// Locality searched for breweries
    pub location: String,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            height: 300,
            width: 500,
            location: "Austin".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "map_view.html")]
struct MapTemplate<'a> {
    height: u32,
    width: u32,
    zoom: u8,
    payload: &'a str,
}

/// Render the map canvas and the script that draws the map into it
///
/// The script waits for the page `load` event and expects the Google Maps
/// loader to be on the page already.
pub fn render_map(view: &MapView, options: &MapOptions) -> Result<String, RenderError> {
    let payload = script_json(view)?;
    let template = MapTemplate {
        height: options.height,
        width: options.width,
        zoom: MAP_ZOOM,
        payload: &payload,
    };
    Ok(template.render()?)
}
