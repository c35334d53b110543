//! HTML rendering for brewmap views
//!
//! Each view renders to a self-contained fragment: markup plus any inline
//! script it needs. Templates live in `templates/` and escape every
//! interpolated value unless marked `safe`; the only `safe` values are script
//! payloads produced by [`script_json`] and fragments already rendered here.

pub mod map;
pub mod styles;

use askama::Template;
use reqwest::Url;
use serde::Serialize;
use thiserror::Error;

pub use map::{render_map, MapOptions};
pub use styles::{render_beverage_list, render_style_browser};

/// Google Maps JavaScript API loader
pub const GOOGLE_MAPS_JS_URL: &str = "https://maps.googleapis.com/maps/api/js";

/// Errors that can occur while rendering a view
#[derive(Debug, Error)]
pub enum RenderError {
    /// Template rendering failed
    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),

    /// Script payload could not be serialized
    #[error("Failed to serialize script payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate<'a> {
    title: &'a str,
    scripts: &'a [String],
    body: &'a str,
}

/// Wrap a rendered fragment in a standalone HTML page
///
/// # Arguments
/// * `title` - Page title, escaped
/// * `scripts` - External script URLs loaded in the head, in order
/// * `body` - Fragment produced by one of the view renderers
pub fn render_page(title: &str, scripts: &[String], body: &str) -> Result<String, RenderError> {
    let page = PageTemplate {
        title,
        scripts,
        body,
    };
    Ok(page.render()?)
}

/// URL of the Google Maps loader, carrying the maps key when one is set
pub fn maps_script_url(maps_key: Option<&str>) -> String {
    match maps_key {
        Some(key) => Url::parse_with_params(GOOGLE_MAPS_JS_URL, &[("key", key)])
            .map(|url| url.to_string())
            .unwrap_or_else(|_| GOOGLE_MAPS_JS_URL.to_string()),
        None => GOOGLE_MAPS_JS_URL.to_string(),
    }
}

/// Serialize a value as JSON that is safe to embed in a `<script>` element
///
/// `<`, `>` and `&` only occur inside JSON strings, so replacing them with
/// their `\u` escapes keeps the JSON equivalent while making it impossible to
/// close the script element or open a comment from data.
pub fn script_json<T: Serialize>(value: &T) -> Result<String, RenderError> {
    let json = serde_json::to_string(value)?;
    Ok(json
        .replace('<', "\\u003c")
        .replace('>', "\\u003e")
        .replace('&', "\\u0026")
        .replace('\u{2028}', "\\u2028")
        .replace('\u{2029}', "\\u2029"))
}
