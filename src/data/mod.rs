//! Core data models for brewmap
//!
//! This module contains the types decoded from the BreweryDB directory API and
//! the derived map view, along with the error type shared by all directory
//! operations.

pub mod directory;
pub mod locations;
pub mod styles;

pub use directory::{DirectoryClient, DirectoryConfig, DEFAULT_BASE_URL};
pub use locations::{build_map_view, MAX_MARKERS};
pub use styles::coerce_style_id;

use serde::Serialize;
use thiserror::Error;

/// A brewery location returned by the directory API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    /// Latitude coordinate
    pub latitude: f64,
    /// Longitude coordinate
    pub longitude: f64,
    /// Name of the brewery operating this location
    pub brewery_name: String,
}

/// Map center point
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// Everything needed to draw the brewery map: where to center it and which
/// markers to place.
///
/// Built by [`build_map_view`], which guarantees at most [`MAX_MARKERS`]
/// markers and a center computed from exactly those markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Center,
    pub markers: Vec<Location>,
}

/// A beer style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Style {
    pub id: i64,
    pub name: String,
    pub description: String,
}

/// A beer belonging to a style
#[derive(Debug, Clone, PartialEq)]
pub struct Beverage {
    pub name: String,
    pub description: String,
    /// Alcohol by volume, in percent
    pub abv: f64,
    /// International bitterness units
    pub ibu: f64,
    pub is_organic: bool,
    /// Availability text, e.g. "Available year round"
    pub availability_description: String,
    /// Medium-sized label image, if the beer has one
    pub image_url: Option<String>,
}

/// Errors that can occur when querying the directory API
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body was not valid JSON or did not have the expected shape
    #[error("Failed to decode directory response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The directory API answered but reported a failure
    #[error("Directory API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    /// Configured base URL cannot form a request URL
    #[error("Invalid directory URL: {0}")]
    InvalidUrl(String),

    /// No locations to aggregate into a map
    #[error("No locations found")]
    EmptyResult,
}
