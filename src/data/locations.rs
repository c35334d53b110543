//! Brewery location aggregation
//!
//! Turns the locations returned for a locality into a [`MapView`]: the first
//! [`MAX_MARKERS`] locations become markers and the map is centered on their
//! centroid.

use serde::Deserialize;

use super::directory::number_or_numeric_string;
use super::{Center, DirectoryError, Location, MapView};

/// Maximum number of markers placed on one map
pub const MAX_MARKERS: usize = 25;

/// Build the map view for a set of locations
///
/// Only the first [`MAX_MARKERS`] locations, in the order given, are kept.
/// Anything past that is dropped and does not influence the center.
///
/// # Returns
/// * `Ok(MapView)` - Truncated markers and their centroid
/// * `Err(DirectoryError::EmptyResult)` - If there are no locations
pub fn build_map_view(locations: Vec<Location>) -> Result<MapView, DirectoryError> {
    let mut markers = locations;
    markers.truncate(MAX_MARKERS);

    if markers.is_empty() {
        return Err(DirectoryError::EmptyResult);
    }

    let count = markers.len() as f64;
    let (lat_sum, lon_sum) = markers
        .iter()
        .fold((0.0, 0.0), |(lat, lon), m| (lat + m.latitude, lon + m.longitude));

    Ok(MapView {
        center: Center {
            lat: lat_sum / count,
            lon: lon_sum / count,
        },
        markers,
    })
}

/// A single element of the `/locations/` response
#[derive(Debug, Deserialize)]
pub(crate) struct RawLocation {
    #[serde(deserialize_with = "number_or_numeric_string")]
    latitude: f64,
    #[serde(deserialize_with = "number_or_numeric_string")]
    longitude: f64,
    brewery: RawBrewery,
}

#[derive(Debug, Deserialize)]
struct RawBrewery {
    name: String,
}

impl From<RawLocation> for Location {
    fn from(raw: RawLocation) -> Self {
        Location {
            latitude: raw.latitude,
            longitude: raw.longitude,
            brewery_name: raw.brewery.name,
        }
    }
}
