//! BreweryDB directory API client
//!
//! This module provides the HTTP side of brewmap: building request URLs for the
//! `/locations/`, `/styles/` and `/beers/` endpoints, performing the request,
//! and unwrapping the `{ "status": ..., "data": [...] }` envelope every
//! endpoint responds with.

use reqwest::{Client, Url};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;

use super::locations::RawLocation;
use super::styles::{RawBeer, RawStyle};
use super::{Beverage, DirectoryError, Location, Style};

/// Base URL for the BreweryDB API
pub const DEFAULT_BASE_URL: &str = "https://api.brewerydb.com/v2";

/// Connection settings for the directory API
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// API root, without a trailing endpoint path
    pub base_url: String,
    /// Service credential sent as the `key` query parameter
    pub api_key: String,
}

impl DirectoryConfig {
    /// Create a config pointing at the public BreweryDB API
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the API root (used for staging servers and tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Client for the BreweryDB directory API
///
/// Stateless apart from its configuration; one instance is shared for the
/// lifetime of the process. Every fetch performs exactly one GET request and
/// never retries.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    config: DirectoryConfig,
}

impl DirectoryClient {
    /// Create a new DirectoryClient with a default HTTP client
    pub fn new(config: DirectoryConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Create a new DirectoryClient with a custom HTTP client
    pub fn with_client(client: Client, config: DirectoryConfig) -> Self {
        Self { client, config }
    }

    /// Fetch brewery locations in the given locality
    ///
    /// # Arguments
    /// * `locality` - Place name, e.g. a city. Passed through as-is.
    ///
    /// # Returns
    /// * `Ok(Vec<Location>)` - Locations in upstream order, possibly empty
    /// * `Err(DirectoryError)` - If the request, the API, or decoding fails
    pub async fn fetch_locations(&self, locality: &str) -> Result<Vec<Location>, DirectoryError> {
        let url = self.locations_url(locality)?;
        tracing::debug!(endpoint = "locations", locality, "querying directory");

        let raw: Vec<RawLocation> = self.get_data(url).await?;
        Ok(raw.into_iter().map(Location::from).collect())
    }

    /// Fetch every beer style known to the directory
    pub async fn fetch_styles(&self) -> Result<Vec<Style>, DirectoryError> {
        let url = self.styles_url()?;
        tracing::debug!(endpoint = "styles", "querying directory");

        let raw: Vec<RawStyle> = self.get_data(url).await?;
        Ok(raw.into_iter().map(Style::from).collect())
    }

    /// Fetch the beers belonging to a style
    ///
    /// # Arguments
    /// * `style_id` - Directory style id; see [`super::coerce_style_id`] for
    ///   turning request text into one
    pub async fn fetch_beverages_by_style(
        &self,
        style_id: i64,
    ) -> Result<Vec<Beverage>, DirectoryError> {
        let url = self.beers_url(style_id)?;
        tracing::debug!(endpoint = "beers", style_id, "querying directory");

        let raw: Vec<RawBeer> = self.get_data(url).await?;
        Ok(raw.into_iter().map(Beverage::from).collect())
    }

    /// URL for the locations endpoint
    pub fn locations_url(&self, locality: &str) -> Result<Url, DirectoryError> {
        self.endpoint_url(
            "locations",
            &[("key", self.config.api_key.as_str()), ("locality", locality)],
        )
    }

    /// URL for the styles endpoint
    pub fn styles_url(&self) -> Result<Url, DirectoryError> {
        self.endpoint_url("styles", &[("key", self.config.api_key.as_str())])
    }

    /// URL for the beers endpoint filtered by style
    pub fn beers_url(&self, style_id: i64) -> Result<Url, DirectoryError> {
        let style_id = style_id.to_string();
        self.endpoint_url(
            "beers",
            &[
                ("styleId", style_id.as_str()),
                ("key", self.config.api_key.as_str()),
            ],
        )
    }

    fn endpoint_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, DirectoryError> {
        let raw = format!(
            "{}/{}/",
            self.config.base_url.trim_end_matches('/'),
            endpoint
        );
        Url::parse_with_params(&raw, params)
            .map_err(|e| DirectoryError::InvalidUrl(format!("{}: {}", raw, e)))
    }

    /// Perform a GET and return the envelope's `data` array
    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, DirectoryError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = upstream_message(&text)
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_else(|| "request failed".to_string());
            return Err(DirectoryError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        parse_envelope(&text, status.as_u16())
    }
}

/// Decode a successful response body into its `data` array
fn parse_envelope<T: DeserializeOwned>(text: &str, status: u16) -> Result<Vec<T>, DirectoryError> {
    let envelope: Envelope<T> = serde_json::from_str(text)?;

    if envelope.status.as_deref() == Some("failure") {
        return Err(DirectoryError::Upstream {
            status,
            message: envelope
                .error_message
                .unwrap_or_else(|| "unspecified failure".to_string()),
        });
    }

    Ok(envelope.data)
}

/// Pull `errorMessage` out of an error body, if it is JSON at all
fn upstream_message(text: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(|body| body.error_message)
}

/// Accept a JSON number or a string holding one
///
/// The directory returns some numeric fields (notably `abv` and `ibu`) as
/// strings. Non-finite values such as `"NaN"` or `"inf"` are rejected.
pub(crate) fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    let value = match Raw::deserialize(deserializer)? {
        Raw::Number(n) => n,
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("expected a number, found {:?}", s)))?,
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(de::Error::custom(format!("expected a finite number, found {}", value)))
    }
}

/// Response envelope shared by every directory endpoint
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: Option<String>,
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
    /// Omitted by the API when nothing matched
    #[serde(default = "Vec::new")]
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "errorMessage")]
    error_message: Option<String>,
}
