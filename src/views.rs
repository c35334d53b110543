//! The three invocations a host exposes: the brewery map, the style browser
//! and the style drilldown.
//!
//! Each call performs exactly one directory request. On any failure the caller
//! gets an error and no markup, never a partial fragment.

use thiserror::Error;

use crate::data::{build_map_view, coerce_style_id, DirectoryClient, DirectoryError};
use crate::render::{self, MapOptions, RenderError};
use crate::token::{TokenError, TokenIssuer, BEER_SELECTOR_ACTION};

/// Errors that can occur while producing a view
#[derive(Debug, Error)]
pub enum ViewError {
    /// Directory request, decoding or aggregation failed
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// Drilldown request failed anti-forgery verification
    #[error(transparent)]
    Auth(#[from] TokenError),

    /// Rendering failed
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// View service shared by every request
#[derive(Debug, Clone)]
pub struct Views {
    directory: DirectoryClient,
    tokens: TokenIssuer,
    drilldown_url: String,
    maps_key: Option<String>,
}

impl Views {
    /// Create the view service
    ///
    /// # Arguments
    /// * `directory` - Directory API client
    /// * `tokens` - Issuer for drilldown tokens
    /// * `drilldown_url` - Where style browser scripts send drilldown requests
    pub fn new(directory: DirectoryClient, tokens: TokenIssuer, drilldown_url: impl Into<String>) -> Self {
        Self {
            directory,
            tokens,
            drilldown_url: drilldown_url.into(),
            maps_key: None,
        }
    }

    /// Set the Google Maps key used by pages that show a map
    pub fn with_maps_key(mut self, maps_key: Option<String>) -> Self {
        self.maps_key = maps_key;
        self
    }

    /// Script URL that pages showing [`Views::beer_map`] must load
    pub fn maps_script_url(&self) -> String {
        render::maps_script_url(self.maps_key.as_deref())
    }

    /// Map of breweries in `options.location`
    pub async fn beer_map(&self, options: &MapOptions) -> Result<String, ViewError> {
        let locations = self.directory.fetch_locations(&options.location).await?;
        tracing::debug!(
            location = %options.location,
            found = locations.len(),
            "fetched brewery locations"
        );

        let view = build_map_view(locations)?;
        Ok(render::render_map(&view, options)?)
    }

    /// List of beer styles with a fresh drilldown token
    pub async fn beer_selector(&self) -> Result<String, ViewError> {
        let styles = self.directory.fetch_styles().await?;
        let token = self.tokens.issue(BEER_SELECTOR_ACTION);

        Ok(render::render_style_browser(
            &styles,
            &self.drilldown_url,
            &token,
        )?)
    }

    /// Beers of the selected style
    ///
    /// The token is checked before anything else; a request that fails the
    /// check never reaches the directory.
    ///
    /// # Arguments
    /// * `style_id` - Style id as sent by the browser, coerced with
    ///   [`coerce_style_id`]
    /// * `token` - Anti-forgery token from the style browser render
    pub async fn beer_selector_drilldown(
        &self,
        style_id: &str,
        token: Option<&str>,
    ) -> Result<String, ViewError> {
        self.tokens.verify(BEER_SELECTOR_ACTION, token)?;
        self.beverages_by_style(style_id).await
    }

    /// Beers of a style, without token verification
    pub async fn beverages_by_style(&self, style_id: &str) -> Result<String, ViewError> {
        let style_id = coerce_style_id(style_id);
        let beverages = self.directory.fetch_beverages_by_style(style_id).await?;

        Ok(render::render_beverage_list(&beverages)?)
    }
}
