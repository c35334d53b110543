//! Command-line interface parsing for brewmap
//!
//! This module handles parsing of CLI arguments using clap. Every option can
//! also be supplied through the environment, which is how the HTTP host is
//! normally configured.

use std::net::SocketAddr;
use std::time::Duration;

use clap::{Parser, Subcommand};
use reqwest::Url;
use thiserror::Error;

use crate::data::{DirectoryClient, DirectoryConfig, DEFAULT_BASE_URL};
use crate::server::DRILLDOWN_PATH;
use crate::token::TokenIssuer;
use crate::views::Views;

/// Longest accepted drilldown token lifetime (one year)
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 365 * 24 * 60 * 60;

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// The API key is empty
    #[error("BreweryDB API key must not be empty (--api-key or BREWERYDB_API_KEY)")]
    EmptyApiKey,

    /// The base URL does not parse
    #[error("Invalid BreweryDB base URL '{0}': {1}")]
    InvalidBaseUrl(String, String),
}

/// brewmap - Brewery maps and beer style browsing from BreweryDB
#[derive(Parser, Debug)]
#[command(name = "brewmap")]
#[command(about = "Brewery maps and a beer style browser backed by BreweryDB")]
#[command(version)]
pub struct Cli {
    /// BreweryDB API key
    #[arg(long, env = "BREWERYDB_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// BreweryDB API root
    #[arg(long, env = "BREWERYDB_API_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Google Maps JavaScript API key, loaded by map pages
    #[arg(long, env = "GMAPS_API_KEY", hide_env_values = true)]
    pub maps_key: Option<String>,

    /// Secret used to sign drilldown tokens; derived from the API key when unset
    #[arg(long, env = "BREWMAP_TOKEN_SECRET", hide_env_values = true)]
    pub token_secret: Option<String>,

    /// Drilldown token lifetime
    #[arg(
        long,
        env = "BREWMAP_TOKEN_LIFETIME",
        value_name = "SECONDS",
        default_value_t = 86_400,
        value_parser = clap::value_parser!(u64).range(..=MAX_TOKEN_LIFETIME_SECS)
    )]
    pub token_lifetime: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Serve the map, style browser and drilldown over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "BREWMAP_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },

    /// Print the brewery map fragment for a locality
    Map {
        /// Locality to search
        #[arg(long, default_value = "Austin")]
        location: String,
        /// Canvas height in pixels
        #[arg(long, default_value_t = 300)]
        height: u32,
        /// Canvas width in pixels
        #[arg(long, default_value_t = 500)]
        width: u32,
    },

    /// Print the style browser fragment
    Styles {
        /// Endpoint the browser script sends drilldown requests to
        #[arg(long, default_value = DRILLDOWN_PATH)]
        drilldown_url: String,
    },

    /// Print the beers of one style
    Beers {
        /// Style id; text without leading digits is treated as 0
        #[arg(long, allow_hyphen_values = true)]
        style_id: String,
    },
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: DirectoryConfig,
    pub maps_key: Option<String>,
    pub token_secret: Vec<u8>,
    pub token_lifetime: Duration,
}

impl AppConfig {
    /// Creates an AppConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(AppConfig)` with validated settings
    /// * `Err(CliError)` if the API key is blank or the base URL is invalid
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let api_key = cli.api_key.trim();
        if api_key.is_empty() {
            return Err(CliError::EmptyApiKey);
        }

        Url::parse(&cli.base_url)
            .map_err(|e| CliError::InvalidBaseUrl(cli.base_url.clone(), e.to_string()))?;

        let token_secret = match cli.token_secret.as_deref().filter(|s| !s.is_empty()) {
            Some(secret) => secret.as_bytes().to_vec(),
            None => {
                tracing::warn!("no token secret configured, deriving one from the API key");
                format!("brewmap-token:{}", api_key).into_bytes()
            }
        };

        Ok(AppConfig {
            directory: DirectoryConfig::new(api_key).with_base_url(cli.base_url.clone()),
            maps_key: cli.maps_key.clone().filter(|k| !k.is_empty()),
            token_secret,
            token_lifetime: Duration::from_secs(cli.token_lifetime),
        })
    }

    /// Build the view service for this configuration
    pub fn views(&self, drilldown_url: &str) -> Views {
        let directory = DirectoryClient::new(self.directory.clone());
        let tokens = TokenIssuer::new(&self.token_secret, self.token_lifetime);
        Views::new(directory, tokens, drilldown_url).with_maps_key(self.maps_key.clone())
    }
}
