//! brewmap library
//!
//! Brewery maps and a drilldown beer style browser rendered from the BreweryDB
//! directory API. The modules are exposed for the binary and for integration
//! tests.

pub mod cli;
pub mod data;
pub mod render;
pub mod server;
pub mod token;
pub mod views;
