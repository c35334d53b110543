//! brewmap - Brewery maps and beer style browsing
//!
//! Serves the map, style browser and drilldown over HTTP, or renders a single
//! view to stdout.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use brewmap::cli::{AppConfig, Cli, Command};
use brewmap::render::MapOptions;
use brewmap::server::{self, DRILLDOWN_PATH};

/// Sets up structured logging on stderr so rendered output on stdout stays clean
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brewmap=info,tower_http=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = AppConfig::from_cli(&cli)?;

    match cli.command {
        Command::Serve { bind } => {
            tracing::info!(base_url = %config.directory.base_url, "starting brewmap server");
            server::serve(config.views(DRILLDOWN_PATH), bind).await?;
        }
        Command::Map {
            location,
            height,
            width,
        } => {
            let options = MapOptions {
                height,
                width,
                location,
            };
            let html = config.views(DRILLDOWN_PATH).beer_map(&options).await?;
            println!("{}", html);
        }
        Command::Styles { drilldown_url } => {
            let html = config.views(&drilldown_url).beer_selector().await?;
            println!("{}", html);
        }
        Command::Beers { style_id } => {
            let views = config.views(DRILLDOWN_PATH);
            let html = views.beverages_by_style(&style_id).await?;
            println!("{}", html);
        }
    }

    Ok(())
}
