//! Fetches the landing page once and reports which sections are available.
//!
//! ```bash
//! SITE_API_BASE_URL=https://api.example.com/api RUST_LOG=info cargo run -p site-client
//! cargo run -p site-client -- --config site.toml --timeout-secs 3
//! ```

use aggregate_fetch::tracing::setup_tracing;
use anyhow::Context;
use clap::Parser;
use site_client::config::SiteConfig;
use site_client::error::ConfigError;
use site_client::landing::{LandingView, Section};
use site_client::lifecycle::SiteSystem;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn, Instrument};

#[derive(Debug, Parser)]
#[command(name = "site-client", about = "Fetch the landing page sections and report their state")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the API base URL.
    #[arg(long)]
    base_url: Option<String>,

    /// Overrides the per-request timeout.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Number of refresh cycles to run.
    #[arg(long, default_value_t = 1)]
    cycles: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();
    let args = Args::parse();

    let mut config = match (SiteConfig::load(args.config.as_deref()), &args.base_url) {
        (Ok(config), _) => config,
        // A base URL on the command line is enough on its own.
        (Err(ConfigError::Missing(_)), Some(base_url)) => SiteConfig::new(base_url.clone()),
        (Err(e), _) => return Err(e).context("loading configuration"),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }
    if let Some(secs) = args.timeout_secs.filter(|s| *s > 0) {
        config.request_timeout = Duration::from_secs(secs);
    }
    info!(?config, "Configuration loaded");

    let system = SiteSystem::from_config(&config).context("building HTTP client")?;

    for cycle in 1..=args.cycles {
        let span = tracing::info_span!("landing_refresh", cycle);
        let result = async { system.landing.refresh().await }
            .instrument(span)
            .await?;

        let view = LandingView::from_result(&result);
        if let Section::Ready(Some(hero)) = &view.hero {
            info!(title = %hero.title, "Hero");
        }
        if let Some(products) = view.products.ready() {
            info!(count = products.len(), "Products");
        }
        let missing = view.missing();
        if missing.is_empty() {
            info!("All sections available");
        } else {
            warn!(?missing, "Some sections unavailable");
        }
    }

    system.shutdown().await.map_err(anyhow::Error::msg)?;
    Ok(())
}
