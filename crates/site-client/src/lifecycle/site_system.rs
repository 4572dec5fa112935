use crate::clients::{CategoryClient, GstRateClient, ListingClient, ProductClient, ReviewClient, SettingsClient};
use crate::config::SiteConfig;
use crate::landing;
use crate::SharedHttp;
use aggregate_fetch::{AggregateFetcher, FetchActor, FetchError, FetchHandle, RestClient};
use std::sync::Arc;
use tracing::{error, info};

/// Every client the site needs, sharing one HTTP client.
pub struct SiteSystem {
    /// Handle to the landing page fetch actor.
    pub landing: FetchHandle,

    pub products: ProductClient,
    pub categories: CategoryClient,
    pub gst_rates: GstRateClient,
    pub listings: ListingClient,
    pub reviews: ReviewClient,
    pub settings: SettingsClient,

    handle: tokio::task::JoinHandle<()>,
}

impl SiteSystem {
    /// Builds a [`RestClient`] from `config` and wires the system around it.
    pub fn from_config(config: &SiteConfig) -> Result<Self, FetchError> {
        let mut client = RestClient::new(&config.base_url, config.request_timeout)?;
        if let Some(token) = &config.api_token {
            client = client.with_token(token.clone());
        }
        Self::with_client(Arc::new(client), config)
    }

    /// Wires the system around an existing HTTP client. Must be called from
    /// within a Tokio runtime.
    pub fn with_client(http: SharedHttp, config: &SiteConfig) -> Result<Self, FetchError> {
        let requests = landing::requests(&config.endpoints)?;
        let fetcher = AggregateFetcher::new(http.clone(), landing::registry()).with_options(config.fetch_options());
        let (actor, landing) = FetchActor::new(fetcher, requests, 16);
        let handle = tokio::spawn(actor.run());

        info!(base_url = %config.base_url, "Site system started");

        Ok(Self {
            landing,
            products: ProductClient::new(http.clone()),
            categories: CategoryClient::new(http.clone()),
            gst_rates: GstRateClient::new(http.clone()),
            listings: ListingClient::new(http.clone()),
            reviews: ReviewClient::new(http.clone()),
            settings: SettingsClient::new(http),
            handle,
        })
    }

    /// Stops the landing actor and waits for it to exit.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down site system...");
        drop(self.landing);

        if let Err(e) = self.handle.await {
            error!("Fetch actor task failed: {:?}", e);
            return Err(format!("Fetch actor task failed: {:?}", e));
        }

        info!("Site system shutdown complete.");
        Ok(())
    }
}
