use crate::error::AdminError;
use crate::model::{GstRate, GstRateId, GstRateUpsert};
use crate::SharedHttp;
use aggregate_fetch::{ClientError, CrudClient, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the GST rate CRUD routes.
#[derive(Clone)]
pub struct GstRateClient {
    inner: ResourceClient<GstRate, SharedHttp>,
}

impl GstRateClient {
    pub fn new(http: SharedHttp) -> Self {
        Self {
            inner: ResourceClient::new(http),
        }
    }

    /// Rates are percentages and must lie in `0..=100`.
    #[instrument(skip(self))]
    pub async fn create_rate(&self, params: GstRateUpsert) -> Result<GstRate, AdminError> {
        validate_rate(params.rate)?;
        debug!("Sending request");
        self.inner.create(&params).await.map_err(AdminError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_rate(&self, id: GstRateId, params: GstRateUpsert) -> Result<GstRate, AdminError> {
        validate_rate(params.rate)?;
        debug!("Sending request");
        self.inner.update(&id, &params).await.map_err(AdminError::from)
    }

    /// Active rates only, lowest first.
    #[instrument(skip(self))]
    pub async fn active_rates(&self) -> Result<Vec<GstRate>, AdminError> {
        let mut rates: Vec<GstRate> = self
            .list()
            .await?
            .into_iter()
            .filter(|rate| rate.is_active)
            .collect();
        rates.sort_by(|a, b| a.rate.total_cmp(&b.rate));
        Ok(rates)
    }
}

fn validate_rate(rate: f64) -> Result<(), AdminError> {
    if (0.0..=100.0).contains(&rate) {
        Ok(())
    } else {
        Err(AdminError::InvalidInput(format!("GST rate {rate} is outside 0-100")))
    }
}

#[async_trait]
impl CrudClient<GstRate> for GstRateClient {
    type Http = SharedHttp;
    type Error = AdminError;

    fn inner(&self) -> &ResourceClient<GstRate, SharedHttp> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        AdminError::from(e)
    }
}
