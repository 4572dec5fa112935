use crate::error::AdminError;
use crate::model::{SettingsId, SettingsUpsert, SiteSettings};
use crate::SharedHttp;
use aggregate_fetch::{ClientError, CrudClient, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the site settings CRUD routes.
#[derive(Clone)]
pub struct SettingsClient {
    inner: ResourceClient<SiteSettings, SharedHttp>,
}

impl SettingsClient {
    pub fn new(http: SharedHttp) -> Self {
        Self {
            inner: ResourceClient::new(http),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_settings(&self, params: SettingsUpsert) -> Result<SiteSettings, AdminError> {
        validate(&params)?;
        debug!("Sending request");
        self.inner.create(&params).await.map_err(AdminError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_settings(&self, id: SettingsId, params: SettingsUpsert) -> Result<SiteSettings, AdminError> {
        validate(&params)?;
        debug!("Sending request");
        self.inner.update(&id, &params).await.map_err(AdminError::from)
    }
}

fn validate(params: &SettingsUpsert) -> Result<(), AdminError> {
    if params.site_name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(AdminError::InvalidInput("site name cannot be blank".into()));
    }
    if let Some(email) = params.email.as_deref() {
        if !email.contains('@') {
            return Err(AdminError::InvalidInput(format!("invalid email '{email}'")));
        }
    }
    Ok(())
}

#[async_trait]
impl CrudClient<SiteSettings> for SettingsClient {
    type Http = SharedHttp;
    type Error = AdminError;

    fn inner(&self) -> &ResourceClient<SiteSettings, SharedHttp> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        AdminError::from(e)
    }
}
