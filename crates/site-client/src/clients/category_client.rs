use crate::error::AdminError;
use crate::model::{Category, CategoryId, CategoryUpsert};
use crate::SharedHttp;
use aggregate_fetch::{ClientError, CrudClient, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the category CRUD routes.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category, SharedHttp>,
}

impl CategoryClient {
    pub fn new(http: SharedHttp) -> Self {
        Self {
            inner: ResourceClient::new(http),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_category(&self, params: CategoryUpsert) -> Result<Category, AdminError> {
        if params.name.trim().is_empty() {
            return Err(AdminError::InvalidInput("category name is required".into()));
        }
        debug!("Sending request");
        self.inner.create(&params).await.map_err(AdminError::from)
    }

    #[instrument(skip(self))]
    pub async fn rename_category(&self, id: CategoryId, params: CategoryUpsert) -> Result<Category, AdminError> {
        debug!("Sending request");
        self.inner.update(&id, &params).await.map_err(AdminError::from)
    }
}

#[async_trait]
impl CrudClient<Category> for CategoryClient {
    type Http = SharedHttp;
    type Error = AdminError;

    fn inner(&self) -> &ResourceClient<Category, SharedHttp> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        AdminError::from(e)
    }
}
