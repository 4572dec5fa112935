//! # Product Client
//!
//! Provides a high-level API for the product admin screen.
//! It wraps a `ResourceClient<Product>` and exposes domain-specific methods.
use crate::error::AdminError;
use crate::model::{Product, ProductCreate, ProductId, ProductUpdate};
use crate::SharedHttp;
use aggregate_fetch::{ClientError, CrudClient, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the product CRUD routes.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product, SharedHttp>,
}

impl ProductClient {
    pub fn new(http: SharedHttp) -> Self {
        Self {
            inner: ResourceClient::new(http),
        }
    }
}

#[async_trait]
impl CrudClient<Product> for ProductClient {
    type Http = SharedHttp;
    type Error = AdminError;

    fn inner(&self) -> &ResourceClient<Product, SharedHttp> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        AdminError::from(e)
    }
}

impl ProductClient {
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, AdminError> {
        debug!("Sending request");
        self.inner.get(&id).await.map_err(AdminError::from)
    }

    #[instrument(skip(self))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<Product, AdminError> {
        if params.name.trim().is_empty() {
            return Err(AdminError::InvalidInput("product name is required".into()));
        }
        if !params.price.is_finite() || params.price < 0.0 {
            return Err(AdminError::InvalidInput(format!("invalid price {}", params.price)));
        }
        debug!("Sending request");
        self.inner.create(&params).await.map_err(AdminError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product(&self, id: ProductId, update: ProductUpdate) -> Result<Product, AdminError> {
        if let Some(price) = update.price {
            if !price.is_finite() || price < 0.0 {
                return Err(AdminError::InvalidInput(format!("invalid price {price}")));
            }
        }
        debug!("Sending request");
        self.inner.update(&id, &update).await.map_err(AdminError::from)
    }
}
