//! Clients for the business list and service review screens. Both only need
//! the standard CRUD operations plus a create/update pair.
use crate::error::AdminError;
use crate::model::{BusinessListing, ListingId, ListingUpsert, ReviewId, ReviewUpsert, ServiceReview};
use crate::SharedHttp;
use aggregate_fetch::{ClientError, CrudClient, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for the business listing CRUD routes.
#[derive(Clone)]
pub struct ListingClient {
    inner: ResourceClient<BusinessListing, SharedHttp>,
}

impl ListingClient {
    pub fn new(http: SharedHttp) -> Self {
        Self {
            inner: ResourceClient::new(http),
        }
    }

    #[instrument(skip(self))]
    pub async fn create_listing(&self, params: ListingUpsert) -> Result<BusinessListing, AdminError> {
        debug!("Sending request");
        self.inner.create(&params).await.map_err(AdminError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_listing(&self, id: ListingId, params: ListingUpsert) -> Result<BusinessListing, AdminError> {
        debug!("Sending request");
        self.inner.update(&id, &params).await.map_err(AdminError::from)
    }
}

#[async_trait]
impl CrudClient<BusinessListing> for ListingClient {
    type Http = SharedHttp;
    type Error = AdminError;

    fn inner(&self) -> &ResourceClient<BusinessListing, SharedHttp> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        AdminError::from(e)
    }
}

/// Client for the service review CRUD routes.
#[derive(Clone)]
pub struct ReviewClient {
    inner: ResourceClient<ServiceReview, SharedHttp>,
}

impl ReviewClient {
    pub fn new(http: SharedHttp) -> Self {
        Self {
            inner: ResourceClient::new(http),
        }
    }

    /// Ratings are whole stars from 1 to 5.
    #[instrument(skip(self))]
    pub async fn create_review(&self, params: ReviewUpsert) -> Result<ServiceReview, AdminError> {
        if !(1..=5).contains(&params.rating) {
            return Err(AdminError::InvalidInput(format!("rating {} is outside 1-5", params.rating)));
        }
        debug!("Sending request");
        self.inner.create(&params).await.map_err(AdminError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_review(&self, id: ReviewId, params: ReviewUpsert) -> Result<ServiceReview, AdminError> {
        if !(1..=5).contains(&params.rating) {
            return Err(AdminError::InvalidInput(format!("rating {} is outside 1-5", params.rating)));
        }
        debug!("Sending request");
        self.inner.update(&id, &params).await.map_err(AdminError::from)
    }
}

#[async_trait]
impl CrudClient<ServiceReview> for ReviewClient {
    type Http = SharedHttp;
    type Error = AdminError;

    fn inner(&self) -> &ResourceClient<ServiceReview, SharedHttp> {
        &self.inner
    }

    fn map_error(e: ClientError) -> Self::Error {
        AdminError::from(e)
    }
}
