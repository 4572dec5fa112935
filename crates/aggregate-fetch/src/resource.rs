//! # Resource CRUD Contract
//!
//! Admin screens manage resources through the same REST routes:
//!
//! | Operation       | Route                               |
//! |-----------------|-------------------------------------|
//! | list            | `GET    /{path}`                    |
//! | get             | `GET    /{path}/{id}`               |
//! | create          | `POST   /{path}`                    |
//! | update          | `PUT    /{path}/{id}`               |
//! | delete          | `DELETE /{path}/{id}`               |
//! | toggle status   | `PATCH  /{path}/{id}/toggle-status` |
//!
//! Each answers with the `{ success, data, message, errors? }` wrapper (see
//! [`ApiResponse`]). [`RestResource`] describes one resource type and
//! [`ResourceClient`] speaks the routes for it. Resource-specific clients wrap
//! a `ResourceClient` and implement [`CrudClient`] to inherit the common
//! operations.

use crate::cardinality::Cardinality;
use crate::client::HttpClient;
use crate::envelope::ApiResponse;
use crate::error::ClientError;
use crate::normalize::normalize;
use crate::request::{HttpRequest, Method};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{Debug, Display};
use std::marker::PhantomData;
use tracing::{debug, instrument, warn};

/// A record type served by the CRUD routes, with its own id and payload types.
pub trait RestResource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// The identifier used in `/{path}/{id}` routes.
    type Id: Display + Debug + Send + Sync;

    /// Payload for `create`.
    type Create: Serialize + Debug + Send + Sync;

    /// Payload for `update`.
    type Update: Serialize + Debug + Send + Sync;

    /// Collection path relative to the API base, without slashes (e.g. `products`).
    const PATH: &'static str;
}

/// Generic client for the CRUD routes of one [`RestResource`].
pub struct ResourceClient<T: RestResource, C: HttpClient> {
    http: C,
    _resource: PhantomData<fn() -> T>,
}

impl<T: RestResource, C: HttpClient + Clone> Clone for ResourceClient<T, C> {
    fn clone(&self) -> Self {
        Self::new(self.http.clone())
    }
}

impl<T: RestResource, C: HttpClient> ResourceClient<T, C> {
    pub fn new(http: C) -> Self {
        Self {
            http,
            _resource: PhantomData,
        }
    }

    fn collection() -> String {
        format!("/{}", T::PATH)
    }

    fn member(id: &T::Id) -> String {
        format!("/{}/{}", T::PATH, id)
    }

    /// Lists every record. The records are taken from `data` or `data.data`,
    /// whichever holds an array.
    pub async fn list(&self) -> Result<Vec<T>, ClientError> {
        let body = self.call(HttpRequest::get(Self::collection())).await?;
        let records = normalize(Cardinality::Plural, Some(&body));
        records
            .decode()
            .map_err(|e| ClientError::Payload(e.to_string()))
    }

    pub async fn get(&self, id: &T::Id) -> Result<T, ClientError> {
        let body = self.call(HttpRequest::get(Self::member(id))).await?;
        Self::single(&body)
    }

    pub async fn create(&self, params: &T::Create) -> Result<T, ClientError> {
        let request = HttpRequest::new(Method::Post, Self::collection()).with_json(to_json(params)?);
        let body = self.call(request).await?;
        Self::single(&body)
    }

    pub async fn update(&self, id: &T::Id, update: &T::Update) -> Result<T, ClientError> {
        let request = HttpRequest::new(Method::Put, Self::member(id)).with_json(to_json(update)?);
        let body = self.call(request).await?;
        Self::single(&body)
    }

    pub async fn delete(&self, id: &T::Id) -> Result<(), ClientError> {
        self.call(HttpRequest::new(Method::Delete, Self::member(id)))
            .await
            .map(|_| ())
    }

    /// Flips the active/inactive flag and returns the updated record.
    pub async fn toggle_status(&self, id: &T::Id) -> Result<T, ClientError> {
        let path = format!("{}/toggle-status", Self::member(id));
        let body = self.call(HttpRequest::new(Method::Patch, path)).await?;
        Self::single(&body)
    }

    /// Sends the request and unwraps a `success: false` answer into
    /// [`ClientError::Rejected`]. Returns the raw body otherwise.
    async fn call(&self, request: HttpRequest) -> Result<Value, ClientError> {
        let method = request.method;
        let path = request.path.clone();
        let response = self.http.send(request).await?;
        let api = ApiResponse::from_body(&response.body);
        if !api.success {
            let message = api.message.clone().unwrap_or_else(|| "Request rejected".to_string());
            warn!(%method, %path, %message, "Rejected");
            return Err(ClientError::Rejected {
                message,
                errors: api.field_errors(),
            });
        }
        debug!(%method, %path, status = response.status, "Ok");
        Ok(response.body)
    }

    fn single(body: &Value) -> Result<T, ClientError> {
        let record = normalize(Cardinality::Singular, Some(body));
        if record.is_null() {
            return Err(ClientError::Payload(format!("No {} record in response", T::PATH)));
        }
        record
            .decode()
            .map_err(|e| ClientError::Payload(e.to_string()))
    }
}

fn to_json<P: Serialize>(payload: &P) -> Result<Value, ClientError> {
    serde_json::to_value(payload).map_err(|e| ClientError::Payload(e.to_string()))
}

/// Trait for resource-specific clients to inherit the common CRUD operations.
///
/// Implementors only provide access to their inner [`ResourceClient`] and an
/// error mapping; `list`, `delete` and `toggle_status` come for free.
#[async_trait]
pub trait CrudClient<T: RestResource>: Send + Sync {
    /// The HTTP client the inner [`ResourceClient`] uses.
    type Http: HttpClient;

    /// The resource-specific error type.
    type Error: Send;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T, Self::Http>;

    /// Map client errors to the specific resource error type.
    fn map_error(e: ClientError) -> Self::Error;

    /// Fetch every record.
    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete a record by ID.
    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        debug!("Sending request");
        self.inner().delete(&id).await.map_err(Self::map_error)
    }

    /// Flip a record's active flag.
    #[instrument(skip(self), fields(resource = T::PATH))]
    async fn toggle_status(&self, id: T::Id) -> Result<T, Self::Error> {
        debug!("Sending request");
        self.inner().toggle_status(&id).await.map_err(Self::map_error)
    }
}
