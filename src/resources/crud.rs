//! Generic CRUD client shared by sources, targets and endpoints.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::transport::envelope::{success_flag, unwrap_data};
use crate::transport::{ApiRequest, HttpClient, HttpTransport};

/// A collection exposed under `/v1/{PATH}/{projectId}`.
///
/// Implemented by zero-sized marker types; the associated types fix the
/// request and response shapes of each collection.
pub trait Resource {
    /// Path segment after `/v1/`.
    const PATH: &'static str;
    /// Item returned by `get`, `create` and `update`.
    type Item: DeserializeOwned;
    /// Body of `create`.
    type Create: Serialize;
    /// Body of `update`.
    type Update: Serialize;
    /// Filters accepted by `list`.
    type ListParams: Serialize;
}

/// Client for one resource collection.
///
/// Every method issues exactly one request and returns the transport's
/// [`ApiError`] unchanged on failure.
pub struct ResourceClient<R, H> {
    transport: Arc<HttpTransport<H>>,
    resource: PhantomData<fn() -> R>,
}

impl<R, H> ResourceClient<R, H> {
    pub(crate) const fn new(transport: Arc<HttpTransport<H>>) -> Self {
        Self {
            transport,
            resource: PhantomData,
        }
    }

    pub(crate) const fn transport(&self) -> &Arc<HttpTransport<H>> {
        &self.transport
    }
}

impl<R: Resource, H> ResourceClient<R, H> {
    pub(crate) fn collection_path(project_id: &str) -> String {
        format!("/v1/{}/{project_id}", R::PATH)
    }

    pub(crate) fn item_path(project_id: &str, id: &str) -> String {
        format!("/v1/{}/{project_id}/{id}", R::PATH)
    }
}

impl<R: Resource, H: HttpClient> ResourceClient<R, H> {
    /// Lists the project's items.
    ///
    /// The response is returned as sent by the service, pagination metadata
    /// included. A 204 yields [`Value::Null`].
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the request.
    pub async fn list(
        &self,
        project_id: &str,
        params: Option<&R::ListParams>,
    ) -> Result<Value, ApiError> {
        let request = ApiRequest::get(Self::collection_path(project_id)).with_query(&params);
        let body = self.transport.execute(request).await?;
        Ok(body.unwrap_or(Value::Null))
    }

    /// Fetches one item.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the request, or
    /// [`ApiError::Generic`] if the response is not a `{data: …}` envelope.
    pub async fn get(&self, project_id: &str, id: &str) -> Result<R::Item, ApiError> {
        let body = self
            .transport
            .execute(ApiRequest::get(Self::item_path(project_id, id)))
            .await?;
        unwrap_data(body)
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn create(&self, project_id: &str, input: &R::Create) -> Result<R::Item, ApiError> {
        let request = ApiRequest::post(Self::collection_path(project_id)).with_json(input);
        unwrap_data(self.transport.execute(request).await?)
    }

    /// Applies a partial update. Only fields set on `input` are sent.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn update(
        &self,
        project_id: &str,
        id: &str,
        input: &R::Update,
    ) -> Result<R::Item, ApiError> {
        let request = ApiRequest::patch(Self::item_path(project_id, id)).with_json(input);
        unwrap_data(self.transport.execute(request).await?)
    }

    /// Deletes an item.
    ///
    /// Returns the service's `success` flag; a response without one (including
    /// 204) reads as `false`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the request.
    pub async fn delete(&self, project_id: &str, id: &str) -> Result<bool, ApiError> {
        let body = self
            .transport
            .execute(ApiRequest::delete(Self::item_path(project_id, id)))
            .await?;
        Ok(success_flag(body.as_ref()))
    }
}

impl<R, H> Clone for ResourceClient<R, H> {
    fn clone(&self) -> Self {
        Self::new(Arc::clone(&self.transport))
    }
}

impl<R: Resource, H> fmt::Debug for ResourceClient<R, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceClient")
            .field("resource", &R::PATH)
            .field("base_url", &self.transport.config().base_url().as_str())
            .finish()
    }
}
