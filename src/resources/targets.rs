//! Targets collection, with the secret and status operations only targets
//! have.

use crate::error::ApiError;
use crate::models::{
    CreateTargetInput, Target, TargetListParams, TargetSecret, TargetStatusBody,
    UpdateTargetInput,
};
use crate::transport::envelope::unwrap_data;
use crate::transport::{ApiRequest, HttpClient};

use super::crud::{Resource, ResourceClient};

/// Marker for `/v1/targets`.
#[derive(Debug, Clone, Copy)]
pub struct Targets;

impl Resource for Targets {
    const PATH: &'static str = "targets";
    type Item = Target;
    type Create = CreateTargetInput;
    type Update = UpdateTargetInput;
    type ListParams = TargetListParams;
}

/// Client for delivery targets.
pub type TargetsClient<H> = ResourceClient<Targets, H>;

impl<H: HttpClient> ResourceClient<Targets, H> {
    /// Fetches the signing secret of a target.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] of the request, or
    /// [`ApiError::Generic`] if the response has no `data.secret`.
    pub async fn get_secret(&self, project_id: &str, id: &str) -> Result<String, ApiError> {
        let path = format!("{}/secret", Self::item_path(project_id, id));
        let body = self.transport().execute(ApiRequest::get(path)).await?;
        let TargetSecret { secret } = unwrap_data(body)?;
        Ok(secret)
    }

    /// Enables or disables deliveries to a target.
    ///
    /// # Errors
    ///
    /// Same as [`get`](Self::get).
    pub async fn update_status(
        &self,
        project_id: &str,
        id: &str,
        enabled: bool,
    ) -> Result<Target, ApiError> {
        let request = ApiRequest::put(Self::item_path(project_id, id))
            .with_json(&TargetStatusBody { enabled });
        unwrap_data(self.transport().execute(request).await?)
    }
}
