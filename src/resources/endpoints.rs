//! Endpoints collection.

use crate::models::{CreateEndpointInput, Endpoint, EndpointListParams, UpdateEndpointInput};

use super::crud::{Resource, ResourceClient};

/// Marker for `/v1/endpoints`.
#[derive(Debug, Clone, Copy)]
pub struct Endpoints;

impl Resource for Endpoints {
    const PATH: &'static str = "endpoints";
    type Item = Endpoint;
    type Create = CreateEndpointInput;
    type Update = UpdateEndpointInput;
    type ListParams = EndpointListParams;
}

/// Client for delivery endpoints.
pub type EndpointsClient<H> = ResourceClient<Endpoints, H>;
