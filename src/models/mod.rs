//! Wire types for the Kyrazo API.
//!
//! Field names follow the service's JSON (`_id`, camelCase). Optional fields
//! left as `None` are omitted from request bodies rather than sent as `null`.

mod common;
mod endpoints;
mod events;
mod sources;
mod targets;

#[cfg(test)]
mod models_tests;

pub use common::{DeliveryConfig, Status};
pub use endpoints::{
    CreateEndpointInput, Endpoint, EndpointConfig, EndpointListParams, UpdateEndpointInput,
};
pub use events::{
    BatchEventResult, BatchPublishEventResponse, EventMeta, EventTarget, Priority,
    PublishEventBody, PublishEventResponse,
};
pub use sources::{
    AuthenticationType, CreateSourceInput, Source, SourceAuthentication, SourceListParams,
    SourceRetryPolicy, SourceService, SourceType, UpdateSourceInput,
};
pub use targets::{
    CreateTargetInput, Target, TargetConfig, TargetListParams, TargetMethod, UpdateTargetInput,
};

pub(crate) use targets::{TargetSecret, TargetStatusBody};
