//! Resource clients, one per API collection.
//!
//! All clients share the facade's transport. Sources, targets and endpoints
//! are instances of the generic [`ResourceClient`]; events have their own
//! client because they are published rather than stored.

mod crud;
mod endpoints;
mod events;
mod sources;
mod targets;


pub use crud::{Resource, ResourceClient};
pub use endpoints::{Endpoints, EndpointsClient};
pub use events::{EventsClient, IDEMPOTENCY_KEY};
pub use sources::{Sources, SourcesClient};
pub use targets::{Targets, TargetsClient};
