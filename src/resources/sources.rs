//! Sources collection.

use crate::models::{CreateSourceInput, Source, SourceListParams, UpdateSourceInput};

use super::crud::{Resource, ResourceClient};

/// Marker for `/v1/sources`.
#[derive(Debug, Clone, Copy)]
pub struct Sources;

impl Resource for Sources {
    const PATH: &'static str = "sources";
    type Item = Source;
    type Create = CreateSourceInput;
    type Update = UpdateSourceInput;
    type ListParams = SourceListParams;
}

/// Client for webhook sources.
pub type SourcesClient<H> = ResourceClient<Sources, H>;
