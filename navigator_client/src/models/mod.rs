//! Models for the request and response payloads of the catalog API.

mod entity;
mod search;

pub use entity::{Entity, EntityType, EntityUpdate, SourceType};
pub use search::{InteractiveSearchRequest, InteractiveSearchResponse};
