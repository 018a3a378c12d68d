//! The client's API operations, one module per endpoint area.

pub(crate) mod entities;
pub(crate) mod lineage;
pub(crate) mod search;

use serde::Serialize;

/// Query parameters of the batch `entities` endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct EntitiesQuery<'a> {
    pub(crate) query: &'a str,
    pub(crate) offset: usize,
    pub(crate) limit: usize,
}
