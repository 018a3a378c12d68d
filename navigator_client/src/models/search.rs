//! Interactive search request and response models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::Entity;

/// JSON body of an interactive entity search.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractiveSearchRequest {
    /// Free-text query, `*` when the caller supplied none.
    pub query: String,
    /// Facet dimensions to aggregate on. The key is always serialized; the
    /// service rejects bodies without it.
    pub facet_fields: Vec<String>,
    /// Prefix that facet values must start with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_prefix: Option<String>,
    /// Range facet definitions, passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facet_ranges: Option<Vec<Value>>,
    /// Filter queries: the caller's own, then the generated scoping clauses.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filter_queries: Vec<String>,
    /// Only serialized when `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_class_entities_only: Option<bool>,
}

/// Response of an interactive entity search.
///
/// Everything besides the result list, pagination counters and facet
/// blocks included, is preserved verbatim in `extra` so callers can page
/// and render facets from it.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct InteractiveSearchResponse {
    /// Matched entities, post-filtered and truncated on the client side.
    #[serde(default)]
    pub results: Vec<Entity>,
    /// Remaining response fields as the service returned them.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
