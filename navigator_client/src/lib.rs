//! Client for the Navigator metadata catalog REST API.
//!
//! The catalog indexes entities (databases, tables, columns, directories,
//! files, operations) harvested from cluster services and lets users search
//! them, annotate them with tags and properties, and inspect their lineage.
//! This crate talks to the catalog's `v9` HTTP API and post-filters search
//! results through an optional [`authz::Authorizer`] so a caller only ever
//! sees entities the acting user may view.
//!
//! ```no_run
//! use navigator_client::{Client, NavigatorConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let config = NavigatorConfig::new("http://nav.example.com:7187/api", "navadmin", "hunter2");
//! let client = Client::new(config)?;
//!
//! let entities = client
//!     .search_entities("sales", 10, 0, &["hive".to_string()])
//!     .await?;
//! for entity in entities {
//!     println!("{:?} {:?}", entity.entity_type, entity.original_name);
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use navigator_authz::Authorizer;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use url::Url;

mod api;
mod config;
pub mod models;
mod query;
mod secure;

pub use navigator_authz as authz;

pub use crate::api::search::InteractiveSearchBuilder;
pub use crate::config::{
    DEFAULT_FETCH_SIZE_SEARCH, DEFAULT_FETCH_SIZE_SEARCH_INTERACTIVE, NavigatorConfig,
};

/// Version segment appended to the configured base URL.
pub const API_VERSION: &str = "v9";

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";

/// Primary error type for the [`Client`]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("base URL error: {0}")]
    BaseUrl(#[source] url::ParseError),

    #[error("failed to search for entities with search query: {query}")]
    SearchEntities {
        query: String,
        #[source]
        source: RequestError,
    },

    #[error("failed to search for entities with search query {body}")]
    SearchEntitiesInteractive {
        body: String,
        #[source]
        source: RequestError,
    },

    #[error("failed to get suggestions for prefix: {prefix}")]
    Suggest {
        prefix: String,
        #[source]
        source: RequestError,
    },

    #[error("failed to find entity: {source}")]
    FindEntity {
        #[source]
        source: RequestError,
    },

    #[error("could not find entity with query filters: {filters}")]
    EntityNotFound { filters: String },

    #[error("found more than 1 entity with query filters: {filters}")]
    EntityAmbiguous { filters: String },

    #[error("failed to get entity {entity_id}: {source}")]
    GetEntity {
        entity_id: String,
        #[source]
        source: RequestError,
    },

    #[error("failed to update entity {entity_id}: {source}")]
    UpdateEntity {
        entity_id: String,
        #[source]
        source: RequestError,
    },

    #[error("failed to get lineage for entity ID {entity_id}: {source}")]
    GetLineage {
        entity_id: String,
        #[source]
        source: RequestError,
    },

    #[error("{operation} is not implemented")]
    Unimplemented { operation: &'static str },
}

/// Failure of a single HTTP exchange with the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("error while processing the HTTP request: {0}")]
    Send(#[source] reqwest::Error),

    #[error("server responded with error [{status}]: {message}")]
    Api { status: StatusCode, message: String },

    #[error("failed to parse JSON response: {0}")]
    Json(#[source] reqwest::Error),

    #[error("failed to read the API response body: {0}")]
    Text(#[source] reqwest::Error),

    #[error("failed to serialize the request body: {0}")]
    Serialize(#[source] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Resolves the name of the local cluster.
///
/// When a resolver is installed and yields a name, every search query is
/// scoped with a `clusterName` clause so results from other clusters
/// sharing the same catalog are excluded.
pub trait ClusterNameResolver: std::fmt::Debug + Send + Sync {
    /// Name of the local cluster, when one is configured.
    fn cluster_name(&self) -> Option<String>;
}

/// A [`ClusterNameResolver`] that always yields the same name.
#[derive(Clone, Debug)]
pub struct StaticClusterName(String);

impl StaticClusterName {
    /// Resolver yielding `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl ClusterNameResolver for StaticClusterName {
    fn cluster_name(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// The catalog API client
///
/// For programmatic access to the HTTP API of the Navigator metadata
/// catalog. Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    /// The base URL for making requests, fixed version segment included
    api_url: String,
    /// The user for HTTP basic authentication on each request
    username: String,
    /// The password for HTTP basic authentication on each request
    password: Secret<String>,
    /// Remote fetch size for batch entity searches
    fetch_size_search: usize,
    /// Remote fetch size for interactive entity searches
    fetch_size_search_interactive: usize,
    /// A [`reqwest::Client`] for handling HTTP requests
    http_client: reqwest::Client,
    /// Post-filters search results when installed
    authorizer: Option<Arc<dyn Authorizer>>,
    /// Scopes search queries to the local cluster when installed
    cluster: Option<Arc<dyn ClusterNameResolver>>,
}

impl Client {
    /// Create a new [`Client`]
    ///
    /// Appends the fixed API version segment to the configured base URL
    /// and fails if the result is not a valid URL.
    pub fn new(config: NavigatorConfig) -> Result<Self> {
        let NavigatorConfig {
            api_url,
            username,
            password,
            fetch_size_search,
            fetch_size_search_interactive,
        } = config;
        let api_url = format!("{}/{API_VERSION}", api_url.trim_end_matches('/'));
        Url::parse(&api_url).map_err(Error::BaseUrl)?;
        Ok(Self {
            api_url,
            username,
            password,
            fetch_size_search,
            fetch_size_search_interactive,
            http_client: reqwest::Client::new(),
            authorizer: None,
            cluster: None,
        })
    }

    /// Install an [`Authorizer`] that search results are filtered through
    ///
    /// The authorizer is expected to be bound to the acting user. Without
    /// one, results are returned exactly as the service sent them.
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// Install a [`ClusterNameResolver`] that scopes every search query to
    /// the local cluster
    pub fn with_cluster_resolver(mut self, resolver: Arc<dyn ClusterNameResolver>) -> Self {
        self.cluster = Some(resolver);
        self
    }

    /// Compose a request with the basic-auth credentials attached.
    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http_client
            .request(method, url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
    }

    fn cluster_name(&self) -> Option<String> {
        self.cluster
            .as_ref()
            .and_then(|cluster| cluster.cluster_name())
    }
}

/// Issue a prepared request and decode the JSON response, mapping
/// transport failures and non-success statuses.
pub(crate) async fn exchange_json<T: DeserializeOwned + Send>(
    request: reqwest::RequestBuilder,
) -> Result<T, RequestError> {
    let response = request.send().await.map_err(RequestError::Send)?;
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(RequestError::Json)
    } else {
        Err(RequestError::Api {
            status,
            message: response.text().await.map_err(RequestError::Text)?,
        })
    }
}
