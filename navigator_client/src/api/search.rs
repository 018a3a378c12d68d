//! Entity search operations.

use reqwest::Method;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};

use crate::api::EntitiesQuery;
use crate::models::{Entity, InteractiveSearchRequest, InteractiveSearchResponse};
use crate::{Client, Error, JSON_CONTENT_TYPE, RequestError, Result, exchange_json, query};

impl Client {
    /// Search entities with a free-text query
    ///
    /// Bare terms match against a whitelist of searchable fields and are
    /// OR-combined. A `field:value` term filters on that field instead,
    /// and a `type:<kind>` term widens the entity-type restriction beyond
    /// the default subset for the given `sources`. The remote fetch always
    /// uses the configured batch fetch size; `limit` truncates locally
    /// after authorization filtering and `offset` pages the remote result
    /// set.
    ///
    /// # Example
    /// ```no_run
    /// # use navigator_client::{Client, NavigatorConfig};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    /// let config = NavigatorConfig::new("http://localhost:7187/api", "navadmin", "hunter2");
    /// let client = Client::new(config)?;
    /// let entities = client
    ///     .search_entities("sales type:view", 10, 0, &["hive".to_string()])
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_entities(
        &self,
        query_s: &str,
        limit: usize,
        offset: usize,
        sources: &[String],
    ) -> Result<Vec<Entity>> {
        let cluster = self.cluster_name();
        let filter_query = query::build_search_query(query_s, sources, cluster.as_deref());
        let params = EntitiesQuery {
            query: &filter_query,
            offset,
            limit: self.fetch_size_search,
        };
        info!(
            query = %filter_query,
            offset,
            limit = self.fetch_size_search,
            "searching entities"
        );

        let url = format!("{}/entities", self.api_url);
        let entities: Vec<Entity> =
            match exchange_json(self.request(Method::GET, &url).query(&params)).await {
                Ok(entities) => entities,
                Err(source) => {
                    error!(%source, query = query_s, "entity search failed");
                    return Err(Error::SearchEntities {
                        query: query_s.to_string(),
                        source,
                    });
                }
            };

        Ok(self.secure_results(entities).take(limit).collect())
    }

    /// Compose an interactive entity search
    ///
    /// Interactive searches POST a JSON body, support facets, and return
    /// the service's pagination and facet metadata alongside the results.
    /// The result list is filtered and truncated the same way
    /// [`Client::search_entities`] does it.
    ///
    /// # Example
    /// ```no_run
    /// # use navigator_client::{Client, NavigatorConfig};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    /// let config = NavigatorConfig::new("http://localhost:7187/api", "navadmin", "hunter2");
    /// let client = Client::new(config)?;
    /// let response = client
    ///     .search_entities_interactive()
    ///     .query("sales type:*")
    ///     .sources(["hive"])
    ///     .facet_fields(["tags", "type"])
    ///     .limit(50)
    ///     .send()
    ///     .await?;
    /// println!("{} of {:?} results", response.results.len(), response.extra.get("totalMatched"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_entities_interactive(&self) -> InteractiveSearchBuilder<'_> {
        InteractiveSearchBuilder::new(self)
    }

    /// Type-ahead suggestions for a search prefix, `*` when none is given
    ///
    /// The response is returned verbatim.
    pub async fn suggest(&self, prefix: Option<&str>) -> Result<Value> {
        let prefix = prefix.unwrap_or("*");
        let url = format!("{}/interactive/suggestions", self.api_url);
        match exchange_json(self.request(Method::GET, &url).query(&[("query", prefix)])).await {
            Ok(suggestions) => Ok(suggestions),
            Err(source) => {
                error!(%source, prefix, "suggestion lookup failed");
                Err(Error::Suggest {
                    prefix: prefix.to_string(),
                    source,
                })
            }
        }
    }
}

/// Pagination query parameters of the interactive `entities` endpoint.
#[derive(Debug, Serialize)]
struct Pagination {
    limit: usize,
    offset: usize,
}

/// Used to compose an interactive entity search
///
/// Produced by [`Client::search_entities_interactive`] method.
#[derive(Debug)]
pub struct InteractiveSearchBuilder<'c> {
    client: &'c Client,
    query: Option<String>,
    limit: usize,
    offset: usize,
    facet_fields: Vec<String>,
    facet_prefix: Option<String>,
    facet_ranges: Option<Vec<Value>>,
    filter_queries: Vec<String>,
    first_class_entities_only: Option<bool>,
    sources: Vec<String>,
}

impl<'c> InteractiveSearchBuilder<'c> {
    fn new(client: &'c Client) -> Self {
        Self {
            client,
            query: None,
            limit: 100,
            offset: 0,
            facet_fields: Vec::new(),
            facet_prefix: None,
            facet_ranges: None,
            filter_queries: Vec::new(),
            first_class_entities_only: None,
            sources: Vec::new(),
        }
    }

    /// Set the free-text query, same term syntax as
    /// [`Client::search_entities`]
    pub fn query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Truncate the filtered result list to at most `limit` entities
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Offset into the remote result set
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Facet dimensions to aggregate result counts on
    pub fn facet_fields(mut self, fields: impl IntoIterator<Item: Into<String>>) -> Self {
        self.facet_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Prefix that facet values must start with
    pub fn facet_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.facet_prefix = Some(prefix.into());
        self
    }

    /// Range facet definitions, passed through to the service verbatim
    pub fn facet_ranges(mut self, ranges: Vec<Value>) -> Self {
        self.facet_ranges = Some(ranges);
        self
    }

    /// Filter queries of the caller's own, sent ahead of the generated
    /// scoping clauses
    pub fn filter_queries(mut self, queries: impl IntoIterator<Item: Into<String>>) -> Self {
        self.filter_queries = queries.into_iter().map(Into::into).collect();
        self
    }

    /// Restrict the search to first-class entities
    pub fn first_class_entities_only(mut self, only: bool) -> Self {
        self.first_class_entities_only = Some(only);
        self
    }

    /// Source systems that scope the entity-type restriction
    pub fn sources(mut self, sources: impl IntoIterator<Item: Into<String>>) -> Self {
        self.sources = sources.into_iter().map(Into::into).collect();
        self
    }

    /// Send the request to the server
    pub async fn send(self) -> Result<InteractiveSearchResponse> {
        let query_s = self.query.as_deref().unwrap_or("");
        let cluster = self.client.cluster_name();
        let parts = query::build_interactive_query(
            query_s,
            &self.sources,
            self.filter_queries,
            cluster.as_deref(),
        );

        let body = InteractiveSearchRequest {
            query: parts.query,
            facet_fields: self.facet_fields,
            facet_prefix: self.facet_prefix,
            facet_ranges: self.facet_ranges,
            filter_queries: parts.filter_queries,
            first_class_entities_only: self.first_class_entities_only.filter(|only| *only),
        };
        let data = match serde_json::to_string(&body) {
            Ok(data) => data,
            Err(error) => {
                return Err(Error::SearchEntitiesInteractive {
                    body: format!("{body:?}"),
                    source: RequestError::Serialize(error),
                });
            }
        };
        info!(body = %data, "interactive entity search");

        let pagination = Pagination {
            limit: self.client.fetch_size_search_interactive,
            offset: self.offset,
        };
        let url = format!("{}/interactive/entities", self.client.api_url);
        let request = self
            .client
            .request(Method::POST, &url)
            .query(&pagination)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE)
            .body(data.clone());
        let mut response: InteractiveSearchResponse = match exchange_json(request).await {
            Ok(response) => response,
            Err(source) => {
                error!(%source, body = %data, "interactive entity search failed");
                return Err(Error::SearchEntitiesInteractive { body: data, source });
            }
        };

        response.results = self
            .client
            .secure_results(response.results)
            .take(self.limit)
            .collect();

        Ok(response)
    }
}
