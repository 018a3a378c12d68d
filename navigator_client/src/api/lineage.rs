//! Lineage graph lookup.

use reqwest::Method;
use serde_json::Value;
use tracing::{debug, error};

use crate::{Client, Error, Result, exchange_json};

impl Client {
    /// Fetch the lineage graph for an entity
    ///
    /// The graph is returned as the service sent it. Its shape varies by
    /// entity type and catalog version, so no further decoding happens
    /// here.
    pub async fn get_lineage(&self, entity_id: &str) -> Result<Value> {
        let url = format!("{}/lineage", self.api_url);
        debug!(entity_id, "fetching lineage");
        match exchange_json(self.request(Method::GET, &url).query(&[("entityIds", entity_id)]))
            .await
        {
            Ok(lineage) => Ok(lineage),
            Err(source) => {
                error!(%source, entity_id, "lineage fetch failed");
                Err(Error::GetLineage {
                    entity_id: entity_id.to_string(),
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use mockito::{Matcher, Server};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{Client, Error, NavigatorConfig};

    fn test_client(server: &mockito::ServerGuard) -> Client {
        Client::new(NavigatorConfig::new(server.url(), "navadmin", "hunter2"))
            .expect("create client")
    }

    #[test_log::test(tokio::test)]
    async fn get_lineage_returns_the_graph_verbatim() {
        let graph = json!({
            "entities": [
                {"identity": "t1", "type": "TABLE"},
                {"identity": "op1", "type": "OPERATION"},
            ],
            "relations": [
                {"type": "DATA_FLOW", "sources": ["op1"], "targets": ["t1"]},
            ],
        });

        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v9/lineage")
            .match_query(Matcher::UrlEncoded("entityIds".into(), "t1".into()))
            .with_body(graph.to_string())
            .create_async()
            .await;

        let client = test_client(&server);
        let lineage = client.get_lineage("t1").await.expect("get lineage");
        assert_eq!(graph, lineage);

        mock.assert_async().await;
    }

    #[test_log::test(tokio::test)]
    async fn get_lineage_wraps_service_errors() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v9/lineage")
            .match_query(Matcher::Any)
            .with_status(503)
            .with_body("catalog unavailable")
            .create_async()
            .await;

        let client = test_client(&server);
        let error = client.get_lineage("t1").await.expect_err("must fail");
        assert!(matches!(error, Error::GetLineage { .. }), "got {error:?}");
        assert!(
            error
                .to_string()
                .starts_with("failed to get lineage for entity ID t1:")
        );

        mock.assert_async().await;
    }
}
