//! Entity lookup and metadata mutation operations.

use std::collections::HashMap;

use indexmap::IndexMap;
use reqwest::Method;
use tracing::{debug, error};

use crate::api::EntitiesQuery;
use crate::models::{Entity, EntityType, EntityUpdate, SourceType};
use crate::{Client, Error, Result, exchange_json, query};

impl Client {
    /// Look up exactly one entity by structured filters
    ///
    /// The fixed filters (`sourceType`, `type`, `originalName`, and
    /// `deleted:false`, plus the cluster clause when a resolver is
    /// installed) always apply; caller `filters` are appended after them
    /// and cannot override them. Errors if no entity or more than one
    /// entity matches.
    pub async fn find_entity(
        &self,
        source_type: SourceType,
        entity_type: EntityType,
        name: &str,
        filters: &[(&str, &str)],
    ) -> Result<Entity> {
        let mut query_filters: IndexMap<String, String> = IndexMap::new();
        query_filters.insert("sourceType".to_string(), source_type.to_string());
        query_filters.insert("type".to_string(), entity_type.to_string());
        query_filters.insert("originalName".to_string(), name.to_string());
        query_filters.insert("deleted".to_string(), "false".to_string());
        if let Some(cluster) = self.cluster_name() {
            query_filters.insert("clusterName".to_string(), cluster);
        }
        for (key, value) in filters {
            query_filters
                .entry(key.to_string())
                .or_insert_with(|| value.to_string());
        }

        let filter_query = query_filters
            .iter()
            .map(|(key, value)| format!("({key}:{value})"))
            .collect::<Vec<_>>()
            .join("AND");
        // Limit 2 so a second match is visible without fetching them all.
        let params = EntitiesQuery {
            query: &filter_query,
            offset: 0,
            limit: 2,
        };
        debug!(query = %filter_query, "finding entity");

        let url = format!("{}/entities", self.api_url);
        let entities: Vec<Entity> =
            match exchange_json(self.request(Method::GET, &url).query(&params)).await {
                Ok(entities) => entities,
                Err(source) => {
                    error!(%source, query = %filter_query, "entity lookup failed");
                    return Err(Error::FindEntity { source });
                }
            };

        let mut entities = entities.into_iter();
        match (entities.next(), entities.next()) {
            (Some(entity), None) => Ok(entity),
            (None, _) => Err(Error::EntityNotFound {
                filters: format!("{query_filters:?}"),
            }),
            (Some(_), Some(_)) => Err(Error::EntityAmbiguous {
                filters: format!("{query_filters:?}"),
            }),
        }
    }

    /// Look up a Hive database by name
    pub async fn get_database(&self, name: &str) -> Result<Entity> {
        self.find_entity(SourceType::Hive, EntityType::Database, name, &[])
            .await
    }

    /// Look up a Hive table by database and table name
    pub async fn get_table(&self, database_name: &str, table_name: &str) -> Result<Entity> {
        let parent_path = format!("\\/{database_name}");
        self.find_entity(
            SourceType::Hive,
            EntityType::Table,
            table_name,
            &[("parentPath", &parent_path)],
        )
        .await
    }

    /// Look up a single column of a Hive table
    pub async fn get_field(
        &self,
        database_name: &str,
        table_name: &str,
        field_name: &str,
    ) -> Result<Entity> {
        let parent_path = format!("\\/{database_name}\\/{table_name}");
        self.find_entity(
            SourceType::Hive,
            EntityType::Field,
            field_name,
            &[("parentPath", &parent_path)],
        )
        .await
    }

    /// Partition lookup, which the catalog's query surface does not support
    pub async fn get_partition(
        &self,
        _database_name: &str,
        _table_name: &str,
        _partition_spec: &str,
    ) -> Result<Entity> {
        Err(Error::Unimplemented {
            operation: "partition lookup",
        })
    }

    /// Look up an HDFS directory by absolute path
    pub async fn get_directory(&self, path: &str) -> Result<Entity> {
        let (name, file_system_path) = query::clean_path(path);
        self.find_entity(
            SourceType::Hdfs,
            EntityType::Directory,
            &name,
            &[("fileSystemPath", &file_system_path)],
        )
        .await
    }

    /// Look up an HDFS file by absolute path
    pub async fn get_file(&self, path: &str) -> Result<Entity> {
        let (name, file_system_path) = query::clean_path(path);
        self.find_entity(
            SourceType::Hdfs,
            EntityType::File,
            &name,
            &[("fileSystemPath", &file_system_path)],
        )
        .await
    }

    /// Fetch a single entity by its catalog id
    pub async fn get_entity(&self, entity_id: &str) -> Result<Entity> {
        let url = format!("{}/entities/{entity_id}", self.api_url);
        match exchange_json(self.request(Method::GET, &url)).await {
            Ok(entity) => Ok(entity),
            Err(source) => {
                error!(%source, entity_id, "entity fetch failed");
                Err(Error::GetEntity {
                    entity_id: entity_id.to_string(),
                    source,
                })
            }
        }
    }

    /// Replace the supplied metadata fields of an entity
    ///
    /// Only the fields set on `update` are sent, so the service keeps the
    /// rest. Concurrent writers race on whole fields; the last write to a
    /// field wins.
    pub async fn update_entity(&self, entity_id: &str, update: &EntityUpdate) -> Result<Entity> {
        let url = format!("{}/entities/{entity_id}", self.api_url);
        debug!(entity_id, "updating entity");
        match exchange_json(self.request(Method::PUT, &url).json(update)).await {
            Ok(entity) => Ok(entity),
            Err(source) => {
                error!(%source, entity_id, "entity update failed");
                Err(Error::UpdateEntity {
                    entity_id: entity_id.to_string(),
                    source,
                })
            }
        }
    }

    /// Append `tags` to an entity, duplicates included
    pub async fn add_tags(&self, entity_id: &str, tags: &[String]) -> Result<Entity> {
        let entity = self.get_entity(entity_id).await?;
        let mut new_tags = entity.tags.unwrap_or_default();
        new_tags.extend(tags.iter().cloned());
        self.update_entity(entity_id, &EntityUpdate::tags(new_tags))
            .await
    }

    /// Remove the first occurrence of each of `tags` from an entity
    pub async fn delete_tags(&self, entity_id: &str, tags: &[String]) -> Result<Entity> {
        let entity = self.get_entity(entity_id).await?;
        let mut new_tags = entity.tags.unwrap_or_default();
        for tag in tags {
            if let Some(position) = new_tags.iter().position(|existing| existing == tag) {
                new_tags.remove(position);
            }
        }
        self.update_entity(entity_id, &EntityUpdate::tags(new_tags))
            .await
    }

    /// Merge `properties` into an entity's property map, overwriting
    /// existing keys on collision
    pub async fn update_properties(
        &self,
        entity_id: &str,
        properties: HashMap<String, String>,
    ) -> Result<Entity> {
        let entity = self.get_entity(entity_id).await?;
        let mut new_properties = entity.properties.unwrap_or_default();
        new_properties.extend(properties);
        self.update_entity(entity_id, &EntityUpdate::properties(new_properties))
            .await
    }

    /// Remove the named keys from an entity's property map
    pub async fn delete_properties(
        &self,
        entity_id: &str,
        property_keys: &[String],
    ) -> Result<Entity> {
        let entity = self.get_entity(entity_id).await?;
        let mut new_properties = entity.properties.unwrap_or_default();
        for key in property_keys {
            new_properties.remove(key);
        }
        self.update_entity(entity_id, &EntityUpdate::properties(new_properties))
            .await
    }
}
