//! Catalog entity model.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single cataloged object.
///
/// Only the fields this client reads or writes are typed. Everything else
/// the service returns is kept verbatim in [`Entity::extra`], so an entity
/// fetched with [`Client::get_entity`][crate::Client::get_entity] survives a
/// read-modify-write cycle without losing fields this client does not know
/// about.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    /// Stable identifier assigned by the catalog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    /// Entity kind, e.g. `TABLE` or `DIRECTORY`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    /// Name of the object in the origin system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Description of the object in the origin system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_description: Option<String>,
    /// User-editable display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// User-editable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Path of the containing object, e.g. `/default` for a Hive table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_path: Option<String>,
    /// Absolute filesystem path for HDFS-backed entities.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_system_path: Option<String>,
    /// Origin system, e.g. `HIVE` or `HDFS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    /// Catalog-internal kind name, e.g. `hv_table`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    /// Cluster the origin system runs on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster_name: Option<String>,
    /// Whether the object has been deleted in the origin system.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    /// User-assigned tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// User-assigned key/value properties.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, String>>,
    /// Remaining catalog fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The metadata fields replaced by
/// [`Client::update_entity`][crate::Client::update_entity].
///
/// Unset fields are left out of the request body entirely, so the service
/// keeps their current values.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityUpdate {
    /// Replacement tag list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Replacement property map.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<HashMap<String, String>>,
    /// Replacement display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Any other writable fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityUpdate {
    /// An update that replaces only the tag list.
    pub fn tags(tags: Vec<String>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }

    /// An update that replaces only the property map.
    pub fn properties(properties: HashMap<String, String>) -> Self {
        Self {
            properties: Some(properties),
            ..Self::default()
        }
    }
}

/// Entity kind is the type of object a catalog entry describes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EntityType {
    /// A SQL database.
    Database,
    /// A SQL table.
    Table,
    /// A partition of a SQL table.
    Partition,
    /// A single column of a SQL table.
    Field,
    /// A file on a distributed filesystem.
    File,
    /// A SQL view.
    View,
    /// An S3 bucket.
    S3Bucket,
    /// A recorded operation, such as a query execution.
    Operation,
    /// A directory on a distributed filesystem.
    Directory,
}

impl EntityType {
    /// Name of the kind as the catalog spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "DATABASE",
            Self::Table => "TABLE",
            Self::Partition => "PARTITION",
            Self::Field => "FIELD",
            Self::File => "FILE",
            Self::View => "VIEW",
            Self::S3Bucket => "S3BUCKET",
            Self::Operation => "OPERATION",
            Self::Directory => "DIRECTORY",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin system of a cataloged object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SourceType {
    /// The Hive metastore.
    Hive,
    /// The Impala daemon.
    Impala,
    /// A distributed filesystem.
    Hdfs,
    /// An S3-compatible object store.
    S3,
    /// The YARN resource manager.
    Yarn,
    /// The Oozie workflow scheduler.
    Oozie,
    /// The Spark execution engine.
    Spark,
}

impl SourceType {
    /// Name of the origin system as the catalog spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hive => "HIVE",
            Self::Impala => "IMPALA",
            Self::Hdfs => "HDFS",
            Self::S3 => "S3",
            Self::Yarn => "YARN",
            Self::Oozie => "OOZIE",
            Self::Spark => "SPARK",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
