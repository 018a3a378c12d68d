//! Construction of the catalog's filter-query strings.
//!
//! The service parses a Solr edismax dialect. These helpers translate
//! free-text input and structured lookups into it, term by term: a bare
//! term matches a whitelist of searchable fields, a `field:value` term
//! filters on that field, and a `type:<kind>` term both filters and widens
//! the entity-type restriction derived from the caller's sources.
//!
//! The grammar is whitespace sensitive and the joiners below are
//! reproduced byte for byte as the service has always received them,
//! uneven spacing included.

use crate::models::EntityType;

/// Fields a bare search term is matched against.
const SEARCH_FIELDS: &[&str] = &[
    "originalName",
    "originalDescription",
    "name",
    "description",
    "tags",
];

/// Every entity kind the service indexes, in wire order.
const ALL_ENTITY_TYPES: &[EntityType] = &[
    EntityType::Database,
    EntityType::Table,
    EntityType::Partition,
    EntityType::Field,
    EntityType::File,
    EntityType::View,
    EntityType::S3Bucket,
    EntityType::Operation,
    EntityType::Directory,
];

const SQL_ENTITY_TYPES: &[EntityType] = &[
    EntityType::Table,
    EntityType::View,
    EntityType::Database,
    EntityType::Partition,
    EntityType::Field,
];

const SQL_DEFAULT_ENTITY_TYPES: &[EntityType] = &[EntityType::Table, EntityType::View];

const HDFS_ENTITY_TYPES: &[EntityType] = &[EntityType::File, EntityType::Directory];

const S3_ENTITY_TYPES: &[EntityType] = &[
    EntityType::File,
    EntityType::Directory,
    EntityType::S3Bucket,
];

const S3_DEFAULT_ENTITY_TYPES: &[EntityType] = &[EntityType::Directory, EntityType::S3Bucket];

/// The entity-type restriction a `sources` filter implies: the default
/// subset searched when no `type:` term names one, and the full set a
/// `type:` term may widen the search to.
pub(crate) fn entity_types_for_sources(
    sources: &[String],
) -> (&'static [EntityType], &'static [EntityType]) {
    let has = |name: &str| sources.iter().any(|source| source == name);
    if has("sql") || has("hive") || has("impala") {
        (SQL_DEFAULT_ENTITY_TYPES, SQL_ENTITY_TYPES)
    } else if has("hdfs") {
        (HDFS_ENTITY_TYPES, HDFS_ENTITY_TYPES)
    } else if has("s3") {
        (S3_DEFAULT_ENTITY_TYPES, S3_ENTITY_TYPES)
    } else {
        (ALL_ENTITY_TYPES, ALL_ENTITY_TYPES)
    }
}

/// Translate a free-text query into the filter-query string sent to the
/// batch `entities` endpoint.
pub(crate) fn build_search_query(
    query_s: &str,
    sources: &[String],
    cluster_name: Option<&str>,
) -> String {
    let (mut restriction, full_types) = entity_types_for_sources(sources);

    let mut query_clauses: Vec<String> = Vec::new();
    let mut user_filters: Vec<String> = Vec::new();

    for term in query_s.split_whitespace() {
        match term.split_once(':') {
            None => {
                let fielded: Vec<String> = SEARCH_FIELDS
                    .iter()
                    .map(|field| format!("({field}:*{term}*)"))
                    .collect();
                query_clauses.push(fielded.join("OR"));
            }
            Some((name, value)) if !value.is_empty() => {
                let filter = if name == "type" {
                    // A type term widens the restriction to the full set.
                    restriction = full_types;
                    format!("type:{}", value.to_uppercase().trim_matches('*'))
                } else {
                    term.to_string()
                };
                // Manual filters match by prefix, e.g. type:VIE.
                user_filters.push(format!("{filter}*"));
            }
            // A term with an empty value contributes nothing.
            Some(_) => {}
        }
    }

    let text_clause = if query_clauses.is_empty() {
        "*".to_string()
    } else {
        query_clauses
            .iter()
            .map(|clause| format!("({clause})"))
            .collect::<Vec<_>>()
            .join("OR")
    };

    let user_filter_clause = if user_filters.is_empty() {
        "*".to_string()
    } else {
        user_filters
            .iter()
            .map(|filter| format!("({filter})"))
            .collect::<Vec<_>>()
            .join("OR ")
    };

    let type_clause = restriction
        .iter()
        .map(|entity_type| format!("(type:{entity_type})"))
        .collect::<Vec<_>>()
        .join("OR");

    let mut filter_query = format!("{text_clause} AND ({user_filter_clause}) AND ({type_clause})");

    if sources.iter().any(|source| source == "s3") {
        filter_query.push_str(" AND (sourceType:s3)");
    }
    if let Some(name) = cluster_name {
        // Note: no separating space before the AND.
        filter_query.push_str(&format!("AND clusterName:{name}"));
    }

    filter_query
}

/// The translated form of an interactive query: the plain-text body query
/// plus the filter queries its terms and scoping contribute.
#[derive(Debug, PartialEq)]
pub(crate) struct InteractiveQuery {
    pub(crate) query: String,
    pub(crate) filter_queries: Vec<String>,
}

/// Translate an interactive query. The caller's own `filter_queries` come
/// first, then per-term filters, then the tagged type restriction, then
/// the cluster clause.
pub(crate) fn build_interactive_query(
    query_s: &str,
    sources: &[String],
    filter_queries: Vec<String>,
    cluster_name: Option<&str>,
) -> InteractiveQuery {
    let mut filter_queries = filter_queries;
    let mut full_types: &[EntityType] = &[];
    let mut fq_type: &[EntityType] = &[];

    if !sources.is_empty() {
        let (default_types, full) = entity_types_for_sources(sources);
        full_types = full;

        let has = |name: &str| sources.iter().any(|source| source == name);
        if has("hive") || has("impala") {
            fq_type = default_types;
        } else if has("hdfs") {
            fq_type = full_types;
        } else if has("s3") {
            fq_type = default_types;
            filter_queries.push("sourceType:s3".to_string());
        }

        // A trailing type:* lists every kind the sources have.
        if query_s.trim().ends_with("type:*") {
            fq_type = full_types;
        }
    }

    let mut query_terms: Vec<&str> = Vec::new();
    for term in query_s.split_whitespace() {
        match term.split_once(':') {
            None => query_terms.push(term),
            Some((name, value)) if !value.is_empty() => {
                let filter = if name == "type" {
                    fq_type = full_types;
                    format!("type:{}", value.to_uppercase())
                } else {
                    term.to_string()
                };
                filter_queries.push(filter);
            }
            Some(_) => {}
        }
    }

    let query = if query_terms.is_empty() {
        "*".to_string()
    } else {
        query_terms.join(" ")
    };

    if !fq_type.is_empty() {
        let types = fq_type
            .iter()
            .map(|entity_type| format!("type:{entity_type}"))
            .collect::<Vec<_>>()
            .join(" OR ");
        filter_queries.push(format!("{{!tag=type}} {types}"));
    }
    if let Some(name) = cluster_name {
        filter_queries.push(format!("clusterName:{name}"));
    }

    InteractiveQuery {
        query,
        filter_queries,
    }
}

/// Decompose a filesystem path into its base name and the full path with
/// `/` escaped for the query grammar.
pub(crate) fn clean_path(path: &str) -> (String, String) {
    let trimmed = path.trim_end_matches('/');
    let name = trimmed.rsplit('/').next().unwrap_or("").to_string();
    (name, trimmed.replace('/', "\\/"))
}
