//! Post-filtering of search results through the authorization boundary.

use std::sync::Arc;

use navigator_authz::{Action, Authorizer, ObjectKey};

use crate::Client;
use crate::models::{Entity, EntityType};

impl Client {
    /// Wrap `results` in a lazy pass that drops entities the acting user
    /// may not view. Entities stream through in their original order, and
    /// the authorization check is only paid for entities actually
    /// consumed. Without an authorizer installed everything passes.
    pub(crate) fn secure_results<I>(&self, results: I) -> Secured<I::IntoIter>
    where
        I: IntoIterator<Item = Entity>,
    {
        let authorizer = self.authorizer.as_ref().map(Arc::clone);
        let server = authorizer
            .as_ref()
            .and_then(|authorizer| authorizer.server_identity());
        Secured {
            inner: results.into_iter(),
            authorizer,
            server,
        }
    }
}

/// Iterator returned by [`Client::secure_results`].
pub(crate) struct Secured<I> {
    inner: I,
    authorizer: Option<Arc<dyn Authorizer>>,
    /// Privilege service identity, resolved once per pass.
    server: Option<String>,
}

impl<I> Iterator for Secured<I>
where
    I: Iterator<Item = Entity>,
{
    type Item = Entity;

    fn next(&mut self) -> Option<Entity> {
        let Some(authorizer) = &self.authorizer else {
            return self.inner.next();
        };
        loop {
            let entity = self.inner.next()?;
            let key = object_key(&entity, self.server.as_deref());
            if authorizer.is_allowed(&key, Action::Select) {
                return Some(entity);
            }
        }
    }
}

/// The authorization key for an entity. Tables map onto the SQL hierarchy;
/// every other kind is outside it and carries an unrestricted key.
fn object_key(entity: &Entity, server: Option<&str>) -> ObjectKey {
    if entity.entity_type.as_deref() == Some(EntityType::Table.as_str()) {
        let table = entity.original_name.clone().unwrap_or_default();
        let db = entity
            .parent_path
            .as_deref()
            .unwrap_or("")
            .trim_matches('/');
        ObjectKey::table(table, db, server.map(str::to_string))
    } else {
        ObjectKey::unrestricted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavigatorConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entity(entity_type: &str, original_name: &str, parent_path: &str) -> Entity {
        Entity {
            entity_type: Some(entity_type.to_string()),
            original_name: Some(original_name.to_string()),
            parent_path: Some(parent_path.to_string()),
            ..Entity::default()
        }
    }

    fn test_client() -> Client {
        Client::new(NavigatorConfig::new(
            "http://localhost:7187/api",
            "navadmin",
            "hunter2",
        ))
        .expect("create client")
    }

    /// Allows the named tables, everything outside the SQL hierarchy, and
    /// nothing else.
    #[derive(Debug)]
    struct TableAllowList {
        tables: Vec<String>,
        checks: AtomicUsize,
    }

    impl TableAllowList {
        fn new(tables: &[&str]) -> Self {
            Self {
                tables: tables.iter().map(|table| table.to_string()).collect(),
                checks: AtomicUsize::new(0),
            }
        }
    }

    impl Authorizer for TableAllowList {
        fn server_identity(&self) -> Option<String> {
            Some("server1".to_string())
        }

        fn is_allowed(&self, key: &ObjectKey, action: Action) -> bool {
            assert_eq!(Action::Select, action);
            self.checks.fetch_add(1, Ordering::Relaxed);
            match &key.table {
                Some(table) => self.tables.contains(table),
                None => true,
            }
        }
    }

    #[test]
    fn without_authorizer_results_pass_through_in_order() {
        let client = test_client();
        let results = vec![
            entity("TABLE", "customers", "/default"),
            entity("DIRECTORY", "logs", "/data"),
        ];

        let secured: Vec<Entity> = client.secure_results(results).collect();
        let names: Vec<_> = secured
            .iter()
            .map(|entity| entity.original_name.as_deref())
            .collect();
        assert_eq!(vec![Some("customers"), Some("logs")], names);
    }

    #[test]
    fn denied_tables_are_dropped_and_order_is_preserved() {
        let client = test_client()
            .with_authorizer(Arc::new(TableAllowList::new(&["customers", "orders"])));
        let results = vec![
            entity("TABLE", "salaries", "/hr"),
            entity("TABLE", "customers", "/default"),
            entity("DIRECTORY", "logs", "/data"),
            entity("TABLE", "orders", "/default"),
        ];

        let secured: Vec<Entity> = client.secure_results(results).collect();
        let names: Vec<_> = secured
            .iter()
            .map(|entity| entity.original_name.as_deref())
            .collect();
        assert_eq!(vec![Some("customers"), Some("logs"), Some("orders")], names);
    }

    #[test]
    fn checks_stop_once_the_limit_is_reached() {
        let authorizer = Arc::new(TableAllowList::new(&["t0", "t1", "t2", "t3", "t4"]));
        let client = test_client().with_authorizer(Arc::<TableAllowList>::clone(&authorizer));
        let results: Vec<Entity> = (0..5)
            .map(|n| entity("TABLE", &format!("t{n}"), "/default"))
            .collect();

        let secured: Vec<Entity> = client.secure_results(results).take(2).collect();
        assert_eq!(2, secured.len());
        assert_eq!(2, authorizer.checks.load(Ordering::Relaxed));
    }

    #[test]
    fn table_keys_carry_table_db_and_server() {
        let key = object_key(&entity("TABLE", "customers", "/default/"), Some("server1"));
        assert_eq!(
            ObjectKey::table("customers", "default", Some("server1".into())),
            key,
        );
    }

    #[test]
    fn non_table_keys_are_unrestricted() {
        let key = object_key(&entity("DIRECTORY", "logs", "/data"), Some("server1"));
        assert_eq!(ObjectKey::unrestricted(), key);
    }

    #[test]
    fn table_key_tolerates_missing_fields() {
        let sparse = Entity {
            entity_type: Some("TABLE".to_string()),
            ..Entity::default()
        };
        assert_eq!(
            ObjectKey::table("", "", None),
            object_key(&sparse, None),
        );
    }
}
