//! Authorization boundary for catalog search results.
//!
//! The catalog indexes metadata about objects whose data access is governed
//! elsewhere, so search results have to be filtered before they are shown to
//! the acting user. This crate defines the key schema and the [`Authorizer`]
//! trait that the catalog client calls through; the allow/deny policy itself
//! lives with the implementation, typically a client to the SQL privilege
//! service.

mod object;
pub use object::{Action, ObjectKey};

/// Decides whether the acting user may perform an action on an object.
///
/// Implementations are bound to the acting user at construction time. The
/// catalog client invokes [`Authorizer::is_allowed`] once per consumed search
/// result, so implementations should answer from cached privilege state
/// rather than a per-call network round trip.
pub trait Authorizer: std::fmt::Debug + Send + Sync {
    /// Identity of the SQL privilege service instance that governs
    /// table-level objects, when one is configured.
    fn server_identity(&self) -> Option<String> {
        None
    }

    /// Whether `action` is allowed on the object described by `key`.
    fn is_allowed(&self, key: &ObjectKey, action: Action) -> bool;
}

impl<T: AsRef<dyn Authorizer> + std::fmt::Debug + Send + Sync> Authorizer for T {
    fn server_identity(&self) -> Option<String> {
        self.as_ref().server_identity()
    }

    fn is_allowed(&self, key: &ObjectKey, action: Action) -> bool {
        self.as_ref().is_allowed(key, action)
    }
}
