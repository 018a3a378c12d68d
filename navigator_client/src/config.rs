//! Connection settings for the catalog client.

use secrecy::Secret;

/// Number of results fetched from the service per batch search, unless
/// overridden. The caller's `limit` applies after authorization
/// filtering, to the fetched set.
pub const DEFAULT_FETCH_SIZE_SEARCH: usize = 450;

/// Number of results fetched from the service per interactive search,
/// unless overridden.
pub const DEFAULT_FETCH_SIZE_SEARCH_INTERACTIVE: usize = 450;

/// Connection settings for a [`Client`](crate::Client).
///
/// # Example
/// ```
/// use navigator_client::NavigatorConfig;
///
/// let config = NavigatorConfig::new("http://nav.example.com:7187/api", "navadmin", "hunter2")
///     .with_fetch_size_search(1000);
/// assert_eq!(1000, config.fetch_size_search);
/// ```
#[derive(Clone, Debug)]
pub struct NavigatorConfig {
    /// Base URL of the catalog API, without the version segment.
    pub api_url: String,
    /// User for HTTP basic authentication.
    pub username: String,
    /// Password for HTTP basic authentication.
    pub password: Secret<String>,
    /// Remote fetch size for batch entity searches.
    pub fetch_size_search: usize,
    /// Remote fetch size for interactive entity searches.
    pub fetch_size_search_interactive: usize,
}

impl NavigatorConfig {
    /// Create a configuration with the default fetch sizes.
    pub fn new(
        api_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            username: username.into(),
            password: Secret::new(password.into()),
            fetch_size_search: DEFAULT_FETCH_SIZE_SEARCH,
            fetch_size_search_interactive: DEFAULT_FETCH_SIZE_SEARCH_INTERACTIVE,
        }
    }

    /// Override the batch-search fetch size.
    pub fn with_fetch_size_search(mut self, fetch_size: usize) -> Self {
        self.fetch_size_search = fetch_size;
        self
    }

    /// Override the interactive-search fetch size.
    pub fn with_fetch_size_search_interactive(mut self, fetch_size: usize) -> Self {
        self.fetch_size_search_interactive = fetch_size;
        self
    }
}
