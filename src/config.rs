// Client configuration.
// Collects the API endpoint, credentials, cache location, and fetch limits in one place.

use std::path::PathBuf;

use crate::cache;

pub const GITHUB_API_BASE: &str = "https://api.github.com";

/// Environment variables consulted for an access token, in priority order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["GITHUB_TOKEN", "GITHUB_OAUTH_TOKEN"];

/// Page size requested from paginated endpoints (the API maximum).
pub const DEFAULT_PER_PAGE: u32 = 100;

/// Upper bound on pages fetched for a single paginated dataset.
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Settings for a [`crate::RepoClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, without a trailing slash.
    pub base_url: String,
    /// Directory under which `{owner}/{repo}` cache folders are created.
    pub cache_root: PathBuf,
    /// Access token sent as `Authorization: token ...` when present.
    pub token: Option<String>,
    /// Serve datasets from disk when their cache files exist.
    pub use_cache: bool,
    /// Emit progress through the configured sink.
    pub verbose: bool,
    pub per_page: u32,
    pub max_pages: u32,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: GITHUB_API_BASE.to_string(),
            cache_root: cache::default_cache_root(),
            token: None,
            use_cache: true,
            verbose: false,
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            user_agent: concat!("hubstats/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration with the token taken from the environment.
    pub fn from_env() -> Self {
        Self {
            token: token_from_env(),
            ..Self::default()
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn use_cache(mut self, use_cache: bool) -> Self {
        self.use_cache = use_cache;
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }
}

/// Read the first non-empty token variable from the environment.
pub fn token_from_env() -> Option<String> {
    token_from_lookup(|name| std::env::var(name).ok())
}

/// First non-empty value of [`TOKEN_ENV_VARS`] according to `lookup`.
pub fn token_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|value| !value.trim().is_empty())
}
