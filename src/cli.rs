// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hubstats::config::{ClientConfig, DEFAULT_MAX_PAGES, GITHUB_API_BASE};
use hubstats::report::DEFAULT_AUTHOR_LIMIT;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub repo: String,

    /// Access token; raises the API rate limit (falls back to GITHUB_OAUTH_TOKEN)
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Directory for cached datasets
    #[arg(long, env = "HUBSTATS_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Ignore cached datasets and fetch everything again
    #[arg(long)]
    pub no_cache: bool,

    /// Print rate limit and pagination progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Give up on a paginated dataset after this many non-empty pages
    #[arg(long, default_value_t = DEFAULT_MAX_PAGES)]
    pub max_pages: u32,

    /// GitHub API root
    #[arg(long, default_value = GITHUB_API_BASE)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the terminal charts (default)
    Show {
        /// Contributors shown before grouping the rest as "Others"
        #[arg(long, default_value_t = DEFAULT_AUTHOR_LIMIT)]
        authors: usize,
    },
    /// Fetch every dataset into the cache and print record counts
    Fetch,
    /// Delete every cached dataset for the repository
    ClearCache,
    /// Print a user's public profile
    User {
        /// GitHub login
        login: String,
    },
}

impl Args {
    pub fn client_config(&self) -> ClientConfig {
        let base = ClientConfig::from_env();
        let token = self.token.clone().or_else(|| base.token.clone());
        let mut config = base
            .with_base_url(self.api_url.as_str())
            .with_token(token)
            .use_cache(!self.no_cache)
            .verbose(self.verbose)
            .with_max_pages(self.max_pages);
        if let Some(dir) = &self.cache_dir {
            config = config.with_cache_root(dir);
        }
        config
    }
}
