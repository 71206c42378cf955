// hubstats library.
// Fetches GitHub repository statistics, caches them as tables, and charts them.

pub mod app;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod progress;
pub mod records;
pub mod report;
pub mod repo_client;
mod ui;

pub use config::ClientConfig;
pub use error::{HubError, Result};
pub use repo_client::{Contributions, RepoClient};
