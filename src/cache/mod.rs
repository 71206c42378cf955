// Cache module for local filesystem caching.
// Stores fetched datasets as tab-delimited tables, one directory per repository.

pub mod paths;
pub mod store;

pub use paths::{dataset_path, default_cache_root, repo_dir};
pub use store::{exists, read_table, reset_dir, write_table};
