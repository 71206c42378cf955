// Cache path utilities.
// Builds the `{root}/{owner}/{repo}/{dataset}.tsv` hierarchy.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::records::Dataset;

/// Extension of dataset files.
pub const TABLE_EXTENSION: &str = "tsv";

/// Platform cache directory (~/.cache/hubstats on Linux), or `./data` when
/// no home directory can be determined.
pub fn default_cache_root() -> PathBuf {
    ProjectDirs::from("", "", "hubstats")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("data"))
}

/// Directory holding every dataset of one repository.
pub fn repo_dir(root: &Path, owner: &str, repo: &str) -> PathBuf {
    root.join(sanitize_name(owner)).join(sanitize_name(repo))
}

/// File holding one dataset inside a repository directory.
pub fn dataset_path(repo_dir: &Path, dataset: Dataset) -> PathBuf {
    repo_dir.join(format!("{}.{}", dataset.file_stem(), TABLE_EXTENSION))
}

/// Sanitize a name for use as a single path segment.
/// Replaces problematic characters with underscores.
fn sanitize_name(name: &str) -> String {
    if name.is_empty() || name == "." || name == ".." {
        return "_".repeat(name.len().max(1));
    }

    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
