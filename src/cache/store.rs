// Cache store for reading and writing dataset tables.
// Tab-delimited UTF-8 with a header row and a leading row-index column.

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{HubError, Result};
use crate::records::Record;

const DELIMITER: u8 = b'\t';

/// Write `rows` to `path`, replacing any existing file.
pub fn write_table<R: Record>(path: &Path, rows: &[R]) -> Result<()> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    {
        let mut writer = WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .from_path(&temp_path)?;

        writer.write_record(std::iter::once("").chain(R::COLUMNS.iter().copied()))?;
        for (index, row) in rows.iter().enumerate() {
            writer.serialize((index, row))?;
        }
        writer.flush()?;
    }
    fs::rename(&temp_path, path)?;

    tracing::debug!(path = %path.display(), rows = rows.len(), "wrote cache table");
    Ok(())
}

/// Read a table written by [`write_table`]. Returns `None` if the file is absent.
pub fn read_table<R: Record>(path: &Path) -> Result<Option<Vec<R>>> {
    if !exists(path) {
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(true)
        .from_path(path)?;

    let columns: StringRecord = reader.headers()?.iter().skip(1).collect();
    check_columns::<R>(path, &columns)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let fields: StringRecord = record?.iter().skip(1).collect();
        rows.push(fields.deserialize(Some(&columns))?);
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read cache table");
    Ok(Some(rows))
}

fn check_columns<R: Record>(path: &Path, columns: &StringRecord) -> Result<()> {
    if columns.iter().eq(R::COLUMNS.iter().copied()) {
        return Ok(());
    }

    Err(HubError::CacheSchema {
        path: path.to_path_buf(),
        expected: R::COLUMNS.join(", "),
        found: columns.iter().collect::<Vec<_>>().join(", "),
    })
}

/// Check if a cache file exists.
pub fn exists(path: &Path) -> bool {
    path.is_file()
}

/// Delete a directory and all contents, then recreate it empty.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    fs::create_dir_all(path)?;
    Ok(())
}
