//! Database path preconditions.

use std::path::Path;

use dashbrr_core::{Error, Result};

/// Create the parent directory if needed and refuse paths that are directories.
pub(crate) async fn prepare_database_path(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Err(Error::database_error(format!(
            "Database path is a directory: {}",
            path.display()
        )));
    }

    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::io_error(format!(
                    "Failed to create database directory {}: {e}",
                    parent.display()
                ))
            })
        }
        _ => Ok(()),
    }
}
