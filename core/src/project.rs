//! Project root lookup.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// File marking the root of a project.
pub const MANIFEST_FILE: &str = "Cargo.toml";

#[derive(Debug, Error)]
pub enum ProjectRootError {
    #[error("Cargo.toml not found in {} or its parent directories", .0.display())]
    NotFound(PathBuf),
    #[error("cannot stat {}: {source}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Returns the closest directory, starting with `start` itself, that contains
/// a `Cargo.toml` file.
///
/// Typical use is locating test fixtures from `env!("CARGO_MANIFEST_DIR")`
/// or from the current directory.
pub fn find_project_root(start: &Path) -> Result<PathBuf, ProjectRootError> {
    for dir in start.ancestors() {
        let manifest = dir.join(MANIFEST_FILE);

        let found = manifest
            .try_exists()
            .map_err(|source| ProjectRootError::Stat {
                path: manifest.clone(),
                source,
            })?;

        if found {
            debug!(root = %dir.display(), "Found project root");
            return Ok(dir.to_path_buf());
        }
    }

    Err(ProjectRootError::NotFound(start.to_path_buf()))
}
