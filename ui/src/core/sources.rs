//! Locations of the two source files and the shared "read or report absent" step.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::LoadError;

pub const DEFAULT_CSV: &str = "data.csv";
pub const DEFAULT_JSON: &str = "data.json";

/// Directory holding both source files.
pub const ENV_DATA_DIR: &str = "STATLAB_DATA_DIR";
/// Explicit path to the survey responses file.
pub const ENV_CSV: &str = "STATLAB_CSV";
/// Explicit path to the state records file.
pub const ENV_JSON: &str = "STATLAB_JSON";

/// Where the dashboard reads its data from. Paths are relative to the
/// working directory unless configured otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSources {
    pub csv_path: PathBuf,
    pub json_path: PathBuf,
}

impl Default for DataSources {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from(DEFAULT_CSV),
            json_path: PathBuf::from(DEFAULT_JSON),
        }
    }
}

impl DataSources {
    /// Both files inside `dir`, under their default names.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            csv_path: dir.join(DEFAULT_CSV),
            json_path: dir.join(DEFAULT_JSON),
        }
    }

    /// Resolve paths from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve paths through an arbitrary variable lookup. Per-file
    /// overrides win over the data directory.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut sources = match non_blank(ENV_DATA_DIR) {
            Some(dir) => Self::in_dir(dir),
            None => Self::default(),
        };
        if let Some(csv) = non_blank(ENV_CSV) {
            sources.csv_path = PathBuf::from(csv);
        }
        if let Some(json) = non_blank(ENV_JSON) {
            sources.json_path = PathBuf::from(json);
        }
        sources
    }
}

/// Read a source file. `Ok(None)` means the file is absent or zero bytes,
/// which callers treat identically.
pub(crate) fn read_source(path: &Path) -> Result<Option<String>, LoadError> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => {
            debug!(path = %path.display(), "source file absent");
            return Ok(None);
        }
    };
    if metadata.len() == 0 {
        debug!(path = %path.display(), "source file empty");
        return Ok(None);
    }

    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })
}
