use std::env;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::{debug, info};

use crate::db::{load_reference_data, ReferenceData};
use crate::error::{Error, Result};

/// Environment variable overriding the dataset location.
pub const DATA_ENV_VAR: &str = "AM4ROUTE_DATA";

/// Default filename for the SQLite dataset inside the data directory.
const DATASET_FILENAME: &str = "am4.db";

/// Resolve the default dataset location using platform-specific project directories.
pub fn default_dataset_path() -> Result<PathBuf> {
    let dirs =
        ProjectDirs::from("com", "am4route", "am4route").ok_or(Error::ProjectDirsUnavailable)?;
    Ok(dirs.data_dir().join(DATASET_FILENAME))
}

/// Resolve where the reference dataset lives.
///
/// Resolution order:
/// 1. Explicit `target` argument when provided.
/// 2. `AM4ROUTE_DATA` environment variable.
/// 3. Platform-specific project data directory.
///
/// The resolved path must exist; it is not created or downloaded.
pub fn resolve_dataset_path(target: Option<&Path>) -> Result<PathBuf> {
    let path = match target {
        Some(explicit) => explicit.to_path_buf(),
        None => match env::var_os(DATA_ENV_VAR) {
            Some(env_path) => PathBuf::from(env_path),
            None => default_dataset_path()?,
        },
    };

    if !path.exists() {
        return Err(Error::DatasetNotFound { path });
    }
    debug!(path = %path.display(), "resolved dataset path");
    Ok(path)
}

/// Load reference data from a CSV directory or a SQLite file.
pub fn load_dataset(path: &Path) -> Result<ReferenceData> {
    let data = if path.is_dir() {
        ReferenceData::from_csv_dir(path)?
    } else {
        load_reference_data(path)?
    };
    info!(
        path = %path.display(),
        airports = data.airport_count(),
        aircraft = data.aircraft_count(),
        routes = data.route_count(),
        "loaded reference data"
    );
    Ok(data)
}
