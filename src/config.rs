use std::fmt;
use std::path::PathBuf;

/// Canonical location of the passenger list.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/leontoddjohnson/datasets/main/data/titanic.csv";

/// Overrides [`DEFAULT_DATASET_URL`] with another URL or a local path.
pub const DATASET_ENV_VAR: &str = "TITANIC_DATASET";

// ---------------------------------------------------------------------------
// Dataset source
// ---------------------------------------------------------------------------

/// Where the passenger table is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    /// CSV fetched over HTTP(S).
    Remote(String),
    /// A local `.csv`, `.json` or `.parquet` copy.
    Local(PathBuf),
}

impl Default for DatasetSource {
    fn default() -> Self {
        DatasetSource::Remote(DEFAULT_DATASET_URL.to_string())
    }
}

impl DatasetSource {
    /// Interpret a user-supplied location: anything with an http(s) scheme is
    /// fetched, everything else is a file path.
    pub fn parse(location: &str) -> Self {
        let location = location.trim();
        if location.starts_with("http://") || location.starts_with("https://") {
            DatasetSource::Remote(location.to_string())
        } else {
            DatasetSource::Local(PathBuf::from(location))
        }
    }

    /// Read the source from [`DATASET_ENV_VAR`], falling back to the default URL.
    pub fn from_env() -> Self {
        match std::env::var(DATASET_ENV_VAR) {
            Ok(value) if !value.trim().is_empty() => Self::parse(&value),
            _ => Self::default(),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetSource::Remote(url) => write!(f, "{url}"),
            DatasetSource::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard window
// ---------------------------------------------------------------------------

/// Window geometry for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashboardConfig {
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            inner_size: [1200.0, 800.0],
            min_inner_size: [600.0, 400.0],
        }
    }
}
