use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

/// Default directory holding the local snapshot file.
const DEFAULT_DATA_DIR: &str = "./data";

/// Default simulated latency for local calls, matching a remote round trip.
const DEFAULT_LOCAL_LATENCY_MS: u64 = 300;

/// Which store is bound for the lifetime of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    Local { data_dir: PathBuf, latency: Duration },
    Remote { url: String, key: String },
}

/// Reported store mode (e.g. on the health endpoint).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    Local,
    Remote,
}

impl StoreConfig {
    /// Load the store selection from environment variables.
    ///
    /// | Env Var                  | Default   |
    /// |--------------------------|-----------|
    /// | `CONDO_REMOTE_URL`       | --        |
    /// | `CONDO_REMOTE_KEY`       | --        |
    /// | `CONDO_DATA_DIR`         | `./data`  |
    /// | `CONDO_LOCAL_LATENCY_MS` | `300`     |
    ///
    /// The remote store is chosen only when both remote variables are set
    /// and non-empty.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let (Some(url), Some(key)) = (non_empty("CONDO_REMOTE_URL"), non_empty("CONDO_REMOTE_KEY")) {
            return Self::Remote {
                url: url.trim_end_matches('/').to_string(),
                key,
            };
        }

        let data_dir = non_empty("CONDO_DATA_DIR")
            .unwrap_or_else(|| DEFAULT_DATA_DIR.into())
            .into();
        let latency_ms: u64 = non_empty("CONDO_LOCAL_LATENCY_MS")
            .unwrap_or_else(|| DEFAULT_LOCAL_LATENCY_MS.to_string())
            .parse()
            .expect("CONDO_LOCAL_LATENCY_MS must be a valid u64");

        Self::Local {
            data_dir,
            latency: Duration::from_millis(latency_ms),
        }
    }

    pub fn mode(&self) -> StoreMode {
        match self {
            Self::Local { .. } => StoreMode::Local,
            Self::Remote { .. } => StoreMode::Remote,
        }
    }
}
