//! Optional `rop.json` placed next to the executable.
//!
//! Every key has a default, so a missing file is the same as `{}`. Relative
//! paths are resolved against the executable's directory, never the working
//! directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{
    artifacts::ArtifactPaths,
    error::{Result, RopErr},
};

pub const CONFIG_FILE: &str = "rop.json";
pub const DEFAULT_MODEL_FILE: &str = "rop_model.json";
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";
pub const DEFAULT_LOG_FILE: &str = "rop-predictor.log";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    pub model_path: PathBuf,
    pub scaler_path: PathBuf,
    /// `null` disables logging.
    pub log_file: Option<PathBuf>,
    /// `env_logger` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// The file these settings were read from; `None` when the defaults apply.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_FILE),
            scaler_path: PathBuf::from(DEFAULT_SCALER_FILE),
            log_file: Some(PathBuf::from(DEFAULT_LOG_FILE)),
            log_filter: "info".to_string(),
            source: None,
        }
    }
}

impl PredictorConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| RopErr::Parse {
            artifact: "config",
            source,
        })
    }

    /// Reads `dir/rop.json`, falling back to the defaults when it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let json = std::fs::read_to_string(&path).map_err(|source| RopErr::Io {
            path: path.clone(),
            source,
        })?;
        Ok(Self {
            source: Some(path),
            ..Self::from_json(&json)?
        })
    }

    pub fn artifact_paths(&self, base: &Path) -> ArtifactPaths {
        ArtifactPaths {
            model: resolve(base, &self.model_path),
            scaler: resolve(base, &self.scaler_path),
        }
    }

    pub fn log_path(&self, base: &Path) -> Option<PathBuf> {
        self.log_file.as_deref().map(|p| resolve(base, p))
    }
}

/// Directory containing the running executable.
pub fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().map_err(|source| RopErr::Io {
        path: PathBuf::from("<current executable>"),
        source,
    })?;

    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
