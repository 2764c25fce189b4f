use std::path::{Path, PathBuf};

use crate::{
    config::{DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE},
    error::{Result, RopErr},
    model::BoostedForest,
    pipeline::{Pipeline, RopPipeline},
    scaler::FittedScaler,
};

/// Where the two startup artifacts live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// The default file names inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            model: dir.join(DEFAULT_MODEL_FILE),
            scaler: dir.join(DEFAULT_SCALER_FILE),
        }
    }
}

/// The model and scaler, loaded once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub model: BoostedForest,
    pub scaler: FittedScaler,
}

impl Artifacts {
    /// Loads both artifacts.
    ///
    /// Both paths are checked before either file is parsed, so a missing
    /// artifact is reported as such rather than as a parse failure of the other.
    ///
    /// # Errors
    /// Returns an error if either file is missing, unreadable, or incompatible.
    /// Callers are expected to treat this as fatal.
    pub fn load(paths: &ArtifactPaths) -> Result<Self> {
        for (artifact, path) in [("model", &paths.model), ("scaler", &paths.scaler)] {
            if !path.is_file() {
                return Err(RopErr::MissingArtifact {
                    artifact,
                    path: path.clone(),
                });
            }
        }

        let model_path = paths.model.display().to_string();
        let scaler_path = paths.scaler.display().to_string();
        log::info!(model = model_path.as_str(), scaler = scaler_path.as_str(); "loading artifacts");

        let model = BoostedForest::load(&paths.model)?;
        let scaler = FittedScaler::load(&paths.scaler)?;

        Ok(Self { model, scaler })
    }

    pub fn into_pipeline(self) -> RopPipeline {
        Pipeline::new(self.scaler, self.model)
    }
}
