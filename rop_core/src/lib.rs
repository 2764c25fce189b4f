//! Rate-of-penetration prediction from drilling and rock measurements.
//!
//! Eleven measurements are assembled in a fixed column order, passed through a
//! fitted scaler and a gradient-boosted tree model, and reported in m/min.

pub mod artifacts;
pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod scaler;

pub use artifacts::{ArtifactPaths, Artifacts};
pub use config::PredictorConfig;
pub use error::{Result, RopErr};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, Feature, FeatureVector};
pub use model::{BoostedForest, Regressor};
pub use pipeline::{Pipeline, Prediction, RopPipeline};
pub use scaler::{FittedScaler, Scaler};
