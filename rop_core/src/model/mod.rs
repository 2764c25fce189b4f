mod forest;
mod objective;
mod tree;
mod xgboost;

pub use forest::BoostedForest;
pub use objective::Objective;
pub use tree::Tree;

use crate::{error::Result, features::FEATURE_COUNT};

/// A trained, read-only regression model.
pub trait Regressor {
    /// Predicts a single scalar from one scaled feature row (model column order).
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64>;
}
