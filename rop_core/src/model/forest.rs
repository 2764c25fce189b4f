use std::path::Path;

use super::{Regressor, objective::Objective, tree::Tree, xgboost::XgbModel};
use crate::{
    error::{Result, RopErr},
    features::FEATURE_COUNT,
};

/// A gradient-boosted tree ensemble producing one scalar per row.
///
/// Arithmetic is done in `f32`, like XGBoost's own predictor: the margin
/// starts at the base score and each tree's leaf is added in tree order.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostedForest {
    trees: Vec<Tree>,
    /// Per-tree scaling, only present for dart boosters.
    weights: Option<Vec<f32>>,
    base_margin: f32,
    objective: Objective,
}

impl BoostedForest {
    pub(crate) fn new(
        trees: Vec<Tree>,
        weights: Option<Vec<f32>>,
        base_margin: f32,
        objective: Objective,
    ) -> Self {
        Self {
            trees,
            weights,
            base_margin,
            objective,
        }
    }

    /// Parses an XGBoost JSON model.
    ///
    /// # Errors
    /// Returns an error if the JSON does not describe a single-output tree
    /// model over exactly [`FEATURE_COUNT`] features.
    pub fn from_json(json: &str) -> Result<Self> {
        let model: XgbModel = serde_json::from_str(json).map_err(|source| RopErr::Parse {
            artifact: "model",
            source,
        })?;
        model.into_forest()
    }

    /// Reads and parses an XGBoost JSON model from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| RopErr::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let forest = Self::from_json(&json)?;
        log::info!(
            trees = forest.num_trees(),
            objective = forest.objective.name(),
            dart = forest.weights.is_some();
            "model loaded"
        );
        Ok(forest)
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn base_margin(&self) -> f32 {
        self.base_margin
    }

    /// Raw ensemble output before the objective's link is inverted.
    pub fn predict_margin(&self, row: &[f32; FEATURE_COUNT]) -> f32 {
        match &self.weights {
            None => self
                .trees
                .iter()
                .fold(self.base_margin, |acc, tree| acc + tree.predict(row)),
            Some(weights) => self
                .trees
                .iter()
                .zip(weights)
                .fold(self.base_margin, |acc, (tree, w)| acc + w * tree.predict(row)),
        }
    }
}

impl Regressor for BoostedForest {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64> {
        let row = features.map(|v| v as f32);
        let margin = self.predict_margin(&row);
        Ok(f64::from(self.objective.transform(margin)))
    }
}
