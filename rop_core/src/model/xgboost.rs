//! Reader for XGBoost's JSON model format (`Booster.save_model("*.json")`).
//!
//! Only the parts needed for scalar tree inference are deserialized; every
//! other key is ignored. XGBoost writes most scalar parameters as strings
//! (`"num_feature": "11"`, `"base_score": "5E-1"`, sometimes `"[5E-1]"`), so
//! those go through [`lenient`].

use std::{collections::HashMap, fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

use super::{
    forest::BoostedForest,
    objective::Objective,
    tree::{Node, Tree},
};
use crate::{
    error::{Result, RopErr},
    features::{self, FEATURE_COUNT},
};

#[derive(Debug, Deserialize)]
pub(super) struct XgbModel {
    learner: Learner,
    #[serde(default)]
    version: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct Learner {
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: GradientBooster,
    learner_model_param: LearnerModelParam,
    objective: ObjectiveDef,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "name", rename_all = "lowercase")]
enum GradientBooster {
    Gbtree { model: ModelTrees },
    Dart { gbtree: DartTrees, weight_drop: Vec<f32> },
    Gblinear {},
}

#[derive(Debug, Deserialize)]
struct DartTrees {
    model: ModelTrees,
}

#[derive(Debug, Deserialize)]
struct ModelTrees {
    gbtree_model_param: GbTreeModelParam,
    trees: Vec<TreeDef>,
}

#[derive(Debug, Deserialize)]
struct GbTreeModelParam {
    #[serde(default = "one", deserialize_with = "lenient")]
    num_parallel_tree: usize,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParam {
    #[serde(deserialize_with = "lenient")]
    base_score: f32,
    #[serde(deserialize_with = "lenient")]
    num_feature: usize,
    #[serde(default, deserialize_with = "lenient")]
    num_class: usize,
    #[serde(default = "one", deserialize_with = "lenient")]
    num_target: usize,
}

#[derive(Debug, Deserialize)]
struct ObjectiveDef {
    name: String,
}

#[derive(Debug, Deserialize)]
struct TreeDef {
    left_children: Vec<i64>,
    right_children: Vec<i64>,
    split_indices: Vec<i64>,
    split_conditions: Vec<f32>,
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<i64>,
}

/// `default_left` is `0`/`1` in recent releases and `true`/`false` in older ones.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(i64),
}

impl Flag {
    fn is_set(self) -> bool {
        match self {
            Flag::Bool(b) => b,
            Flag::Int(i) => i != 0,
        }
    }
}

fn one() -> usize {
    1
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Value::deserialize(deserializer)?;
    let text = scalar_text(&value)
        .ok_or_else(|| D::Error::custom(format!("expected a scalar, got {value}")))?;
    let trimmed = text.trim().trim_start_matches('[').trim_end_matches(']');
    trimmed
        .parse()
        .map_err(|e| D::Error::custom(format!("cannot parse '{trimmed}': {e}")))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) if items.len() == 1 => scalar_text(&items[0]),
        _ => None,
    }
}

impl XgbModel {
    /// Validates the model and converts it into a [`BoostedForest`].
    pub(super) fn into_forest(self) -> Result<BoostedForest> {
        let Learner {
            attributes,
            feature_names,
            gradient_booster,
            learner_model_param: param,
            objective,
        } = self.learner;

        if param.num_class > 1 {
            return Err(RopErr::UnsupportedModel(format!(
                "multi-class model with {} classes",
                param.num_class
            )));
        }
        if param.num_target > 1 {
            return Err(RopErr::UnsupportedModel(format!(
                "multi-target model with {} targets",
                param.num_target
            )));
        }
        if param.num_feature != FEATURE_COUNT {
            return Err(RopErr::SizeMismatch {
                what: "model features",
                got: param.num_feature,
                expected: FEATURE_COUNT,
            });
        }
        if !feature_names.is_empty() {
            features::check_names("model", &feature_names)?;
        }

        let objective = Objective::from_name(&objective.name)?;
        let base_margin = objective.base_margin(param.base_score)?;

        let (model, weight_drop) = match gradient_booster {
            GradientBooster::Gbtree { model } => (model, None),
            GradientBooster::Dart {
                gbtree,
                weight_drop,
            } => (gbtree.model, Some(weight_drop)),
            GradientBooster::Gblinear {} => {
                return Err(RopErr::UnsupportedModel(
                    "gblinear booster has no trees".into(),
                ));
            }
        };

        if let Some(weights) = &weight_drop {
            if weights.len() != model.trees.len() {
                return Err(RopErr::SizeMismatch {
                    what: "dart weight_drop",
                    got: weights.len(),
                    expected: model.trees.len(),
                });
            }
        }

        let mut trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, def)| convert_tree(i, def))
            .collect::<Result<Vec<_>>>()?;
        let mut weights = weight_drop;

        // Early-stopped models predict with the best round only.
        if let Some(best) = best_iteration(&attributes)? {
            let limit = (best + 1) * model.gbtree_model_param.num_parallel_tree.max(1);
            trees.truncate(limit);
            if let Some(w) = weights.as_mut() {
                w.truncate(limit);
            }
            log::debug!(best_iteration = best, trees = trees.len(); "model limited to best iteration");
        }

        if let [major, minor, patch, ..] = self.version[..] {
            log::debug!(major = major, minor = minor, patch = patch; "xgboost model version");
        }

        Ok(BoostedForest::new(trees, weights, base_margin, objective))
    }
}

fn best_iteration(attributes: &HashMap<String, String>) -> Result<Option<usize>> {
    attributes
        .get("best_iteration")
        .map(|raw| {
            raw.trim().parse().map_err(|_| {
                RopErr::UnsupportedModel(format!("best_iteration '{raw}' is not an integer"))
            })
        })
        .transpose()
}

fn convert_tree(tree: usize, def: TreeDef) -> Result<Tree> {
    let n = def.left_children.len();
    if n == 0 {
        return Err(RopErr::InvalidTree {
            tree,
            node: 0,
            reason: "tree has no nodes".into(),
        });
    }

    let lengths = [
        ("right_children", def.right_children.len()),
        ("split_indices", def.split_indices.len()),
        ("split_conditions", def.split_conditions.len()),
        ("default_left", def.default_left.len()),
    ];
    for (name, len) in lengths {
        if len != n {
            return Err(RopErr::InvalidTree {
                tree,
                node: 0,
                reason: format!("{name} has {len} entries, expected {n}"),
            });
        }
    }

    if def.split_type.iter().any(|&t| t != 0) {
        return Err(RopErr::UnsupportedModel(format!(
            "tree {tree} uses categorical splits"
        )));
    }

    let child = |node: usize, idx: i64| -> Result<usize> {
        match usize::try_from(idx) {
            Ok(c) if c > node && c < n => Ok(c),
            _ => Err(RopErr::InvalidTree {
                tree,
                node,
                reason: format!("child index {idx} out of range"),
            }),
        }
    };

    let mut nodes = Vec::with_capacity(n);
    for node in 0..n {
        if def.left_children[node] == -1 {
            nodes.push(Node::Leaf(def.split_conditions[node]));
            continue;
        }

        let feature = match usize::try_from(def.split_indices[node]) {
            Ok(f) if f < FEATURE_COUNT => f,
            _ => {
                return Err(RopErr::InvalidTree {
                    tree,
                    node,
                    reason: format!(
                        "split on feature {}, model has {FEATURE_COUNT}",
                        def.split_indices[node]
                    ),
                });
            }
        };

        nodes.push(Node::Split {
            feature,
            threshold: def.split_conditions[node],
            default_left: def.default_left[node].is_set(),
            left: child(node, def.left_children[node])?,
            right: child(node, def.right_children[node])?,
        });
    }

    Ok(Tree::new(nodes))
}
