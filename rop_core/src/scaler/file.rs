//! On-disk layout of a scaler artifact.
//!
//! The fitted attributes of a scikit-learn scaler (`mean_`, `scale_`, `min_`,
//! `center_`, `feature_names_in_`) are exported as plain JSON arrays, tagged
//! with the scaler `kind`.

use ndarray::Array1;
use serde::Deserialize;

use super::{FittedScaler, MinMaxScaler, RobustScaler, StandardScaler};
use crate::{
    error::{Result, RopErr},
    features::{self, FEATURE_COUNT},
};

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(super) enum ScalerFile {
    Standard {
        feature_names_in: Option<Vec<String>>,
        mean: Option<Vec<f64>>,
        scale: Option<Vec<f64>>,
    },
    MinMax {
        feature_names_in: Option<Vec<String>>,
        min: Vec<f64>,
        scale: Vec<f64>,
        #[serde(default = "default_feature_range")]
        feature_range: (f64, f64),
        #[serde(default)]
        clip: bool,
    },
    Robust {
        feature_names_in: Option<Vec<String>>,
        center: Option<Vec<f64>>,
        scale: Option<Vec<f64>>,
    },
}

fn default_feature_range() -> (f64, f64) {
    (0.0, 1.0)
}

pub(super) fn build(file: ScalerFile) -> Result<FittedScaler> {
    let scaler = match file {
        ScalerFile::Standard {
            feature_names_in,
            mean,
            scale,
        } => {
            check_names(feature_names_in.as_deref())?;
            FittedScaler::Standard(StandardScaler::new(
                column("mean", mean)?,
                column("scale", scale)?,
            ))
        }
        ScalerFile::MinMax {
            feature_names_in,
            min,
            scale,
            feature_range,
            clip,
        } => {
            check_names(feature_names_in.as_deref())?;
            check_range(feature_range)?;
            FittedScaler::MinMax(MinMaxScaler::new(
                required("min", min)?,
                required("scale", scale)?,
                clip.then_some(feature_range),
            ))
        }
        ScalerFile::Robust {
            feature_names_in,
            center,
            scale,
        } => {
            check_names(feature_names_in.as_deref())?;
            FittedScaler::Robust(RobustScaler::new(
                column("center", center)?,
                column("scale", scale)?,
            ))
        }
    };

    Ok(scaler)
}

fn check_range((lo, hi): (f64, f64)) -> Result<()> {
    if lo.is_finite() && hi.is_finite() && lo < hi {
        Ok(())
    } else {
        Err(RopErr::InvalidScaler(format!(
            "feature_range ({lo}, {hi}) must be finite with min < max"
        )))
    }
}

fn column(what: &'static str, values: Option<Vec<f64>>) -> Result<Option<Array1<f64>>> {
    values.map(|v| required(what, v)).transpose()
}

fn required(what: &'static str, values: Vec<f64>) -> Result<Array1<f64>> {
    if values.len() != FEATURE_COUNT {
        return Err(RopErr::SizeMismatch {
            what,
            got: values.len(),
            expected: FEATURE_COUNT,
        });
    }
    Ok(Array1::from(values))
}

fn check_names(names: Option<&[String]>) -> Result<()> {
    match names {
        Some(names) => features::check_names("scaler", names),
        None => Ok(()),
    }
}
