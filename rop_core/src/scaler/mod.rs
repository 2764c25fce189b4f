mod file;
mod kinds;

use std::path::Path;

use ndarray::Array1;

use crate::{
    error::{Result, RopErr},
    features::FEATURE_COUNT,
};

pub use kinds::{MinMaxScaler, RobustScaler, StandardScaler};

/// A fitted, read-only feature transform.
pub trait Scaler {
    /// Maps raw measurements (model column order) into the space the model was trained on.
    fn transform(&self, features: &[f64; FEATURE_COUNT]) -> Result<[f64; FEATURE_COUNT]>;
}

/// Any scaler that can be loaded from a scaler artifact.
#[derive(Debug, Clone, PartialEq)]
pub enum FittedScaler {
    Standard(StandardScaler),
    MinMax(MinMaxScaler),
    Robust(RobustScaler),
}

impl FittedScaler {
    /// Parses a scaler artifact.
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed, an array does not have one
    /// entry per feature, or the declared feature names disagree with the
    /// model column order.
    pub fn from_json(json: &str) -> Result<Self> {
        let file = serde_json::from_str(json).map_err(|source| RopErr::Parse {
            artifact: "scaler",
            source,
        })?;
        file::build(file)
    }

    /// Reads and parses a scaler artifact from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| RopErr::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scaler = Self::from_json(&json)?;
        log::info!(kind = scaler.kind(); "scaler loaded");
        Ok(scaler)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FittedScaler::Standard(_) => "standard",
            FittedScaler::MinMax(_) => "min_max",
            FittedScaler::Robust(_) => "robust",
        }
    }
}

impl Scaler for FittedScaler {
    fn transform(&self, features: &[f64; FEATURE_COUNT]) -> Result<[f64; FEATURE_COUNT]> {
        let x = Array1::from(features.to_vec());
        let x = match self {
            FittedScaler::Standard(s) => s.apply(x),
            FittedScaler::MinMax(s) => s.apply(x),
            FittedScaler::Robust(s) => s.apply(x),
        };
        into_features(&x)
    }
}

fn into_features(x: &Array1<f64>) -> Result<[f64; FEATURE_COUNT]> {
    x.as_slice()
        .and_then(|s| <[f64; FEATURE_COUNT]>::try_from(s).ok())
        .ok_or(RopErr::SizeMismatch {
            what: "scaled features",
            got: x.len(),
            expected: FEATURE_COUNT,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{FEATURE_NAMES, FeatureVector};

    const DEFAULTS: [f64; FEATURE_COUNT] =
        [14.0, 2100.0, 80.0, 6.5, 40.0, 85.0, 5.0, 3.2, 3.8, 6000.0, 2.7];

    fn names_json() -> String {
        serde_json::to_string(&FEATURE_NAMES).unwrap()
    }

    #[test]
    fn standard_scaler_centers_and_scales() {
        let json = format!(
            r#"{{
                "kind": "standard",
                "feature_names_in": {},
                "mean": {:?},
                "scale": [2, 300, 10, 1, 5, 20, 1, 0.5, 0.4, 1500, 0.1]
            }}"#,
            names_json(),
            DEFAULTS
        );
        let scaler = FittedScaler::from_json(&json).unwrap();
        assert_eq!(scaler.kind(), "standard");

        let at_mean = scaler.transform(&DEFAULTS).unwrap();
        assert!(at_mean.iter().all(|v| *v == 0.0));

        let mut raw = FeatureVector::default().to_array();
        raw[0] = 18.0;
        raw[9] = 4500.0;
        let scaled = scaler.transform(&raw).unwrap();
        assert_eq!(scaled[0], 2.0);
        assert_eq!(scaled[9], -1.0);
    }

    #[test]
    fn standard_scaler_without_mean_only_scales() {
        let json = r#"{
            "kind": "standard",
            "mean": null,
            "scale": [2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2]
        }"#;
        let scaler = FittedScaler::from_json(json).unwrap();
        let scaled = scaler.transform(&[4.0; FEATURE_COUNT]).unwrap();
        assert_eq!(scaled, [2.0; FEATURE_COUNT]);
    }

    #[test]
    fn zero_scale_is_treated_as_one() {
        let json = r#"{
            "kind": "robust",
            "center": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            "scale": [0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1]
        }"#;
        let scaler = FittedScaler::from_json(json).unwrap();
        let scaled = scaler.transform(&[3.0; FEATURE_COUNT]).unwrap();
        assert_eq!(scaled[0], 2.0);
    }

    #[test]
    fn min_max_scaler_clips_when_asked() {
        let json = r#"{
            "kind": "min_max",
            "min": [-1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            "scale": [0.1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
            "feature_range": [0, 1],
            "clip": true
        }"#;
        let scaler = FittedScaler::from_json(json).unwrap();
        let mut raw = [0.5; FEATURE_COUNT];
        raw[0] = 15.0;
        let scaled = scaler.transform(&raw).unwrap();
        assert!((scaled[0] - 0.5).abs() < 1e-12);
        assert_eq!(scaled[1], 0.5);

        raw[0] = 100.0;
        raw[1] = 7.0;
        let clipped = scaler.transform(&raw).unwrap();
        assert_eq!(clipped[0], 1.0);
        assert_eq!(clipped[1], 1.0);
    }

    #[test]
    fn rejects_inverted_feature_range() {
        for range in ["[1, 0]", "[0.5, 0.5]"] {
            let json = format!(
                r#"{{
                    "kind": "min_max",
                    "min": [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
                    "scale": [1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                    "feature_range": {range},
                    "clip": true
                }}"#
            );
            let err = FittedScaler::from_json(&json).unwrap_err();
            assert!(matches!(err, RopErr::InvalidScaler(_)), "{range}: {err}");
        }
    }

    #[test]
    fn short_output_is_a_size_mismatch() {
        let err = into_features(&Array1::zeros(3)).unwrap_err();
        assert!(matches!(
            err,
            RopErr::SizeMismatch {
                what: "scaled features",
                got: 3,
                expected: FEATURE_COUNT,
            }
        ));
        assert_eq!(
            into_features(&Array1::from(DEFAULTS.to_vec())).unwrap(),
            DEFAULTS
        );
    }

    #[test]
    fn rejects_wrong_feature_count() {
        let json = r#"{ "kind": "standard", "mean": [1, 2, 3], "scale": null }"#;
        let err = FittedScaler::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            RopErr::SizeMismatch {
                got: 3,
                expected: FEATURE_COUNT,
                ..
            }
        ));
    }

    #[test]
    fn rejects_reordered_feature_names() {
        let mut names = FEATURE_NAMES.map(str::to_string);
        names.swap(0, 5);
        let json = format!(
            r#"{{ "kind": "standard", "feature_names_in": {}, "mean": null, "scale": null }}"#,
            serde_json::to_string(&names).unwrap()
        );
        let err = FittedScaler::from_json(&json).unwrap_err();
        match err {
            RopErr::FeatureMismatch {
                artifact,
                position,
                expected,
                got,
            } => {
                assert_eq!(artifact, "scaler");
                assert_eq!(position, 0);
                assert_eq!(expected, "rock_drill_power_kw");
                assert_eq!(got, "ucs_mpa");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_unknown_kind() {
        let json = r#"{ "kind": "quantile", "quantiles": [] }"#;
        assert!(matches!(
            FittedScaler::from_json(json),
            Err(RopErr::Parse { .. })
        ));
    }
}
