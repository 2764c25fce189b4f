use std::{
    fmt::{self, Display},
    time::Instant,
};

use crate::{
    error::{Result, RopErr},
    features::{FEATURE_COUNT, FeatureVector},
    model::{BoostedForest, Regressor},
    scaler::{FittedScaler, Scaler},
};

/// The pipeline built from the on-disk artifacts.
pub type RopPipeline = Pipeline<FittedScaler, BoostedForest>;

/// Scale, then predict.
#[derive(Debug, Clone)]
pub struct Pipeline<S, M> {
    scaler: S,
    model: M,
}

impl<S: Scaler, M: Regressor> Pipeline<S, M> {
    pub fn new(scaler: S, model: M) -> Self {
        Self { scaler, model }
    }

    pub fn scaler(&self) -> &S {
        &self.scaler
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Predicts the rate of penetration for one set of measurements.
    ///
    /// # Errors
    /// Returns an error if a stage fails or produces NaN or an infinity. No
    /// bounds are enforced on the inputs themselves.
    pub fn predict(&self, features: &FeatureVector) -> Result<Prediction> {
        self.predict_raw(&features.to_array())
    }

    /// Like [`Pipeline::predict`], for a vector already in model column order.
    pub fn predict_raw(&self, raw: &[f64; FEATURE_COUNT]) -> Result<Prediction> {
        let start = Instant::now();

        let scaled = self.scaler.transform(raw)?;
        if let Some(position) = scaled.iter().position(|v| !v.is_finite()) {
            return Err(RopErr::NonFinite {
                stage: "scaler",
                position: Some(position),
            });
        }

        let value = self.model.predict(&scaled)?;
        if !value.is_finite() {
            return Err(RopErr::NonFinite {
                stage: "model",
                position: None,
            });
        }

        log::debug!(
            value = value,
            elapsed_us = start.elapsed().as_micros() as u64;
            "prediction"
        );
        Ok(Prediction { value })
    }
}

/// A predicted rate of penetration, in m/min.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub value: f64,
}

impl Prediction {
    pub const UNIT: &'static str = "m/min";
}

/// Always exactly three decimals.
impl Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::features::Feature;

    /// Records what it was given and passes it through unchanged.
    #[derive(Default)]
    struct SpyScaler {
        seen: RefCell<Vec<[f64; FEATURE_COUNT]>>,
    }

    impl Scaler for SpyScaler {
        fn transform(&self, features: &[f64; FEATURE_COUNT]) -> Result<[f64; FEATURE_COUNT]> {
            self.seen.borrow_mut().push(*features);
            Ok(*features)
        }
    }

    /// Position-weighted sum, so any reordering changes the output.
    struct WeightedSum;

    impl Regressor for WeightedSum {
        fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64> {
            Ok(features
                .iter()
                .enumerate()
                .map(|(i, v)| (i + 1) as f64 * v)
                .sum())
        }
    }

    struct Constant(f64);

    impl Regressor for Constant {
        fn predict(&self, _features: &[f64; FEATURE_COUNT]) -> Result<f64> {
            Ok(self.0)
        }
    }

    #[test]
    fn transform_receives_columns_in_model_order() {
        let pipeline = Pipeline::new(SpyScaler::default(), Constant(1.0));
        let input = FeatureVector::from_array(Feature::ALL.map(|f| f.index() as f64 * 10.0));

        pipeline.predict(&input).unwrap();

        let seen = pipeline.scaler().seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(
            seen[0],
            [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0]
        );
        assert_eq!(seen[0][Feature::Ucs.index()], input.ucs_mpa);
        assert_eq!(seen[0][Feature::Density.index()], input.density_g_cm3);
    }

    #[test]
    fn output_has_three_decimals() {
        for (raw, shown) in [
            (1.0, "1.000"),
            (0.123456, "0.123"),
            (2.9996, "3.000"),
            (-4.5, "-4.500"),
            (1234.5678, "1234.568"),
        ] {
            let pipeline = Pipeline::new(SpyScaler::default(), Constant(raw));
            let prediction = pipeline.predict(&FeatureVector::default()).unwrap();
            assert_eq!(prediction.to_string(), shown);
        }
    }

    #[test]
    fn swapped_columns_change_the_output() {
        let pipeline = Pipeline::new(SpyScaler::default(), WeightedSum);
        let features = FeatureVector::default();

        let baseline = pipeline.predict(&features).unwrap();

        let mut swapped = features.to_array();
        swapped.swap(Feature::RockDrillPower.index(), Feature::Ucs.index());
        let reordered = pipeline.predict_raw(&swapped).unwrap();

        assert_ne!(baseline.to_string(), reordered.to_string());
    }

    #[test]
    fn non_finite_scaler_output_is_an_error() {
        struct Broken;
        impl Scaler for Broken {
            fn transform(
                &self,
                features: &[f64; FEATURE_COUNT],
            ) -> Result<[f64; FEATURE_COUNT]> {
                let mut out = *features;
                out[4] = f64::INFINITY;
                Ok(out)
            }
        }

        let pipeline = Pipeline::new(Broken, Constant(1.0));
        let err = pipeline.predict(&FeatureVector::default()).unwrap_err();
        assert!(matches!(
            err,
            RopErr::NonFinite {
                stage: "scaler",
                position: Some(4)
            }
        ));
    }

    #[test]
    fn non_finite_prediction_is_an_error() {
        let pipeline = Pipeline::new(SpyScaler::default(), Constant(f64::NAN));
        let err = pipeline.predict(&FeatureVector::default()).unwrap_err();
        assert!(matches!(
            err,
            RopErr::NonFinite {
                stage: "model",
                position: None
            }
        ));
    }
}
