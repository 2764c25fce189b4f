use ndarray::{Array1, Zip};

/// `(x - mean) / scale`, either step optional.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl StandardScaler {
    pub(super) fn new(mean: Option<Array1<f64>>, scale: Option<Array1<f64>>) -> Self {
        Self {
            mean,
            scale: scale.map(nonzero_scale),
        }
    }

    pub(super) fn apply(&self, mut x: Array1<f64>) -> Array1<f64> {
        if let Some(mean) = &self.mean {
            x -= mean;
        }
        if let Some(scale) = &self.scale {
            x /= scale;
        }
        x
    }
}

/// `x * scale + min`, optionally clipped to the fitted feature range.
#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Array1<f64>,
    scale: Array1<f64>,
    clip: Option<(f64, f64)>,
}

impl MinMaxScaler {
    pub(super) fn new(min: Array1<f64>, scale: Array1<f64>, clip: Option<(f64, f64)>) -> Self {
        Self { min, scale, clip }
    }

    pub(super) fn apply(&self, mut x: Array1<f64>) -> Array1<f64> {
        Zip::from(&mut x)
            .and(&self.scale)
            .and(&self.min)
            .for_each(|v, &scale, &min| *v = *v * scale + min);

        if let Some((lo, hi)) = self.clip {
            x.mapv_inplace(|v| v.clamp(lo, hi));
        }
        x
    }
}

/// `(x - center) / scale`, the median/IQR variant of [`StandardScaler`].
#[derive(Debug, Clone, PartialEq)]
pub struct RobustScaler {
    center: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
}

impl RobustScaler {
    pub(super) fn new(center: Option<Array1<f64>>, scale: Option<Array1<f64>>) -> Self {
        Self {
            center,
            scale: scale.map(nonzero_scale),
        }
    }

    pub(super) fn apply(&self, mut x: Array1<f64>) -> Array1<f64> {
        if let Some(center) = &self.center {
            x -= center;
        }
        if let Some(scale) = &self.scale {
            x /= scale;
        }
        x
    }
}

// A constant column has zero spread; it is left unscaled rather than divided by zero.
fn nonzero_scale(scale: Array1<f64>) -> Array1<f64> {
    scale.mapv(|s| if s == 0.0 { 1.0 } else { s })
}
