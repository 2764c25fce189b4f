//! The eleven model inputs and their fixed column order.
//!
//! The scaler and the model were both fitted against this exact order, and a
//! reordered vector still yields a number, just the wrong one. The order lives
//! in two places that must agree: the discriminants of [`Feature`] and the
//! destructuring in [`FeatureVector::to_array`].

use crate::error::{Result, RopErr};

/// Number of model inputs.
pub const FEATURE_COUNT: usize = 11;

/// A single model input. The discriminant is the column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    RockDrillPower = 0,
    BlowFrequency = 1,
    PulldownPressure = 2,
    BlowPressure = 3,
    RotationalPressure = 4,
    Ucs = 5,
    TensileStrength = 6,
    PointLoadStrength = 7,
    PWaveVelocity = 8,
    ElasticModulus = 9,
    Density = 10,
}

impl Feature {
    /// Every feature, in column order.
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::RockDrillPower,
        Feature::BlowFrequency,
        Feature::PulldownPressure,
        Feature::BlowPressure,
        Feature::RotationalPressure,
        Feature::Ucs,
        Feature::TensileStrength,
        Feature::PointLoadStrength,
        Feature::PWaveVelocity,
        Feature::ElasticModulus,
        Feature::Density,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Column name the artifacts were fitted with.
    pub const fn column(self) -> &'static str {
        match self {
            Feature::RockDrillPower => "rock_drill_power_kw",
            Feature::BlowFrequency => "blow_frequency_bpm",
            Feature::PulldownPressure => "pulldown_pressure_bar",
            Feature::BlowPressure => "blow_pressure_bar",
            Feature::RotationalPressure => "rotational_pressure_bar",
            Feature::Ucs => "ucs_mpa",
            Feature::TensileStrength => "tensile_strength_mpa",
            Feature::PointLoadStrength => "point_load_strength_mpa",
            Feature::PWaveVelocity => "p-wave_velocity_km/s",
            Feature::ElasticModulus => "elastic_modulus_mpa",
            Feature::Density => "density_g/cm3",
        }
    }

    /// Human facing label, with unit.
    pub const fn label(self) -> &'static str {
        match self {
            Feature::RockDrillPower => "Rock Drill Power (kW)",
            Feature::BlowFrequency => "Blow Frequency (BPM)",
            Feature::PulldownPressure => "Pulldown Pressure (bar)",
            Feature::BlowPressure => "Blow Pressure (bar)",
            Feature::RotationalPressure => "Rotational Pressure (bar)",
            Feature::Ucs => "UCS (MPa)",
            Feature::TensileStrength => "Tensile Strength (MPa)",
            Feature::PointLoadStrength => "Point Load Strength (MPa)",
            Feature::PWaveVelocity => "P-wave Velocity (km/s)",
            Feature::ElasticModulus => "Elastic Modulus (MPa)",
            Feature::Density => "Density (g/cm3)",
        }
    }

    pub const fn default_value(self) -> f64 {
        match self {
            Feature::RockDrillPower => 14.0,
            Feature::BlowFrequency => 2100.0,
            Feature::PulldownPressure => 80.0,
            Feature::BlowPressure => 6.5,
            Feature::RotationalPressure => 40.0,
            Feature::Ucs => 85.0,
            Feature::TensileStrength => 5.0,
            Feature::PointLoadStrength => 3.2,
            Feature::PWaveVelocity => 3.8,
            Feature::ElasticModulus => 6000.0,
            Feature::Density => 2.7,
        }
    }

    /// Whether `value` is physically meaningful for this measurement.
    ///
    /// Every input is a strictly positive physical quantity. Values outside the
    /// domain are still predicted on; this only drives warnings.
    pub fn in_domain(self, value: f64) -> bool {
        value.is_finite() && value > 0.0
    }

    /// Drilling machine parameters, as opposed to rock properties.
    pub const fn is_drilling_parameter(self) -> bool {
        (self as usize) < Feature::Ucs as usize
    }
}

/// Column names in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    Feature::RockDrillPower.column(),
    Feature::BlowFrequency.column(),
    Feature::PulldownPressure.column(),
    Feature::BlowPressure.column(),
    Feature::RotationalPressure.column(),
    Feature::Ucs.column(),
    Feature::TensileStrength.column(),
    Feature::PointLoadStrength.column(),
    Feature::PWaveVelocity.column(),
    Feature::ElasticModulus.column(),
    Feature::Density.column(),
];

/// Checks feature names declared by an artifact against the model column order.
///
/// # Errors
/// Returns an error naming the first position that disagrees.
pub fn check_names(artifact: &'static str, names: &[String]) -> Result<()> {
    if names.len() != FEATURE_COUNT {
        return Err(RopErr::SizeMismatch {
            what: "feature names",
            got: names.len(),
            expected: FEATURE_COUNT,
        });
    }

    for (position, (got, expected)) in names.iter().zip(FEATURE_NAMES).enumerate() {
        if got != expected {
            return Err(RopErr::FeatureMismatch {
                artifact,
                position,
                expected,
                got: got.clone(),
            });
        }
    }
    Ok(())
}

/// One set of measurements, one field per model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    pub rock_drill_power_kw: f64,
    pub blow_frequency_bpm: f64,
    pub pulldown_pressure_bar: f64,
    pub blow_pressure_bar: f64,
    pub rotational_pressure_bar: f64,
    pub ucs_mpa: f64,
    pub tensile_strength_mpa: f64,
    pub point_load_strength_mpa: f64,
    pub p_wave_velocity_km_s: f64,
    pub elastic_modulus_mpa: f64,
    pub density_g_cm3: f64,
}

impl FeatureVector {
    /// Assembles the values in model column order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        let &Self {
            rock_drill_power_kw,
            blow_frequency_bpm,
            pulldown_pressure_bar,
            blow_pressure_bar,
            rotational_pressure_bar,
            ucs_mpa,
            tensile_strength_mpa,
            point_load_strength_mpa,
            p_wave_velocity_km_s,
            elastic_modulus_mpa,
            density_g_cm3,
        } = self;

        [
            rock_drill_power_kw,
            blow_frequency_bpm,
            pulldown_pressure_bar,
            blow_pressure_bar,
            rotational_pressure_bar,
            ucs_mpa,
            tensile_strength_mpa,
            point_load_strength_mpa,
            p_wave_velocity_km_s,
            elastic_modulus_mpa,
            density_g_cm3,
        ]
    }

    /// Inverse of [`FeatureVector::to_array`].
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [
            rock_drill_power_kw,
            blow_frequency_bpm,
            pulldown_pressure_bar,
            blow_pressure_bar,
            rotational_pressure_bar,
            ucs_mpa,
            tensile_strength_mpa,
            point_load_strength_mpa,
            p_wave_velocity_km_s,
            elastic_modulus_mpa,
            density_g_cm3,
        ] = values;

        Self {
            rock_drill_power_kw,
            blow_frequency_bpm,
            pulldown_pressure_bar,
            blow_pressure_bar,
            rotational_pressure_bar,
            ucs_mpa,
            tensile_strength_mpa,
            point_load_strength_mpa,
            p_wave_velocity_km_s,
            elastic_modulus_mpa,
            density_g_cm3,
        }
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.to_array()[feature.index()]
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let mut values = self.to_array();
        values[feature.index()] = value;
        *self = Self::from_array(values);
    }

    /// Features whose current value falls outside their physical domain.
    pub fn out_of_domain(&self) -> Vec<Feature> {
        Feature::ALL
            .into_iter()
            .filter(|&f| !f.in_domain(self.get(f)))
            .collect()
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::from_array(Feature::ALL.map(Feature::default_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names_follow_fitted_order() {
        assert_eq!(
            FEATURE_NAMES,
            [
                "rock_drill_power_kw",
                "blow_frequency_bpm",
                "pulldown_pressure_bar",
                "blow_pressure_bar",
                "rotational_pressure_bar",
                "ucs_mpa",
                "tensile_strength_mpa",
                "point_load_strength_mpa",
                "p-wave_velocity_km/s",
                "elastic_modulus_mpa",
                "density_g/cm3",
            ]
        );
    }

    #[test]
    fn discriminants_match_position_in_all() {
        for (i, f) in Feature::ALL.into_iter().enumerate() {
            assert_eq!(f.index(), i, "{f:?}");
        }
    }

    #[test]
    fn defaults_assemble_in_column_order() {
        assert_eq!(
            FeatureVector::default().to_array(),
            [14.0, 2100.0, 80.0, 6.5, 40.0, 85.0, 5.0, 3.2, 3.8, 6000.0, 2.7]
        );
    }

    #[test]
    fn named_fields_land_in_their_columns() {
        let v = FeatureVector {
            rock_drill_power_kw: 1.0,
            blow_frequency_bpm: 2.0,
            pulldown_pressure_bar: 3.0,
            blow_pressure_bar: 4.0,
            rotational_pressure_bar: 5.0,
            ucs_mpa: 6.0,
            tensile_strength_mpa: 7.0,
            point_load_strength_mpa: 8.0,
            p_wave_velocity_km_s: 9.0,
            elastic_modulus_mpa: 10.0,
            density_g_cm3: 11.0,
        };

        for f in Feature::ALL {
            assert_eq!(v.get(f), (f.index() + 1) as f64, "{}", f.column());
        }
        assert_eq!(FeatureVector::from_array(v.to_array()), v);
    }

    #[test]
    fn set_only_touches_one_column() {
        let mut v = FeatureVector::default();
        v.set(Feature::PWaveVelocity, 4.4);

        assert_eq!(v.p_wave_velocity_km_s, 4.4);
        assert_eq!(v.density_g_cm3, 2.7);
        assert_eq!(v.elastic_modulus_mpa, 6000.0);
    }

    #[test]
    fn out_of_domain_lists_non_positive_values() {
        let mut v = FeatureVector::default();
        assert!(v.out_of_domain().is_empty());

        v.set(Feature::Density, -1.0);
        v.set(Feature::BlowFrequency, 0.0);
        assert_eq!(
            v.out_of_domain(),
            vec![Feature::BlowFrequency, Feature::Density]
        );
    }

    #[test]
    fn drilling_parameters_are_the_first_five() {
        let drilling = Feature::ALL
            .into_iter()
            .filter(|f| f.is_drilling_parameter())
            .count();
        assert_eq!(drilling, 5);
        assert!(!Feature::Ucs.is_drilling_parameter());
    }
}
