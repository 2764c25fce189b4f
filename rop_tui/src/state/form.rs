use std::fmt;

use rop_core::{
    Feature, FeatureVector, Pipeline, Prediction, Regressor, Scaler, FEATURE_COUNT,
};

/// One numeric input, kept as the text the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub feature: Feature,
    pub input: String,
}

impl Field {
    fn new(feature: Feature) -> Self {
        Self {
            feature,
            input: format_default(feature.default_value()),
        }
    }

    /// Parses the field, rejecting anything that is not a finite number.
    pub fn value(&self) -> Result<f64, FieldError> {
        match self.input.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(FieldError {
                feature: self.feature,
                input: self.input.clone(),
            }),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.value().is_ok()
    }
}

/// `14.0`, `2100.0`, `6.5`: always shows a decimal point.
fn format_default(value: f64) -> String {
    format!("{value:?}")
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub feature: Feature,
    pub input: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: '{}' is not a number",
            self.feature.label(),
            self.input
        )
    }
}

/// Result of the last "Predict ROP".
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Predicted {
        prediction: Prediction,
        /// Inputs outside their physical domain; predicted on regardless.
        warnings: Vec<Feature>,
    },
    Failed(String),
}

/// The prediction form: eleven fields, the selected one, and the last result.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    fields: [Field; FEATURE_COUNT],
    selected: usize,
    outcome: Option<Outcome>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Creates a form with every field at its default.
    pub fn new() -> Self {
        Self {
            fields: Feature::ALL.map(Field::new),
            selected: 0,
            outcome: None,
        }
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn selected(&self) -> Feature {
        self.fields[self.selected].feature
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % FEATURE_COUNT;
    }

    pub fn select_prev(&mut self) {
        self.selected = (self.selected + FEATURE_COUNT - 1) % FEATURE_COUNT;
    }

    /// Appends `c` to the selected field if it can be part of a number.
    ///
    /// # Returns
    /// Whether the character was accepted.
    pub fn push_char(&mut self, c: char) -> bool {
        if !(c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')) {
            return false;
        }
        self.fields[self.selected].input.push(c);
        self.outcome = None;
        true
    }

    pub fn backspace(&mut self) {
        if self.fields[self.selected].input.pop().is_some() {
            self.outcome = None;
        }
    }

    /// Restores the selected field to its default value.
    pub fn reset_selected(&mut self) {
        self.fields[self.selected] = Field::new(self.selected());
        self.outcome = None;
    }

    /// Collects the current inputs.
    ///
    /// # Errors
    /// Returns the first field that does not parse.
    pub fn features(&self) -> Result<FeatureVector, FieldError> {
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, field) in values.iter_mut().zip(&self.fields) {
            *slot = field.value()?;
        }
        Ok(FeatureVector::from_array(values))
    }

    /// Runs the pipeline on the current inputs and stores the outcome.
    pub fn predict<S: Scaler, M: Regressor>(&mut self, pipeline: &Pipeline<S, M>) {
        let outcome = match self.features() {
            Err(e) => Outcome::Failed(e.to_string()),
            Ok(features) => match pipeline.predict(&features) {
                Ok(prediction) => {
                    let warnings = features.out_of_domain();
                    log::info!(
                        rop = prediction.value,
                        warnings = warnings.len();
                        "predicted penetration rate"
                    );
                    Outcome::Predicted {
                        prediction,
                        warnings,
                    }
                }
                Err(e) => {
                    log::warn!("prediction failed: {e}");
                    Outcome::Failed(e.to_string())
                }
            },
        };
        self.outcome = Some(outcome);
    }
}
