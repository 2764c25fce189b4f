use crate::error::{Result, RopErr};

/// Training objective of a boosted model. Only its link function matters at
/// inference time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    SquaredError,
    SquaredLogError,
    PseudoHuber,
    AbsoluteError,
    Quantile,
    Logistic,
    Poisson,
    Gamma,
    Tweedie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Identity,
    Logit,
    Log,
}

impl Objective {
    /// Maps an XGBoost objective name.
    ///
    /// # Errors
    /// Returns an error for ranking, classification and survival objectives,
    /// none of which yield a single regression value.
    pub fn from_name(name: &str) -> Result<Self> {
        let objective = match name {
            "reg:squarederror" | "reg:linear" => Objective::SquaredError,
            "reg:squaredlogerror" => Objective::SquaredLogError,
            "reg:pseudohubererror" => Objective::PseudoHuber,
            "reg:absoluteerror" => Objective::AbsoluteError,
            "reg:quantileerror" => Objective::Quantile,
            "reg:logistic" | "binary:logistic" => Objective::Logistic,
            "count:poisson" => Objective::Poisson,
            "reg:gamma" => Objective::Gamma,
            "reg:tweedie" => Objective::Tweedie,
            other => {
                return Err(RopErr::UnsupportedModel(format!(
                    "objective '{other}' is not a scalar regression objective"
                )));
            }
        };
        Ok(objective)
    }

    pub fn name(self) -> &'static str {
        match self {
            Objective::SquaredError => "reg:squarederror",
            Objective::SquaredLogError => "reg:squaredlogerror",
            Objective::PseudoHuber => "reg:pseudohubererror",
            Objective::AbsoluteError => "reg:absoluteerror",
            Objective::Quantile => "reg:quantileerror",
            Objective::Logistic => "reg:logistic",
            Objective::Poisson => "count:poisson",
            Objective::Gamma => "reg:gamma",
            Objective::Tweedie => "reg:tweedie",
        }
    }

    fn link(self) -> Link {
        match self {
            Objective::Logistic => Link::Logit,
            Objective::Poisson | Objective::Gamma | Objective::Tweedie => Link::Log,
            _ => Link::Identity,
        }
    }

    /// Converts the stored `base_score` (output space) into margin space.
    pub fn base_margin(self, base_score: f32) -> Result<f32> {
        match self.link() {
            Link::Identity => Ok(base_score),
            Link::Logit if base_score > 0.0 && base_score < 1.0 => {
                Ok(-(1.0 / base_score - 1.0).ln())
            }
            Link::Log if base_score > 0.0 => Ok(base_score.ln()),
            _ => Err(RopErr::UnsupportedModel(format!(
                "base_score {base_score} is outside the domain of {}",
                self.name()
            ))),
        }
    }

    /// Maps a raw margin to the model's output space.
    pub fn transform(self, margin: f32) -> f32 {
        match self.link() {
            Link::Identity => margin,
            Link::Logit => 1.0 / (1.0 + (-margin).exp()),
            Link::Log => margin.exp(),
        }
    }
}
