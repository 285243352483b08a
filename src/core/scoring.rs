use crate::core::predictor::PredictionError;
use crate::models::FlightFeatures;
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while building a model from its exported form
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("coefficient count ({coefficients}) does not match feature count ({features})")]
    LengthMismatch { coefficients: usize, features: usize },

    #[error("model has no features")]
    Empty,

    #[error("expected exactly one coefficient row, found {0}")]
    CoefficientRows(usize),

    #[error("expected exactly one intercept, found {0}")]
    InterceptCount(usize),
}

/// Standard logistic function, maps any real number into (0, 1)
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Logistic regression model with a fixed coefficient table
///
/// Loaded once at startup and only read afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticModel {
    coefficients: Vec<f64>,
    intercept: f64,
    feature_names: Vec<String>,
}

impl LogisticModel {
    pub fn new(
        coefficients: Vec<f64>,
        intercept: f64,
        feature_names: Vec<String>,
    ) -> Result<Self, ModelError> {
        if coefficients.len() != feature_names.len() {
            return Err(ModelError::LengthMismatch {
                coefficients: coefficients.len(),
                features: feature_names.len(),
            });
        }
        if feature_names.is_empty() {
            return Err(ModelError::Empty);
        }

        Ok(Self {
            coefficients,
            intercept,
            feature_names,
        })
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    /// Weighted sum of the features in model order plus the intercept
    pub fn linear_score(&self, features: &FlightFeatures) -> Result<f64, PredictionError> {
        let mut linear = self.intercept;
        for (name, coef) in self.feature_names.iter().zip(&self.coefficients) {
            let value = features
                .get(name)
                .ok_or_else(|| PredictionError::UnknownFeature(name.clone()))?;
            linear += coef * value;
        }
        Ok(linear)
    }

    /// Probability of delay for the given features
    ///
    /// NaN never escapes: a non-numeric score is reported as an error.
    pub fn probability(&self, features: &FlightFeatures) -> Result<f64, PredictionError> {
        let probability = sigmoid(self.linear_score(features)?);
        if probability.is_nan() {
            return Err(PredictionError::NotANumber);
        }
        Ok(probability)
    }
}

/// On-disk model formats
///
/// `Sklearn` is what a scikit-learn `LogisticRegression` export looks like
/// (`coef_` and `intercept_` keep their array shapes). `Flat` is the
/// simpler hand-written layout.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ModelFile {
    Sklearn {
        coef: Vec<Vec<f64>>,
        intercept: Vec<f64>,
        features: Vec<String>,
    },
    Flat {
        coefficients: Vec<f64>,
        intercept: f64,
        #[serde(rename = "featureNames")]
        feature_names: Vec<String>,
    },
}

impl TryFrom<ModelFile> for LogisticModel {
    type Error = ModelError;

    fn try_from(file: ModelFile) -> Result<Self, Self::Error> {
        match file {
            ModelFile::Sklearn {
                mut coef,
                intercept,
                features,
            } => {
                if coef.len() != 1 {
                    return Err(ModelError::CoefficientRows(coef.len()));
                }
                if intercept.len() != 1 {
                    return Err(ModelError::InterceptCount(intercept.len()));
                }
                LogisticModel::new(coef.remove(0), intercept[0], features)
            }
            ModelFile::Flat {
                coefficients,
                intercept,
                feature_names,
            } => LogisticModel::new(coefficients, intercept, feature_names),
        }
    }
}
