use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// A failure raised by the predictor or while shaping its input.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("model input is not a JSON object of column arrays")]
    NotColumnar,

    #[error("missing feature column '{0}'")]
    MissingColumn(String),

    #[error("column '{0}' is not an array")]
    ColumnNotArray(String),

    #[error("column '{column}' row {row} is not a number")]
    NonNumeric { column: String, row: usize },

    #[error("column '{column}' has {got} rows, expected {expected}")]
    RaggedColumn {
        column: String,
        got: usize,
        expected: usize,
    },

    #[error("model declares {features} features but carries {weights} weights")]
    WeightMismatch { features: usize, weights: usize },
}

/// Column-oriented input in the predictor's declared feature order. All
/// columns have the same length; one row per prediction.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFrame {
    columns: Vec<Vec<f64>>,
    rows: usize,
}

impl ColumnFrame {
    /// Shapes a decoded request body into the frame the predictor consumes.
    ///
    /// `input` must be a JSON object mapping each declared feature name to
    /// an array of numbers; extra keys are ignored.
    pub fn from_json(input: &Value, features: &[String]) -> Result<Self, PredictError> {
        let object = input.as_object().ok_or(PredictError::NotColumnar)?;

        let mut columns = Vec::with_capacity(features.len());
        let mut rows = None;
        for feature in features {
            let value = object
                .get(feature)
                .ok_or_else(|| PredictError::MissingColumn(feature.clone()))?;
            let cells = value
                .as_array()
                .ok_or_else(|| PredictError::ColumnNotArray(feature.clone()))?;

            let mut column = Vec::with_capacity(cells.len());
            for (row, cell) in cells.iter().enumerate() {
                let number = cell.as_f64().ok_or_else(|| PredictError::NonNumeric {
                    column: feature.clone(),
                    row,
                })?;
                column.push(number);
            }

            let expected = *rows.get_or_insert(column.len());
            if column.len() != expected {
                return Err(PredictError::RaggedColumn {
                    column: feature.clone(),
                    got: column.len(),
                    expected,
                });
            }
            columns.push(column);
        }

        Ok(Self {
            columns,
            rows: rows.unwrap_or(0),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
}

/// The deserialized model. Loaded once at initialization and owned by the
/// handler for the process lifetime; the pipeline only ever calls
/// [`Predictor::predict`] and treats the internals as opaque.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum Predictor {
    /// Linear regressor over the declared feature columns.
    Linear(LinearModel),
    /// Linear scorer thresholded into a 0/1 label.
    Classifier(ClassifierModel),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LinearModel {
    /// Feature column names, in weight order.
    pub features: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClassifierModel {
    /// Feature column names, in weight order.
    pub features: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
    /// Scores at or above this value map to 1.0, everything below to 0.0.
    pub threshold: f64,
}

impl Predictor {
    pub fn features(&self) -> &[String] {
        match self {
            Predictor::Linear(model) => &model.features,
            Predictor::Classifier(model) => &model.features,
        }
    }

    /// Runs the model over every row of the frame. Synchronous and
    /// CPU-bound; the caller owns any timeout.
    pub fn predict(&self, frame: &ColumnFrame) -> Result<Vec<f64>, PredictError> {
        match self {
            Predictor::Linear(model) => score(frame, &model.features, &model.weights, model.intercept),
            Predictor::Classifier(model) => {
                let scores = score(frame, &model.features, &model.weights, model.intercept)?;
                Ok(scores
                    .into_iter()
                    .map(|s| if s >= model.threshold { 1.0 } else { 0.0 })
                    .collect())
            }
        }
    }
}

fn score(
    frame: &ColumnFrame,
    features: &[String],
    weights: &[f64],
    intercept: f64,
) -> Result<Vec<f64>, PredictError> {
    if features.len() != weights.len() {
        return Err(PredictError::WeightMismatch {
            features: features.len(),
            weights: weights.len(),
        });
    }

    let mut scores = vec![intercept; frame.rows];
    for (column, weight) in frame.columns.iter().zip(weights) {
        for (score, cell) in scores.iter_mut().zip(column) {
            *score += weight * cell;
        }
    }
    Ok(scores)
}
