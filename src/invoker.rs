use tracing::error;

use crate::codec::StructuredInput;
use crate::error::HandlerError;
use crate::model::predictor::{ColumnFrame, Predictor};

/// Runs the loaded predictor over structured request input.
///
/// The input is shaped into the predictor's column frame first; anything the
/// predictor cannot consume (non-object input, missing feature columns,
/// ragged or non-numeric columns) surfaces as an inference error carrying
/// the underlying cause. The call blocks until the prediction completes;
/// timeouts are the runtime's concern.
#[tracing::instrument(level = "trace", skip(predictor))]
pub fn infer(predictor: &Predictor, input: &StructuredInput) -> Result<Vec<f64>, HandlerError> {
    ColumnFrame::from_json(input, predictor.features())
        .and_then(|frame| predictor.predict(&frame))
        .map_err(|e| {
            let err = HandlerError::Inference(e);
            error!("{err}");
            err
        })
}
