use std::path::PathBuf;

use thiserror::Error;

use crate::model::predictor::PredictError;

/// Failure taxonomy for the handler.
///
/// The first four variants can only occur during initialization and are
/// propagated to the caller, which owns any retry policy. The rest occur
/// while servicing a request and are contained by the handler: they are
/// logged and converted into an error [`ResponseEnvelope`] instead of
/// crossing the runtime boundary.
///
/// [`ResponseEnvelope`]: crate::codec::ResponseEnvelope
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error("no model artifacts found in the specified directory: {}", .dir.display())]
    ArtifactNotFound { dir: PathBuf },

    #[error("no model file found for '{name}' at '{}'", .path.display())]
    ModelFileMissing { name: String, path: PathBuf },

    #[error("failed to deserialize model '{name}': {source}")]
    Deserialization {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("failed to open log file at '{}': {source}", .path.display())]
    LogSetup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("request body is not valid UTF-8: {0}")]
    Decode(#[from] std::str::Utf8Error),

    #[error("failed to parse request body as JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("no records to preprocess")]
    EmptyInput,

    #[error("Error during inference: {0}")]
    Inference(#[source] PredictError),

    #[error("Service has not been initialized. Please call initialize first.")]
    NotInitialized,

    #[error("No data provided for handling.")]
    NoData,
}
