use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::HandlerError;
use crate::model::artifact::MODEL_EXTENSION;
use crate::model::predictor::Predictor;

/// Deserializes the artifact at `model_dir/name.model` into a [`Predictor`].
///
/// The whole artifact is materialized in memory; there is no streaming load.
#[tracing::instrument(level = "trace")]
pub fn load(model_dir: &Path, name: &str) -> Result<Predictor, HandlerError> {
    let path = model_dir.join(format!("{name}.{MODEL_EXTENSION}"));
    if !path.is_file() {
        return Err(HandlerError::ModelFileMissing {
            name: name.to_string(),
            path,
        });
    }

    let deserialization_err = |source: anyhow::Error| HandlerError::Deserialization {
        name: name.to_string(),
        source,
    };
    let bytes = fs::read(&path).map_err(|e| deserialization_err(e.into()))?;
    let predictor = serde_json::from_slice(&bytes).map_err(|e| deserialization_err(e.into()))?;

    info!("Model loaded successfully: {name}");
    Ok(predictor)
}
