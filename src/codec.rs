use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

use crate::error::HandlerError;

/// One item of an inbound request batch. The body is expected to be UTF-8
/// encoded JSON text mapping column names to arrays of values.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestRecord {
    pub body: Vec<u8>,
}

impl RequestRecord {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self { body: body.into() }
    }
}

/// The JSON value decoded from a request body.
pub type StructuredInput = Value;

/// What the serving runtime gets back: either the whole prediction batch as
/// the single element of an outer sequence, or `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseEnvelope {
    Predictions(Vec<Vec<f64>>),
    Error { error: String },
}

impl ResponseEnvelope {
    pub fn error(message: impl Into<String>) -> Self {
        ResponseEnvelope::Error {
            error: message.into(),
        }
    }
}

impl From<HandlerError> for ResponseEnvelope {
    fn from(err: HandlerError) -> Self {
        ResponseEnvelope::error(err.to_string())
    }
}

/// Decodes a request batch into the model input.
///
/// Every record's body must decode as UTF-8 and parse as JSON, but only the
/// **last** record's value is returned; earlier values are discarded. That
/// last-record-wins behavior is part of the existing wire contract and is
/// kept as-is.
pub fn preprocess(records: &[RequestRecord]) -> Result<StructuredInput, HandlerError> {
    let mut decoded = None;
    for record in records {
        let text = std::str::from_utf8(&record.body).map_err(|e| {
            error!("Error in preprocessing data: {e}");
            HandlerError::Decode(e)
        })?;
        let value = serde_json::from_str(text).map_err(|e| {
            error!("Error in preprocessing data: {e}");
            HandlerError::Parse(e)
        })?;
        decoded = Some(value);
    }
    decoded.ok_or(HandlerError::EmptyInput)
}

/// Wraps the prediction batch as the sole element of the outer sequence.
/// Pure structural wrap, no value transformation.
pub fn postprocess(predictions: Vec<f64>) -> ResponseEnvelope {
    ResponseEnvelope::Predictions(vec![predictions])
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn preprocess_decodes_single_record() {
        let records = [RequestRecord::new(br#"{"a": [1, 2]}"#.to_vec())];
        assert_eq!(preprocess(&records).unwrap(), json!({"a": [1, 2]}));
    }

    #[test]
    fn preprocess_keeps_only_last_record() {
        // Existing wire contract: with a multi-record batch, earlier bodies
        // are decoded then discarded.
        let records = [
            RequestRecord::new(br#"{"a": [1]}"#.to_vec()),
            RequestRecord::new(br#"{"b": [2]}"#.to_vec()),
        ];
        assert_eq!(preprocess(&records).unwrap(), json!({"b": [2]}));
    }

    #[test]
    fn preprocess_fails_on_empty_batch() {
        assert!(matches!(preprocess(&[]), Err(HandlerError::EmptyInput)));
    }

    #[test]
    fn preprocess_fails_on_invalid_utf8() {
        let records = [RequestRecord::new(vec![0xff, 0xfe, 0xfd])];
        assert!(matches!(
            preprocess(&records),
            Err(HandlerError::Decode(_))
        ));
    }

    #[test]
    fn preprocess_fails_on_invalid_json() {
        let records = [RequestRecord::new(b"{not json".to_vec())];
        assert!(matches!(preprocess(&records), Err(HandlerError::Parse(_))));
    }

    #[test]
    fn postprocess_wraps_batch_once() {
        let envelope = postprocess(vec![0.1, 0.2]);
        assert_eq!(envelope, ResponseEnvelope::Predictions(vec![vec![0.1, 0.2]]));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!([[0.1, 0.2]])
        );
    }

    #[test]
    fn error_envelope_serializes_to_error_object() {
        let envelope = ResponseEnvelope::error("boom");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"error": "boom"})
        );
    }
}
