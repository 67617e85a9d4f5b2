//! Single-model inference handler for serialized tabular predictors.
//!
//! An external model-server runtime loads this crate, calls
//! [`ModelHandler::initialize`] once per worker (or lets [`HandlerService`]
//! do it lazily on the first request), then feeds it request batches. Each
//! request runs preprocess → infer → postprocess against the one predictor
//! loaded for the process lifetime; request-time failures come back as an
//! `{"error": ...}` envelope, never as a fault across the boundary.

pub mod codec;
pub mod context;
pub mod error;
pub mod handler;
pub mod invoker;
mod logging;
pub mod model;

pub use codec::{postprocess, preprocess, RequestRecord, ResponseEnvelope, StructuredInput};
pub use context::HandlerContext;
pub use error::HandlerError;
pub use handler::{HandlerService, ModelHandler};
pub use model::artifact::{locate, ModelArtifact, MODEL_EXTENSION};
pub use model::loader::load;
pub use model::predictor::{ClassifierModel, LinearModel, PredictError, Predictor};
