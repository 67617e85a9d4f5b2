use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::codec::{self, RequestRecord, ResponseEnvelope};
use crate::context::HandlerContext;
use crate::error::HandlerError;
use crate::invoker;
use crate::logging;
use crate::model::predictor::Predictor;
use crate::model::{artifact, loader};

enum HandlerState {
    Uninitialized,
    Initialized {
        predictor: Predictor,
        model_name: String,
    },
}

/// The handler's lifecycle state machine.
///
/// One instance per worker context. `Uninitialized → Initialized` is the
/// only transition; there is no shutdown state and no built-in retry, the
/// runtime owns process restart policy. Calls into one instance are assumed
/// to be serialized by the runtime; nothing here takes a lock.
pub struct ModelHandler {
    state: HandlerState,
}

impl Default for ModelHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelHandler {
    pub fn new() -> Self {
        Self {
            state: HandlerState::Uninitialized,
        }
    }

    pub fn is_initialized(&self) -> bool {
        matches!(self.state, HandlerState::Initialized { .. })
    }

    /// The loaded model's logical name, once initialized.
    pub fn model_name(&self) -> Option<&str> {
        match &self.state {
            HandlerState::Initialized { model_name, .. } => Some(model_name),
            HandlerState::Uninitialized => None,
        }
    }

    /// Sets up logging, locates the artifact and loads the predictor.
    ///
    /// No-op when already initialized. On failure the error is logged and
    /// propagated, and the state stays `Uninitialized` — the runtime decides
    /// whether to retry startup or abort.
    pub fn initialize(&mut self, ctx: &HandlerContext) -> Result<(), HandlerError> {
        if self.is_initialized() {
            return Ok(());
        }

        let model_dir = PathBuf::from(ctx.model_dir());
        self.initialize_from_dir(&model_dir).map_err(|err| {
            error!("Initialization failure: {err}");
            err
        })
    }

    fn initialize_from_dir(&mut self, model_dir: &Path) -> Result<(), HandlerError> {
        logging::init(model_dir)?;
        let artifact = artifact::locate(model_dir)?;
        let predictor = loader::load(model_dir, &artifact.name)?;
        self.state = HandlerState::Initialized {
            predictor,
            model_name: artifact.name,
        };
        info!("ModelHandler initialized successfully.");
        Ok(())
    }

    /// Services one request: preprocess → infer → postprocess.
    ///
    /// Never returns an error to the caller. Any failure along the pipeline
    /// (including calling before initialization, or an absent/empty batch)
    /// is logged and returned as the `{"error": ...}` envelope.
    pub fn handle(&self, records: Option<&[RequestRecord]>) -> ResponseEnvelope {
        match self.run_pipeline(records) {
            Ok(envelope) => envelope,
            Err(err) => {
                error!("Error in handling the request: {err}");
                ResponseEnvelope::from(err)
            }
        }
    }

    fn run_pipeline(
        &self,
        records: Option<&[RequestRecord]>,
    ) -> Result<ResponseEnvelope, HandlerError> {
        let HandlerState::Initialized { predictor, .. } = &self.state else {
            return Err(HandlerError::NotInitialized);
        };
        let records = match records {
            Some(records) if !records.is_empty() => records,
            _ => return Err(HandlerError::NoData),
        };

        let input = codec::preprocess(records)?;
        let predictions = invoker::infer(predictor, &input)?;
        debug!("raw inference output: {predictions:?}");
        Ok(codec::postprocess(predictions))
    }
}

/// Boundary wrapper consumed by the serving runtime.
///
/// Owns one [`ModelHandler`] per worker context and initializes it lazily on
/// the first request. Every failure, initialization included, becomes an
/// error envelope here — the runtime-facing call can never observe a fault.
/// Runtimes that initialize eagerly and own retry policy call
/// [`ModelHandler::initialize`] directly instead.
#[derive(Default)]
pub struct HandlerService {
    handler: ModelHandler,
}

impl HandlerService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handler(&self) -> &ModelHandler {
        &self.handler
    }

    pub fn handle_request(
        &mut self,
        records: Option<&[RequestRecord]>,
        ctx: &HandlerContext,
    ) -> ResponseEnvelope {
        if !self.handler.is_initialized() {
            if let Err(err) = self.handler.initialize(ctx) {
                error!("Error in request entry point: {err}");
                return ResponseEnvelope::from(err);
            }
        }
        self.handler.handle(records)
    }
}
