use std::collections::HashMap;

pub(crate) const MODEL_DIR_PROPERTY: &str = "model_dir";
pub(crate) const DEFAULT_MODEL_DIR: &str = "./";

/// Context supplied by the external serving runtime at initialization.
///
/// Carries the runtime's system properties as plain strings. The handler
/// only reads from it; the runtime keeps ownership of the values it was
/// built from.
#[derive(Debug, Clone, Default)]
pub struct HandlerContext {
    system_properties: HashMap<String, String>,
}

impl HandlerContext {
    pub fn new(system_properties: HashMap<String, String>) -> Self {
        Self { system_properties }
    }

    /// Shorthand for a context that only sets the model directory.
    pub fn with_model_dir(model_dir: impl Into<String>) -> Self {
        let mut system_properties = HashMap::new();
        system_properties.insert(MODEL_DIR_PROPERTY.to_string(), model_dir.into());
        Self { system_properties }
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.system_properties.get(key).map(String::as_str)
    }

    /// The directory holding the model artifact, `"./"` when the runtime
    /// did not set one.
    pub fn model_dir(&self) -> &str {
        self.property(MODEL_DIR_PROPERTY).unwrap_or(DEFAULT_MODEL_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_dir_defaults_to_current_dir() {
        let ctx = HandlerContext::default();
        assert_eq!(ctx.model_dir(), "./");
    }

    #[test]
    fn model_dir_reads_system_property() {
        let ctx = HandlerContext::with_model_dir("/opt/ml/model");
        assert_eq!(ctx.model_dir(), "/opt/ml/model");
        assert_eq!(ctx.property("model_dir"), Some("/opt/ml/model"));
    }
}
