pub mod artifact;
pub mod loader;
pub mod predictor;
