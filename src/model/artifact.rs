use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::HandlerError;

/// File extension every recognized model artifact carries.
pub const MODEL_EXTENSION: &str = "model";

/// A located on-disk model artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    pub path: PathBuf,
    /// Logical model name: the artifact's filename stem.
    pub name: String,
}

/// Scans `model_dir` (non-recursive) for a `*.model` artifact.
///
/// Known limitation: when the directory holds more than one artifact, the
/// first one in directory enumeration order wins, and that order is
/// platform-dependent.
#[tracing::instrument(level = "trace")]
pub fn locate(model_dir: &Path) -> Result<ModelArtifact, HandlerError> {
    let not_found = || HandlerError::ArtifactNotFound {
        dir: model_dir.to_path_buf(),
    };

    let entries = fs::read_dir(model_dir).map_err(|_| not_found())?;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(OsStr::to_str) != Some(MODEL_EXTENSION) {
            continue;
        }
        let Some(name) = path.file_stem().and_then(OsStr::to_str) else {
            continue;
        };
        let name = name.to_string();
        info!("Prefix for the model artifacts found: {name}");
        return Ok(ModelArtifact { path, name });
    }

    Err(not_found())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn locate_returns_stem_of_single_artifact() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("churn.model"), b"{}").unwrap();
        fs::write(dir.path().join("notes.txt"), b"not a model").unwrap();

        let artifact = locate(dir.path()).unwrap();
        assert_eq!(artifact.name, "churn");
        assert_eq!(artifact.path, dir.path().join("churn.model"));
    }

    #[test]
    fn locate_fails_on_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        let err = locate(dir.path()).unwrap_err();
        assert!(matches!(err, HandlerError::ArtifactNotFound { .. }));
        assert!(err.to_string().contains("no model artifacts found"));
    }

    #[test]
    fn locate_fails_on_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone");
        assert!(matches!(
            locate(&missing).unwrap_err(),
            HandlerError::ArtifactNotFound { .. }
        ));
    }

    #[test]
    fn locate_picks_one_artifact_when_several_exist() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("first.model"), b"{}").unwrap();
        fs::write(dir.path().join("second.model"), b"{}").unwrap();

        let artifact = locate(dir.path()).unwrap();
        assert!(artifact.name == "first" || artifact.name == "second");
    }

    #[test]
    fn locate_ignores_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested.model")).unwrap();
        assert!(matches!(
            locate(dir.path()).unwrap_err(),
            HandlerError::ArtifactNotFound { .. }
        ));
    }
}
