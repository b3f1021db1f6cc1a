//! Error types for Stagehand
//!
//! Library code returns `StagehandError`; the binary renders it as a single
//! colored diagnostic and exits non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Stagehand operations
pub type StagehandResult<T> = Result<T, StagehandError>;

/// Broad failure categories, used to pick the diagnostic shown to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad inputs detected before any side effect
    Precondition,
    /// The external build tool failed or could not be launched
    Build,
    /// The build reported success but its output is not where we expect it
    Consistency,
    /// Copying into the output directory failed
    Staging,
    /// Launching or waiting on the supervised child failed
    Supervision,
    /// The operator interrupted the run before the child was started
    Interrupted,
}

/// Main error type for Stagehand operations
#[derive(Error, Debug)]
pub enum StagehandError {
    /// Project directory does not exist (or is not a directory)
    #[error("project directory does not exist: {path}")]
    ProjectDirNotFound { path: PathBuf },

    /// Project directory has no manifest file
    #[error("no {file} found in project directory: {dir}")]
    ManifestNotFound { dir: PathBuf, file: &'static str },

    /// Output directory would overwrite project files when staged into
    #[error("output directory {output} overlaps project directory {project}")]
    OutputOverlapsProject { output: PathBuf, project: PathBuf },

    /// stagehand.toml could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// Build tool could not be started at all
    #[error("failed to launch build tool '{program}': {source}")]
    BuildLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Build tool ran and exited non-zero
    #[error("build failed: '{program}' exited with {}", describe_code(*code))]
    BuildFailed { program: String, code: Option<i32> },

    /// Manifest vanished or became unreadable between validation and build
    #[error("failed to read manifest {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Build reported success but the executable is missing
    #[error("built executable not found: {path}")]
    ArtifactNotFound { path: PathBuf },

    /// Copy/remove/create failure while staging
    #[error("failed to stage {path}: {source}")]
    Staging {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Staged executable could not be spawned
    #[error("failed to start {path}: {source}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Waiting on the child failed
    #[error("lost track of supervised process: {0}")]
    Supervision(#[source] std::io::Error),

    /// Ctrl+C arrived before the child was running
    #[error("interrupted before {stage}")]
    Interrupted { stage: &'static str },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StagehandError {
    pub fn class(&self) -> ErrorClass {
        match self {
            StagehandError::ProjectDirNotFound { .. }
            | StagehandError::ManifestNotFound { .. }
            | StagehandError::OutputOverlapsProject { .. }
            | StagehandError::InvalidConfig { .. }
            | StagehandError::Io(_) => ErrorClass::Precondition,
            StagehandError::BuildLaunch { .. } | StagehandError::BuildFailed { .. } => {
                ErrorClass::Build
            }
            StagehandError::ManifestRead { .. } | StagehandError::ArtifactNotFound { .. } => {
                ErrorClass::Consistency
            }
            StagehandError::Staging { .. } => ErrorClass::Staging,
            StagehandError::Spawn { .. } | StagehandError::Supervision(_) => {
                ErrorClass::Supervision
            }
            StagehandError::Interrupted { .. } => ErrorClass::Interrupted,
        }
    }

    /// Wrap an IO error raised while touching `path` during staging.
    pub fn staging(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StagehandError::Staging {
            path: path.into(),
            source,
        }
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_build_failed() {
        let err = StagehandError::BuildFailed {
            program: "cargo".to_string(),
            code: Some(101),
        };
        assert_eq!(err.to_string(), "build failed: 'cargo' exited with exit code 101");
    }

    #[test]
    fn test_error_display_build_killed_by_signal() {
        let err = StagehandError::BuildFailed {
            program: "cargo".to_string(),
            code: None,
        };
        assert!(err.to_string().contains("terminated by signal"));
    }

    #[test]
    fn test_artifact_not_found_is_distinct_from_build_failure() {
        let missing = StagehandError::ArtifactNotFound {
            path: PathBuf::from("/p/target/release/charmline"),
        };
        let failed = StagehandError::BuildFailed {
            program: "cargo".to_string(),
            code: Some(1),
        };

        assert_eq!(missing.class(), ErrorClass::Consistency);
        assert_eq!(failed.class(), ErrorClass::Build);
        assert!(missing.to_string().contains("built executable not found"));
    }

    #[test]
    fn test_manifest_read_after_build_is_consistency_error() {
        let err = StagehandError::ManifestRead {
            path: PathBuf::from("/srv/app/Cargo.toml"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(err.class(), ErrorClass::Consistency);
        assert!(err.to_string().starts_with("failed to read manifest /srv/app/Cargo.toml"));
    }

    #[test]
    fn test_manifest_not_found_names_file_and_dir() {
        let err = StagehandError::ManifestNotFound {
            dir: PathBuf::from("/srv/app"),
            file: "Cargo.toml",
        };
        assert_eq!(
            err.to_string(),
            "no Cargo.toml found in project directory: /srv/app"
        );
        assert_eq!(err.class(), ErrorClass::Precondition);
    }
}
