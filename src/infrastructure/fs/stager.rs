//! Artifact Stager
//!
//! Copies the built executable and its asset bundles into the output
//! directory. Every destination is replaced wholesale, never merged, so a
//! second run over the same output directory leaves it exactly as the first.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use walkdir::WalkDir;

use crate::domain::ports::{RunEvent, RunEventSink};
use crate::domain::ProjectLayout;
use crate::error::{StagehandError, StagehandResult};

/// What happened to one asset bundle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleOutcome {
    /// Source tree copied; any previous copy was removed first
    Mirrored { destination: PathBuf, files: usize },
    /// No source directory and nothing stale to remove
    Skipped,
    /// No source directory; a stale mirror from an earlier run was removed
    Pruned { destination: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleReport {
    pub name: String,
    pub outcome: BundleOutcome,
}

/// Result of a full staging pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingReport {
    pub executable: PathBuf,
    pub bundles: Vec<BundleReport>,
}

/// Stages build output into a single output directory
#[derive(Debug, Clone)]
pub struct ArtifactStager {
    output_dir: PathBuf,
}

impl ArtifactStager {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Create the output directory and any missing parents.
    pub fn ensure_output_dir(&self) -> StagehandResult<()> {
        fs::create_dir_all(&self.output_dir)
            .map_err(|e| StagehandError::staging(&self.output_dir, e))
    }

    /// Stage the executable, then every bundle in order, reporting each step.
    pub fn stage(
        &self,
        artifact: &Path,
        layout: &ProjectLayout,
        bundles: &[String],
        events: &dyn RunEventSink,
    ) -> StagehandResult<StagingReport> {
        self.ensure_output_dir()?;

        let executable = self.stage_executable(artifact)?;
        events.on_event(RunEvent::ExecutableStaged {
            destination: executable.clone(),
        });

        let mut reports = Vec::with_capacity(bundles.len());
        for name in bundles {
            let outcome = self.mirror_bundle(&layout.bundle_dir(name), name)?;
            events.on_event(match &outcome {
                BundleOutcome::Mirrored { destination, files } => RunEvent::BundleMirrored {
                    name: name.clone(),
                    destination: destination.clone(),
                    files: *files,
                },
                BundleOutcome::Skipped => RunEvent::BundleSkipped { name: name.clone() },
                BundleOutcome::Pruned { destination } => RunEvent::BundlePruned {
                    name: name.clone(),
                    destination: destination.clone(),
                },
            });
            reports.push(BundleReport {
                name: name.clone(),
                outcome,
            });
        }

        Ok(StagingReport {
            executable,
            bundles: reports,
        })
    }

    /// Copy the executable to the top of the output directory, keeping its
    /// file name, permission bits and timestamps.
    pub fn stage_executable(&self, artifact: &Path) -> StagehandResult<PathBuf> {
        let file_name = match artifact.file_name() {
            Some(name) if artifact.is_file() => name,
            _ => {
                return Err(StagehandError::ArtifactNotFound {
                    path: artifact.to_path_buf(),
                })
            }
        };

        let destination = self.output_dir.join(file_name);
        if same_file(artifact, &destination) {
            return Err(StagehandError::staging(
                &destination,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "destination is the built executable itself",
                ),
            ));
        }
        if destination.symlink_metadata().is_ok() {
            remove_path(&destination).map_err(|e| StagehandError::staging(&destination, e))?;
        }

        copy_file_preserving(artifact, &destination)
            .map_err(|e| StagehandError::staging(&destination, e))?;

        tracing::debug!(
            from = %artifact.display(),
            to = %destination.display(),
            "staged executable"
        );
        Ok(destination)
    }

    /// Replace `<output_dir>/<name>` with a fresh copy of `source`.
    ///
    /// A missing source is not an error. If a mirror from an earlier run is
    /// still sitting in the output directory it is removed.
    pub fn mirror_bundle(&self, source: &Path, name: &str) -> StagehandResult<BundleOutcome> {
        let destination = self.output_dir.join(name);
        let stale = destination.symlink_metadata().is_ok();

        if !source.is_dir() {
            if stale {
                remove_path(&destination).map_err(|e| StagehandError::staging(&destination, e))?;
                tracing::debug!(bundle = name, "removed stale mirror");
                return Ok(BundleOutcome::Pruned { destination });
            }
            tracing::debug!(bundle = name, source = %source.display(), "bundle not present");
            return Ok(BundleOutcome::Skipped);
        }

        if stale {
            remove_path(&destination).map_err(|e| StagehandError::staging(&destination, e))?;
        }

        let files = copy_tree(source, &destination)?;
        tracing::debug!(bundle = name, files, "mirrored bundle");
        Ok(BundleOutcome::Mirrored { destination, files })
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn remove_path(path: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(path)?;
    if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

/// `fs::copy` carries the permission bits; timestamps are copied separately.
fn copy_file_preserving(source: &Path, destination: &Path) -> io::Result<()> {
    fs::copy(source, destination)?;
    copy_times(source, destination)
}

fn copy_times(source: &Path, destination: &Path) -> io::Result<()> {
    let meta = fs::metadata(source)?;
    filetime::set_file_times(
        destination,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
}

/// Recursively copy `source` into `destination` (which must not exist yet).
/// Symlinks are followed. Returns the number of files copied.
fn copy_tree(source: &Path, destination: &Path) -> StagehandResult<usize> {
    let mut files = 0;

    // Directories come after their contents so their metadata is applied last.
    for entry in WalkDir::new(source).follow_links(true).contents_first(true) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(source).to_path_buf();
            StagehandError::staging(path, e.into())
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| StagehandError::staging(entry.path(), io::Error::other(e)))?;
        let target = destination.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| StagehandError::staging(&target, e))?;
            let perms = entry
                .metadata()
                .map_err(|e| StagehandError::staging(entry.path(), e.into()))?
                .permissions();
            fs::set_permissions(&target, perms)
                .and_then(|_| copy_times(entry.path(), &target))
                .map_err(|e| StagehandError::staging(&target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).map_err(|e| StagehandError::staging(parent, e))?;
            }
            copy_file_preserving(entry.path(), &target)
                .map_err(|e| StagehandError::staging(&target, e))?;
            files += 1;
        }
    }

    Ok(files)
}
