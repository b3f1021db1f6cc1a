//! Build-stage-supervise pipeline
//!
//! ## Flow
//!
//! 1. Validate inputs ([`RunPlan::resolve`], no side effects)
//! 2. Invoke the build tool
//! 3. Read the product name from the manifest
//! 4. Locate the built executable
//! 5. Stage the executable and asset bundles into the output directory
//! 6. Supervise the staged executable until it exits
//!
//! Every step short-circuits the rest on failure.

use std::path::{Path, PathBuf};

use crate::application::supervise::{SupervisionOutcome, Supervisor, SupervisorOptions};
use crate::config::{Config, ConfigWarning};
use crate::domain::ports::{BuildTool, ProcessControl, RunEvent, RunEventSink};
use crate::domain::{BuildManifest, ProjectLayout, MANIFEST_FILE};
use crate::error::{StagehandError, StagehandResult};
use crate::infrastructure::{ArtifactStager, StagingReport};
use crate::interrupt::Interrupts;

/// Validated inputs for one run
#[derive(Debug, Clone)]
pub struct RunPlan {
    project_dir: PathBuf,
    output_dir: PathBuf,
    config: Config,
    warnings: Vec<ConfigWarning>,
}

impl RunPlan {
    /// Check the command-line paths and load the project config.
    ///
    /// Nothing is created or modified. The project directory is canonicalized
    /// and the output directory made absolute against the current directory.
    pub fn resolve(project_arg: &Path, output_arg: &Path) -> StagehandResult<Self> {
        if !project_arg.is_dir() {
            return Err(StagehandError::ProjectDirNotFound {
                path: project_arg.to_path_buf(),
            });
        }
        let project_dir = project_arg.canonicalize()?;

        if !project_dir.join(MANIFEST_FILE).is_file() {
            return Err(StagehandError::ManifestNotFound {
                dir: project_dir,
                file: MANIFEST_FILE,
            });
        }

        let (config, warnings) = Config::load_for_project(&project_dir)?;
        let output_dir = absolute_output_dir(output_arg)?;
        let profile_dir =
            absolute_output_dir(&ProjectLayout::new(&project_dir, &config.build).profile_dir())?;
        check_overlap(&project_dir, &output_dir, &profile_dir, &config.stage.bundles)?;

        tracing::debug!(
            project = %project_dir.display(),
            output = %output_dir.display(),
            "resolved run plan"
        );

        Ok(Self {
            project_dir,
            output_dir,
            config,
            warnings,
        })
    }

    /// Override the configured grace period (CLI flag).
    pub fn with_grace_period_secs(mut self, secs: u64) -> Self {
        self.config.supervise.grace_period_secs = secs;
        self
    }

    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Unknown-key warnings from `stagehand.toml`
    pub fn warnings(&self) -> &[ConfigWarning] {
        &self.warnings
    }

    pub fn layout(&self) -> ProjectLayout {
        ProjectLayout::new(&self.project_dir, &self.config.build)
    }
}

/// Absolute output path with symlinks resolved in whatever prefix of it
/// already exists, so it compares cleanly against the canonical project dir.
fn absolute_output_dir(output_arg: &Path) -> StagehandResult<PathBuf> {
    let absolute = std::path::absolute(output_arg)?;
    for existing in absolute.ancestors() {
        if let Ok(canonical) = existing.canonicalize() {
            let rest = absolute.strip_prefix(existing).unwrap_or(Path::new(""));
            return Ok(if rest.as_os_str().is_empty() {
                canonical
            } else {
                canonical.join(rest)
            });
        }
    }
    Ok(absolute)
}

/// Staging replaces `<output>/<bundle>` and `<output>/<executable>` wholesale.
/// The output directory must not be the project itself or the build profile
/// directory, sit inside a bundle source, or contain the project at a bundle
/// destination.
fn check_overlap(
    project_dir: &Path,
    output_dir: &Path,
    profile_dir: &Path,
    bundles: &[String],
) -> StagehandResult<()> {
    let overlaps = output_dir == project_dir
        || output_dir == profile_dir
        || bundles.iter().any(|bundle| {
            output_dir.starts_with(project_dir.join(bundle))
                || project_dir.starts_with(output_dir.join(bundle))
        });

    if overlaps {
        return Err(StagehandError::OutputOverlapsProject {
            output: output_dir.to_path_buf(),
            project: project_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Everything a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub product: BuildManifest,
    pub staging: StagingReport,
    pub outcome: SupervisionOutcome,
}

/// Drives one run of the pipeline against injected ports
pub struct Orchestrator<'a> {
    plan: &'a RunPlan,
    build_tool: &'a dyn BuildTool,
    process_control: &'a dyn ProcessControl,
    events: &'a dyn RunEventSink,
    interrupts: Interrupts,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        plan: &'a RunPlan,
        build_tool: &'a dyn BuildTool,
        process_control: &'a dyn ProcessControl,
        events: &'a dyn RunEventSink,
        interrupts: Interrupts,
    ) -> Self {
        Self {
            plan,
            build_tool,
            process_control,
            events,
            interrupts,
        }
    }

    pub fn run(&self) -> StagehandResult<RunSummary> {
        let layout = self.plan.layout();

        self.build()?;
        self.check_interrupted("staging")?;

        let product = BuildManifest::read(layout.project_dir())?;
        self.events.on_event(RunEvent::ProductResolved {
            name: product.product_name.clone(),
            source: product.source,
        });

        // Checked before the output directory is created so a build that
        // produced nothing leaves the filesystem alone.
        let artifact = layout.artifact_path(&product.product_name);
        if !artifact.is_file() {
            return Err(StagehandError::ArtifactNotFound { path: artifact });
        }

        let stager = ArtifactStager::new(self.plan.output_dir());
        self.events.on_event(RunEvent::StagingStarted {
            output_dir: stager.output_dir().to_path_buf(),
        });
        let staging = stager.stage(
            &artifact,
            &layout,
            &self.plan.config().stage.bundles,
            self.events,
        )?;
        self.events.on_event(RunEvent::StagingCompleted {
            executable: staging.executable.clone(),
            output_dir: stager.output_dir().to_path_buf(),
        });
        tracing::info!(
            executable = %staging.executable.display(),
            bundles = staging.bundles.len(),
            "staging complete"
        );

        self.check_interrupted("launch")?;

        let options = SupervisorOptions::from(&self.plan.config().supervise);
        let mut supervisor = Supervisor::new(
            self.process_control,
            self.interrupts.clone(),
            options,
            self.events,
        );
        let outcome = supervisor.run(&staging.executable, stager.output_dir())?;
        tracing::info!(pid = outcome.pid, exit = %outcome.exit, "supervision finished");

        Ok(RunSummary {
            product,
            staging,
            outcome,
        })
    }

    fn build(&self) -> StagehandResult<()> {
        self.events.on_event(RunEvent::BuildStarted {
            project_dir: self.plan.project_dir().to_path_buf(),
            command: self.build_tool.describe(),
        });

        match self.build_tool.build(self.plan.project_dir()) {
            Ok(()) => {
                self.events.on_event(RunEvent::BuildSucceeded);
                tracing::info!("build succeeded");
                Ok(())
            }
            // Ctrl+C reaches the build tool too; report the interrupt rather
            // than the failure it caused.
            Err(err) if self.interrupts.any() => {
                tracing::debug!(error = %err, "build ended after interrupt");
                Err(StagehandError::Interrupted {
                    stage: "the build finished",
                })
            }
            Err(err) => Err(err),
        }
    }

    fn check_interrupted(&self, stage: &'static str) -> StagehandResult<()> {
        if self.interrupts.any() {
            return Err(StagehandError::Interrupted { stage });
        }
        Ok(())
    }
}
