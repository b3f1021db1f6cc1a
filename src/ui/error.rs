use stagehand::config::CONFIG_FILE_NAME;
use stagehand::StagehandError;

use crate::ui::blocks::error::ErrorBlock;
use crate::ui::context::UiContext;

fn format_stagehand_error_with(
    err: &StagehandError,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let block = match err {
        StagehandError::ProjectDirNotFound { path } => {
            ErrorBlock::new(format!("project directory does not exist: {}", path.display()))
        }
        StagehandError::ManifestNotFound { dir, file } => ErrorBlock::new(format!(
            "no {} found in project directory: {}",
            file,
            dir.display()
        ))
        .with_fix(format!("Point stagehand at the directory that holds {}.", file)),
        StagehandError::OutputOverlapsProject { .. } => ErrorBlock::new(err.to_string())
            .with_fix("Choose an output directory outside the project's asset bundles."),
        StagehandError::InvalidConfig { file, message } => {
            ErrorBlock::new(format!("invalid {}", file.display()))
                .with_detail(message.trim_end())
                .with_fix(format!("Fix or remove {} and try again.", CONFIG_FILE_NAME))
        }
        StagehandError::BuildLaunch { program, source } => {
            ErrorBlock::new(format!("could not run build tool '{}'", program))
                .with_detail(source.to_string())
                .with_fix(format!("Make sure '{}' is installed and on PATH.", program))
        }
        StagehandError::BuildFailed { .. } => ErrorBlock::new("build failed. Exiting.")
            .with_detail(err.to_string()),
        StagehandError::ArtifactNotFound { path } => {
            ErrorBlock::new(format!("built executable not found: {}", path.display())).with_fix(
                format!(
                    "Check that the manifest's first name matches the binary, or set [build] profile in {}.",
                    CONFIG_FILE_NAME
                ),
            )
        }
        other => ErrorBlock::new(other.to_string()),
    };
    block.render(supports_color, supports_unicode)
}

pub fn format_error(err: &anyhow::Error, ui: &UiContext) -> String {
    if let Some(stagehand) = err.downcast_ref::<StagehandError>() {
        return format_stagehand_error_with(stagehand, ui.color, ui.unicode);
    }

    ErrorBlock::new(format!("{:#}", err)).render(ui.color, ui.unicode)
}

pub fn print_error(err: &anyhow::Error, ui: &UiContext) {
    eprint!("{}", format_error(err, ui));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plain_ui() -> UiContext {
        UiContext {
            color: false,
            unicode: false,
        }
    }

    #[test]
    fn build_failure_shows_exit_code() {
        let err = StagehandError::BuildFailed {
            program: "cargo".to_string(),
            code: Some(101),
        };

        let rendered = format_stagehand_error_with(&err, false, false);
        assert!(rendered.starts_with("[FAIL] Error: build failed. Exiting."));
        assert!(rendered.contains("exit code 101"));
    }

    #[test]
    fn artifact_not_found_is_not_a_build_failure_message() {
        let err = StagehandError::ArtifactNotFound {
            path: PathBuf::from("/p/target/release/charmline"),
        };

        let rendered = format_stagehand_error_with(&err, false, true);
        assert!(rendered.contains("built executable not found: /p/target/release/charmline"));
        assert!(!rendered.contains("build failed"));
        assert!(rendered.contains("FIX:"));
    }

    #[test]
    fn launch_failure_suggests_path() {
        let err = StagehandError::BuildLaunch {
            program: "cargo".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        };

        let rendered = format_stagehand_error_with(&err, false, false);
        assert!(rendered.contains("on PATH"));
    }

    #[test]
    fn anyhow_wrapped_stagehand_error_is_formatted() {
        let err = anyhow::Error::from(StagehandError::ProjectDirNotFound {
            path: PathBuf::from("/nope"),
        });

        let rendered = format_error(&err, &plain_ui());
        assert_eq!(
            rendered,
            "[FAIL] Error: project directory does not exist: /nope\n"
        );
    }

    #[test]
    fn other_errors_keep_their_context_chain() {
        let err = anyhow::anyhow!("disk full").context("writing log");
        let rendered = format_error(&err, &plain_ui());
        assert!(rendered.contains("writing log: disk full"));
    }
}
