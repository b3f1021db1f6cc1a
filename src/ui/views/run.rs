use std::cell::{Cell, RefCell};
use std::io::Write;
use std::path::Path;

use stagehand::config::ConfigWarning;
use stagehand::domain::ports::{ExitPath, ForceReason, RunEvent, RunEventSink};
use stagehand::domain::NameSource;

use crate::ui::blocks::section::SectionBanner;
use crate::ui::blocks::warning::WarningBlock;
use crate::ui::context::UiContext;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Prints run events as console status lines on stdout.
///
/// Remembers the product name (for later lines) and whether the child was
/// ever started (for the closing "Session ended." line).
pub struct ConsoleEventSink {
    ui: UiContext,
    product: RefCell<Option<String>>,
    supervision_started: Cell<bool>,
}

impl ConsoleEventSink {
    pub fn new(ui: UiContext) -> Self {
        Self {
            ui,
            product: RefCell::new(None),
            supervision_started: Cell::new(false),
        }
    }

    pub fn supervision_started(&self) -> bool {
        self.supervision_started.get()
    }

    fn product(&self) -> String {
        self.product
            .borrow()
            .clone()
            .unwrap_or_else(|| "application".to_string())
    }
}

impl RunEventSink for ConsoleEventSink {
    fn on_event(&self, event: RunEvent) {
        match &event {
            RunEvent::ProductResolved { name, .. } => {
                *self.product.borrow_mut() = Some(name.clone());
            }
            RunEvent::ProcessStarted { .. } => self.supervision_started.set(true),
            _ => {}
        }

        let rendered = render_run_event(&event, &self.product(), self.ui.color, self.ui.unicode);
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(rendered.as_bytes());
        let _ = stdout.flush();
    }
}

pub fn render_run_event(
    event: &RunEvent,
    product: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);
    let dim = |text: String| ColoredText::dim(text).render(supports_color);

    match event {
        RunEvent::BuildStarted {
            project_dir,
            command,
        } => format!(
            "{}{}\n{}\n",
            SectionBanner::new(format!("Building {}", dir_name(project_dir)))
                .render(supports_color, supports_unicode),
            dim(format!(
                "{} Project directory: {}",
                icon(Icon::Arrow),
                project_dir.display()
            )),
            dim(format!("{} Running: {}", icon(Icon::Arrow), command)),
        ),
        RunEvent::BuildSucceeded => format!("{} Build succeeded\n", icon(Icon::Success)),
        RunEvent::ProductResolved { name, source } => match source {
            NameSource::Declared => {
                format!("{}\n", dim(format!("{} Product: {}", icon(Icon::Arrow), name)))
            }
            NameSource::DirectoryFallback => format!(
                "{} {}\n",
                icon(Icon::Warning),
                ColoredText::warning(format!(
                    "No package name in manifest, using directory name '{}'",
                    name
                ))
                .render(supports_color)
            ),
        },
        RunEvent::StagingStarted { .. } => {
            SectionBanner::new("Staging build artifacts").render(supports_color, supports_unicode)
        }
        RunEvent::ExecutableStaged { destination } => format!(
            "{} Copied executable {} {}\n",
            icon(Icon::Success),
            icon(Icon::Arrow),
            destination.display()
        ),
        RunEvent::BundleMirrored {
            name,
            destination,
            files,
        } => format!(
            "{} Copied {} ({} {}) {} {}\n",
            icon(Icon::Success),
            name,
            files,
            if *files == 1 { "file" } else { "files" },
            icon(Icon::Arrow),
            destination.display()
        ),
        RunEvent::BundleSkipped { name } => format!(
            "{} {}\n",
            icon(Icon::Warning),
            ColoredText::warning(format!("No {} directory found, skipping.", name))
                .render(supports_color)
        ),
        RunEvent::BundlePruned { name, destination } => format!(
            "{} {}\n",
            icon(Icon::Warning),
            ColoredText::warning(format!(
                "No {} directory found, removed stale copy at {}",
                name,
                destination.display()
            ))
            .render(supports_color)
        ),
        RunEvent::StagingCompleted {
            executable,
            output_dir,
        } => format!(
            "{} Build artifacts prepared in {}\n{}{}\n{}\n{}\n{}{} {}\n",
            icon(Icon::Success),
            output_dir.display(),
            SectionBanner::new("Build complete").render(supports_color, supports_unicode),
            ColoredText::success(format!("{} built successfully!", product))
                .bold()
                .render(supports_color),
            dim(format!("Executable: {}", executable.display())),
            dim(format!("Output dir: {}", output_dir.display())),
            SectionBanner::new(format!("Running {}", product))
                .render(supports_color, supports_unicode),
            icon(Icon::Arrow),
            ColoredText::info(format!("Starting {}... Press Ctrl+C to stop.", product))
                .render(supports_color),
        ),
        RunEvent::ProcessStarted { pid, .. } => format!("{}\n", dim(format!("PID {}", pid))),
        RunEvent::InterruptReceived => format!(
            "\n{} {}\n",
            icon(Icon::Warning),
            ColoredText::warning(format!("Interrupt received, shutting down {}...", product))
                .render(supports_color)
        ),
        RunEvent::ShutdownSignalSent { pid } => format!(
            "{} Shutdown signal sent to PID {}, waiting for it to exit (Ctrl+C again to kill)\n",
            icon(Icon::Signal),
            pid
        ),
        RunEvent::ShutdownSignalFailed { pid, error } => format!(
            "{}\n",
            dim(format!(
                "{} Could not signal PID {}: {}",
                icon(Icon::Warning),
                pid,
                error
            ))
        ),
        RunEvent::ForcedTermination { pid, reason } => {
            let why = match reason {
                ForceReason::RepeatedInterrupt => "Second interrupt",
                ForceReason::GracePeriodElapsed => "Grace period elapsed",
            };
            format!(
                "{} {}\n",
                icon(Icon::Warning),
                ColoredText::warning(format!("{}, killing {} (PID {})", why, product, pid))
                    .render(supports_color)
            )
        }
        RunEvent::ProcessExited { exit, path } => match path {
            ExitPath::Graceful if exit.success() => format!(
                "{} {}\n",
                icon(Icon::Success),
                ColoredText::success(format!("{} stopped cleanly.", product)).render(supports_color)
            ),
            ExitPath::Normal if exit.success() => format!(
                "{} {} exited ({})\n",
                icon(Icon::Success),
                product,
                exit
            ),
            ExitPath::Forced => format!(
                "{} {}\n",
                icon(Icon::Error),
                ColoredText::error(format!("{} was killed ({})", product, exit))
                    .render(supports_color)
            ),
            ExitPath::Graceful | ExitPath::Normal => format!(
                "{} {}\n",
                icon(Icon::Warning),
                ColoredText::warning(format!("{} exited with {}", product, exit))
                    .render(supports_color)
            ),
        },
    }
}

pub fn render_session_ended(supports_color: bool) -> String {
    format!("{}\n", ColoredText::dim("Session ended.").render(supports_color))
}

pub fn render_config_warnings(
    warnings: &[ConfigWarning],
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut out = String::new();
    for warning in warnings {
        let mut block = WarningBlock::new(format!("Unknown config key '{}'", warning.key));
        let location = match warning.line {
            Some(line) => format!("{}:{}", warning.file.display(), line),
            None => warning.file.display().to_string(),
        };
        block.add_line(location);
        if let Some(suggestion) = &warning.suggestion {
            block.add_line(format!("Did you mean '{}'?", suggestion));
        }
        out.push_str(&block.render(supports_color, supports_unicode));
    }
    out
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
