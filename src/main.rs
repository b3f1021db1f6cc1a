//! Stagehand CLI - build, stage and supervise a server binary
//!
//! Usage: stagehand <project_dir> <output_dir>

mod cli;
mod ui;

use std::process::ExitCode;

use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stagehand::config::OutputConfig;
use stagehand::infrastructure::{platform_control, CommandBuildTool};
use stagehand::{Interrupts, Orchestrator, RunPlan};

use crate::cli::{is_arity_error, Cli, USAGE};
use crate::ui::context::UiContext;
use crate::ui::error::print_error;
use crate::ui::primitives::text::ColoredText;
use crate::ui::views::run::{render_config_warnings, render_session_ended, ConsoleEventSink};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => return handle_parse_error(err),
    };

    init_tracing(cli.verbose);

    let interrupts = Interrupts::new();
    if let Err(err) = interrupts.install_ctrlc_handler() {
        tracing::warn!(error = %err, "could not install Ctrl+C handler");
    }

    let plan = match RunPlan::resolve(&cli.project_dir, &cli.output_dir) {
        Ok(plan) => plan,
        Err(err) => {
            let ui = UiContext::new(cli.color, &OutputConfig::default());
            print_error(&err.into(), &ui);
            return ExitCode::from(1);
        }
    };
    let plan = match cli.grace_period {
        Some(secs) => plan.with_grace_period_secs(secs),
        None => plan,
    };

    let ui = UiContext::new(cli.color, &plan.config().output);
    match run(&plan, &ui, interrupts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err, &ui);
            ExitCode::from(1)
        }
    }
}

fn run(plan: &RunPlan, ui: &UiContext, interrupts: Interrupts) -> Result<()> {
    eprint!(
        "{}",
        render_config_warnings(plan.warnings(), ui.color, ui.unicode)
    );

    let build_tool = CommandBuildTool::from_config(&plan.config().build);
    let process_control = platform_control();
    tracing::debug!(backend = process_control.name(), "process control selected");

    let sink = ConsoleEventSink::new(*ui);
    let result = Orchestrator::new(
        plan,
        &build_tool,
        process_control.as_ref(),
        &sink,
        interrupts,
    )
    .run();

    if sink.supervision_started() {
        print!("{}", render_session_ended(ui.color));
    }

    result?;
    Ok(())
}

fn handle_parse_error(err: clap::Error) -> ExitCode {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            ExitCode::SUCCESS
        }
        kind if is_arity_error(kind) => {
            let ui = UiContext::new(None, &OutputConfig::default());
            eprintln!(
                "{} {}",
                ColoredText::warning("Usage:").render(ui.color),
                ColoredText::plain(USAGE).bold().render(ui.color)
            );
            ExitCode::from(1)
        }
        _ => {
            let _ = err.print();
            ExitCode::from(1)
        }
    }
}

/// `-v` info, `-vv` debug, `-vvv` trace; warn otherwise. `RUST_LOG` wins.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
