//! Argument handling: exactly two positional paths.

mod common;

use common::TestEnv;

const USAGE: &str = "Usage: stagehand <project_dir> <output_dir>";

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    let env = TestEnv::builder().build();
    let result = env.run_raw(&[]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains(USAGE), "stderr: {}", result.stderr);
}

#[test]
fn one_argument_prints_usage_and_exits_1() {
    let env = TestEnv::builder().build();
    let project = env.project_root.path().to_string_lossy().to_string();
    let result = env.run_raw(&[&project]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains(USAGE));
}

#[test]
fn three_arguments_prints_usage_and_exits_1() {
    let env = TestEnv::builder().build();
    let result = env.run_raw(&["a", "b", "c"]);

    assert_eq!(result.exit_code, 1);
    assert!(result.stderr.contains(USAGE));
}

#[test]
fn help_exits_0() {
    let env = TestEnv::builder().build();
    let result = env.run_raw(&["--help"]);

    assert!(result.success);
    assert!(result.stdout.contains("<project_dir>"));
    assert!(result.stdout.contains("--grace-period"));
}

#[test]
fn version_exits_0() {
    let env = TestEnv::builder().build();
    let result = env.run_raw(&["--version"]);

    assert!(result.success);
    assert!(result.stdout.contains(env!("CARGO_PKG_VERSION")));
}
