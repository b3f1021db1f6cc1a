//! Reusable test content.

/// Minimal manifest for a product called `charmline`
pub const MANIFEST: &str = r#"[package]
name = "charmline"
version = "0.1.0"
edition = "2021"
"#;

/// `stagehand.toml` whose build copies `server.sh` to where cargo would put
/// the `charmline` executable
pub const FAKE_BUILD_CONFIG: &str = r#"[build]
program = "sh"
args = ["-c", "mkdir -p target/release && cp server.sh target/release/charmline && chmod 755 target/release/charmline"]
"#;

/// Server that prints its working directory and exits
pub const EXITING_SERVER: &str = "#!/bin/sh\necho \"serving from $(pwd -P)\"\nexit 0\n";

/// Server that announces readiness and shuts down cleanly on SIGINT
pub const GRACEFUL_SERVER: &str = "#!/bin/sh\n\
trap 'echo stopping; echo graceful > stopped.txt; exit 0' INT\n\
echo ready > ready.txt\n\
while true; do sleep 0.05; done\n";

/// Server that ignores SIGINT entirely
pub const STUBBORN_SERVER: &str = "#!/bin/sh\n\
trap '' INT\n\
echo ready > ready.txt\n\
while true; do sleep 0.05; done\n";

/// Fake build config with extra `stagehand.toml` sections appended
pub fn fake_build_config_with(extra: &str) -> String {
    format!("{}\n{}", FAKE_BUILD_CONFIG, extra)
}
