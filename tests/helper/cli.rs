//! CLI test utilities

use std::process::{Command, Output};

use super::resolver::fixtures_root;

/// Run the binary with the fixture tree as its only resource root
pub fn run_with_fixtures(args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_module-version"));
    command
        .args(args)
        .arg("--root")
        .arg(fixtures_root())
        // keep a user's config file out of the way
        .env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .env_remove("RUST_LOG");
    command.output().unwrap()
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
