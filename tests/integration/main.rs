//! Cross-layer integration tests for protogo
//!
//! Tests that load fixture packages from disk and run them through the
//! command-line front end.

mod cli;
mod fixtures;

use std::path::PathBuf;

use protogo_cli::{Args, Report, run};

/// Path of a directory under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Arguments for checking one fixture with default settings.
pub fn args(name: &str) -> Args {
    Args {
        path: fixture(name),
        tag_key: protogo_validate::DEFAULT_TAG_KEY.to_string(),
        dump_ast: false,
        positions: false,
        json: false,
        verbose: 0,
    }
}

/// Runs the tool, returning its result and everything it printed.
pub fn run_captured(args: &Args) -> (anyhow::Result<Report>, String) {
    let mut out = Vec::new();
    let result = run(args, &mut out);
    (result, String::from_utf8(out).unwrap())
}
