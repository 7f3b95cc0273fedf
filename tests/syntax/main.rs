//! Integration tests for Layer 1: Syntax
//!
//! Tests for the lexer, parser, package loader and pretty-printer.

mod lexer;
mod loader;
mod parser;
mod pretty;

use std::path::PathBuf;

/// Path of a directory under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
