//! Integration tests for Layer 2: Validate
//!
//! Tests for the declaration walker, struct tag rules and the symbol table,
//! driven through parsed packages.

mod declarations;
mod properties;
mod structs;

use std::path::PathBuf;

use protogo_foundation::Result;
use protogo_syntax::{Package, parse_package};
use protogo_validate::{ValidatedPackage, ValidatorConfig, validate_package};

/// Parses `files` as one package.
pub fn package(files: &[(&str, &str)]) -> Package {
    let sources: Vec<_> = files
        .iter()
        .map(|(path, source)| (PathBuf::from(path), (*source).to_string()))
        .collect();
    parse_package("pkg", &sources).unwrap()
}

/// Validates a single-file package with the default configuration.
pub fn validate(source: &str) -> Result<ValidatedPackage> {
    validate_package(&package(&[("p.go", source)]), &ValidatorConfig::default())
}
