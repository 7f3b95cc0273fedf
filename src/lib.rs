//! protogo - Pre-generation validator for Go schema declarations
//!
//! This crate re-exports all layers of the protogo system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: protogo_cli        - Command line, logging, reports
//! Layer 2: protogo_validate   - Symbol table, tag rules, declaration walk
//! Layer 1: protogo_syntax     - Lexer, parser, package loader
//! Layer 0: protogo_foundation - Core types (Error, DeclId, FileId)
//! ```

pub use protogo_cli as cli;
pub use protogo_foundation as foundation;
pub use protogo_syntax as syntax;
pub use protogo_validate as validate;
