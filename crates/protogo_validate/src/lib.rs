//! Declaration and field-tag validation for protogo.
//!
//! This crate provides:
//! - [`validate_package`] - One fail-fast pass over a parsed package
//! - [`DeclarationWalker`] - The pass itself, for step-by-step use
//! - [`DeclarationIndex`] - Registered types and their claimed field numbers
//! - [`StructValidator`] - Field tag rules for one struct declaration
//! - [`SymbolTable`] - Type names resolved to [`DeclId`]s
//!
//! [`DeclId`]: protogo_foundation::DeclId

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod index;
pub mod report;
pub mod structs;
pub mod symbols;
pub mod tag;
pub mod walker;

pub use config::{DEFAULT_TAG_KEY, ValidatorConfig};
pub use index::DeclarationIndex;
pub use report::{SchemaType, ValidatedPackage};
pub use structs::StructValidator;
pub use symbols::{Symbol, SymbolTable};
pub use tag::TagPattern;
pub use walker::{DeclarationWalker, validate_package};
