//! Error types and typed identifiers for protogo.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`ErrorKind`] - Every failure the loader and validator can report
//! - [`DeclId`] / [`FileId`] - Stable handles into a parsed package

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod ids;

pub use error::{ArgumentRole, Error, ErrorContext, ErrorKind, Result};
pub use ids::{DeclId, FileId};
