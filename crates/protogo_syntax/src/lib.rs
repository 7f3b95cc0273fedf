//! Lexer, parser, and package loader for Go source.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization with Go's semicolon insertion
//! - [`Parser`] - Parsing package-scope declarations into the [`ast`]
//! - [`load_package`] - Reading and merging one package directory
//! - [`pretty`] - Printing parsed declarations back as Go
//! - [`visitor`] - Walking declarations in source order

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod ast;
pub mod lexer;
pub mod package;
pub mod parser;
pub mod pretty;
pub mod span;
pub mod token;
pub mod visitor;

pub use ast::{Decl, DeclKind, Package, SourceFile, TypeExpr};
pub use lexer::Lexer;
pub use package::{load_package, parse_package};
pub use parser::{Parser, parse_file};
pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
