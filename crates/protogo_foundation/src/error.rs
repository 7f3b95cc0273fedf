//! Error types for protogo.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Loader failures (I/O, parsing, package discovery) and validation
//! failures share one [`ErrorKind`] so a caller can halt on the first
//! error of either family.

use std::fmt;

use thiserror::Error;

/// Result type used throughout protogo.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for protogo operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: err.to_string(),
        })
    }

    /// Creates a missing tag error.
    #[must_use]
    pub fn missing_tag(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingTag {
            type_name: type_name.into(),
            field: field.into(),
        })
    }

    /// Creates a duplicate tag error.
    #[must_use]
    pub fn duplicate_tag(type_name: impl Into<String>, field: impl Into<String>, number: u32) -> Self {
        Self::new(ErrorKind::DuplicateTag {
            type_name: type_name.into(),
            field: field.into(),
            number,
        })
    }

    /// Creates an undeclared schema type error.
    #[must_use]
    pub fn undeclared_schema_type(referrer: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndeclaredSchemaType {
            referrer: referrer.into(),
            type_name: type_name.into(),
        })
    }

    /// Creates a non-schema argument error.
    #[must_use]
    pub fn non_schema_argument(
        function: impl Into<String>,
        role: ArgumentRole,
        position: usize,
        type_text: impl Into<String>,
    ) -> Self {
        Self::new(ErrorKind::NonSchemaArgument {
            function: function.into(),
            role,
            position,
            type_text: type_text.into(),
        })
    }

    /// Returns true if this error is a validation failure over the
    /// declaration set rather than a failure to load the package.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::MissingTag { .. }
                | ErrorKind::MalformedTag { .. }
                | ErrorKind::InvalidTagNumber { .. }
                | ErrorKind::DuplicateTag { .. }
                | ErrorKind::AnonymousStructNotAllowed { .. }
                | ErrorKind::UndeclaredSchemaType { .. }
                | ErrorKind::NonSchemaArgument { .. }
                | ErrorKind::UnknownVariableType { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Parse error in a source file.
    #[error("parse error at {line}:{column}: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// Column number (1-indexed).
        column: u32,
        /// The source line where the error occurred.
        context: String,
    },

    /// A file or directory could not be read.
    #[error("failed to read {path}: {message}")]
    Io {
        /// The path that could not be read.
        path: String,
        /// The underlying I/O error message.
        message: String,
    },

    /// The directory holds no Go source files.
    #[error("no Go source files in {path}")]
    NoSourceFiles {
        /// The directory that was searched.
        path: String,
    },

    /// The directory does not hold exactly one package.
    #[error("{path} must contain exactly one package, found {}: [{}]", found.len(), found.join(", "))]
    PackageCount {
        /// The directory that was loaded.
        path: String,
        /// The package names that were found.
        found: Vec<String>,
    },

    /// The configured tag key cannot appear in a struct tag.
    #[error("invalid tag key {key:?}: {message}")]
    InvalidTagKey {
        /// The rejected key.
        key: String,
        /// Why it was rejected.
        message: String,
    },

    /// An exported field carries no tag at all.
    #[error("{type_name}.{field}: expected a field tag")]
    MissingTag {
        /// The struct declaration owning the field.
        type_name: String,
        /// The offending field.
        field: String,
    },

    /// The tag does not hold exactly one recognized annotation.
    #[error("{type_name}.{field}: expected one field tag annotation, got {matches} in {tag:?}")]
    MalformedTag {
        /// The struct declaration owning the field.
        type_name: String,
        /// The offending field.
        field: String,
        /// The full tag text.
        tag: String,
        /// How many annotations were found.
        matches: usize,
    },

    /// The annotation value is not a valid non-negative integer.
    #[error("{type_name}.{field}: bad field tag number {value:?}")]
    InvalidTagNumber {
        /// The struct declaration owning the field.
        type_name: String,
        /// The offending field.
        field: String,
        /// The annotation value that failed to parse.
        value: String,
    },

    /// Two exported fields of one declaration claim the same number.
    #[error("{type_name}.{field}: duplicate field tag number {number}")]
    DuplicateTag {
        /// The struct declaration owning the field.
        type_name: String,
        /// The field that repeated the number.
        field: String,
        /// The repeated number.
        number: u32,
    },

    /// An exported variable is declared with an inline struct type.
    #[error("cannot use anonymous struct for exported variable {variable}")]
    AnonymousStructNotAllowed {
        /// The offending variable.
        variable: String,
    },

    /// A referenced type is not a registered schema type.
    #[error("{referrer}: type {type_name} must be a separately declared, exported type")]
    UndeclaredSchemaType {
        /// The variable or function making the reference.
        referrer: String,
        /// The referenced type as written.
        type_name: String,
    },

    /// A function parameter or result is not a schema type.
    #[error("function must use schema types ({function}, {role} {position}: {type_text})")]
    NonSchemaArgument {
        /// The offending function.
        function: String,
        /// Whether the position is among parameters or results.
        role: ArgumentRole,
        /// 0-based position in the parameter or result list.
        position: usize,
        /// The type expression as written.
        type_text: String,
    },

    /// An exported variable's type cannot be determined syntactically.
    #[error("cannot determine the type of exported variable {variable}")]
    UnknownVariableType {
        /// The offending variable.
        variable: String,
    },
}

/// Which side of a function signature an argument sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentRole {
    /// A parameter.
    Parameter,
    /// A result.
    Result,
}

impl fmt::Display for ArgumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter => write!(f, "argument"),
            Self::Result => write!(f, "result"),
        }
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source file the error points into.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Enclosing declarations, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
