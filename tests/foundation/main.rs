//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Error, ErrorKind, ErrorContext, DeclId and FileId.

mod ids;
