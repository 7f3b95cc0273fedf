//! The struct validator.
//!
//! Checks the field tags of one exported struct declaration and claims
//! their numbers in the [`DeclarationIndex`].

use protogo_foundation::{DeclId, Error, ErrorKind, Result};
use protogo_syntax::Package;
use protogo_syntax::ast::{Field, Ident, StructType};
use protogo_syntax::span::Span;
use tracing::debug;

use crate::index::DeclarationIndex;
use crate::tag::{TagPattern, parse_number};

/// Validates the fields of struct declarations.
pub struct StructValidator<'a> {
    package: &'a Package,
    pattern: &'a TagPattern,
}

impl<'a> StructValidator<'a> {
    /// Creates a validator reporting positions within `package`.
    #[must_use]
    pub fn new(package: &'a Package, pattern: &'a TagPattern) -> Self {
        Self { package, pattern }
    }

    /// Validates every field of `st`, the body of declaration `id` named
    /// `type_name`, claiming each exported field's number.
    ///
    /// Fields are checked in order and the first failure is returned.
    ///
    /// # Errors
    /// Returns `MissingTag`, `MalformedTag`, `InvalidTagNumber` or
    /// `DuplicateTag` for the first exported field that breaks the rules.
    pub fn validate(
        &self,
        index: &mut DeclarationIndex,
        id: DeclId,
        type_name: &str,
        st: &StructType,
    ) -> Result<()> {
        index.begin_struct(id);
        for field in &st.fields {
            for name in field.effective_names() {
                if !name.is_exported() {
                    debug!(type_name, field = %name, "skipping unexported field");
                    continue;
                }
                let number = self.field_number(type_name, name, field)?;
                if !index.claim_tag(id, number) {
                    return Err(self.fail(
                        Error::duplicate_tag(type_name, &name.name, number),
                        type_name,
                        field.tag.as_ref().map_or(name.span, |t| t.span),
                    ));
                }
                debug!(type_name, field = %name, number, "tag accepted");
            }
        }
        Ok(())
    }

    /// Reads the field number out of an exported field's tag.
    fn field_number(&self, type_name: &str, name: &Ident, field: &Field) -> Result<u32> {
        let Some(tag) = &field.tag else {
            return Err(self.fail(
                Error::missing_tag(type_name, &name.name),
                type_name,
                name.span,
            ));
        };

        let values = self.pattern.values(&tag.value);
        let [digits] = values.as_slice() else {
            let kind = ErrorKind::MalformedTag {
                type_name: type_name.to_string(),
                field: name.name.clone(),
                tag: tag.value.clone(),
                matches: values.len(),
            };
            return Err(self.fail(Error::new(kind), type_name, tag.span));
        };

        parse_number(digits).ok_or_else(|| {
            let kind = ErrorKind::InvalidTagNumber {
                type_name: type_name.to_string(),
                field: name.name.clone(),
                value: (*digits).to_string(),
            };
            self.fail(Error::new(kind), type_name, tag.span)
        })
    }

    fn fail(&self, err: Error, type_name: &str, span: Span) -> Error {
        err.with_context(
            self.package
                .context_at(span)
                .with_frame(format!("type {type_name}")),
        )
    }
}
