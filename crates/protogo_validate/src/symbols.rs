//! Package-scope type names.
//!
//! The symbol table gives every type spec of a package a [`DeclId`] and
//! resolves names to those ids. It is built once, before validation, so
//! a name used before its declaration still resolves; whether the
//! declaration is registered yet is the [`DeclarationIndex`]'s concern.
//!
//! [`DeclarationIndex`]: crate::index::DeclarationIndex

use std::collections::HashMap;

use protogo_foundation::{DeclId, FileId};
use protogo_syntax::Package;
use protogo_syntax::ast::TypeSpec;
use protogo_syntax::span::Span;
use protogo_syntax::visitor::{DeclVisitor, walk_package};
use tracing::warn;

/// One declared type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    /// The declared name.
    pub name: String,
    /// Where the name was declared.
    pub span: Span,
    /// True if the spec's type is a struct.
    pub is_struct: bool,
}

/// Names and ids of every package-scope type declaration.
#[derive(Clone, Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    by_name: HashMap<String, DeclId>,
    /// Keyed by where each spec's name starts.
    by_position: HashMap<(FileId, usize), DeclId>,
}

impl SymbolTable {
    /// Builds the table for a package.
    ///
    /// Ids follow the order in which [`walk_package`] visits type specs.
    #[must_use]
    pub fn build(package: &Package) -> Self {
        let mut table = Self::default();
        walk_package(&mut table, package);
        table
    }

    /// Resolves a type name.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<DeclId> {
        self.by_name.get(name).copied()
    }

    /// Returns the id of a type spec of this package.
    ///
    /// Lookup is by the spec's position, so redeclared names keep their
    /// own ids. Returns `None` for a spec from elsewhere.
    #[must_use]
    pub fn id_of(&self, spec: &TypeSpec) -> Option<DeclId> {
        let key = (spec.name.span.file, spec.name.span.start);
        self.by_position
            .get(&key)
            .copied()
            .filter(|&id| self.name(id) == Some(spec.name.name.as_str()))
    }

    /// Returns the declaration with the given id.
    #[must_use]
    pub fn get(&self, id: DeclId) -> Option<&Symbol> {
        self.symbols.get(id.index() as usize)
    }

    /// Returns the name of the declaration with the given id.
    #[must_use]
    pub fn name(&self, id: DeclId) -> Option<&str> {
        self.get(id).map(|s| s.name.as_str())
    }

    /// Returns the number of declarations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the package declares no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Iterates over every declaration in id order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (DeclId::new(u32::try_from(i).unwrap_or(u32::MAX)), s))
    }
}

impl DeclVisitor for SymbolTable {
    fn visit_type_spec(&mut self, spec: &TypeSpec) {
        let id = DeclId::new(u32::try_from(self.symbols.len()).unwrap_or(u32::MAX));
        self.symbols.push(Symbol {
            name: spec.name.name.clone(),
            span: spec.name.span,
            is_struct: spec.ty.is_struct(),
        });
        self.by_position
            .insert((spec.name.span.file, spec.name.span.start), id);
        if let Some(first) = self.by_name.get(&spec.name.name) {
            warn!(
                name = %spec.name,
                line = spec.name.span.line,
                first = ?first,
                "type redeclared; resolving to the first declaration"
            );
        } else {
            self.by_name.insert(spec.name.name.clone(), id);
        }
    }
}
