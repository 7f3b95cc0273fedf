//! Visitor for traversing package declarations.
//!
//! # Example
//!
//! ```
//! use protogo_syntax::ast::TypeSpec;
//! use protogo_syntax::parse_file;
//! use protogo_syntax::visitor::{DeclVisitor, walk_decls};
//!
//! struct TypeCounter(usize);
//!
//! impl DeclVisitor for TypeCounter {
//!     fn visit_type_spec(&mut self, _spec: &TypeSpec) {
//!         self.0 += 1;
//!     }
//! }
//!
//! let file = parse_file("package p\ntype (\n\tA int\n\tB string\n)\n").unwrap();
//! let mut counter = TypeCounter(0);
//! walk_decls(&mut counter, &file.decls);
//! assert_eq!(counter.0, 2);
//! ```

use crate::ast::{Decl, DeclKind, Field, FuncDecl, ImportSpec, Package, TypeSpec, ValueSpec};

/// Trait for read-only declaration visitors.
///
/// Implement the `visit_*` methods of interest; the defaults do nothing.
/// Use [`walk_package`] or [`walk_decls`] to drive the traversal.
#[allow(unused_variables)]
pub trait DeclVisitor {
    /// Called before a declaration's specs are visited.
    fn enter_decl(&mut self, decl: &Decl) {}

    /// Called after a declaration's specs are visited.
    fn leave_decl(&mut self, decl: &Decl) {}

    /// Visit one import.
    fn visit_import(&mut self, spec: &ImportSpec) {}

    /// Visit a type specification, before its struct fields.
    fn visit_type_spec(&mut self, spec: &TypeSpec) {}

    /// Visit a field of a struct declared directly by a type spec.
    fn visit_struct_field(&mut self, owner: &TypeSpec, field: &Field) {}

    /// Visit a `var` specification.
    fn visit_var_spec(&mut self, spec: &ValueSpec) {}

    /// Visit a `const` specification.
    fn visit_const_spec(&mut self, spec: &ValueSpec) {}

    /// Visit a function or method declaration.
    fn visit_func(&mut self, func: &FuncDecl) {}
}

/// Walk every declaration of a package in order.
pub fn walk_package<V: DeclVisitor>(visitor: &mut V, package: &Package) {
    walk_decls(visitor, &package.decls);
}

/// Walk a list of declarations in order.
pub fn walk_decls<V: DeclVisitor>(visitor: &mut V, decls: &[Decl]) {
    for decl in decls {
        walk_decl(visitor, decl);
    }
}

/// Walk one declaration.
pub fn walk_decl<V: DeclVisitor>(visitor: &mut V, decl: &Decl) {
    visitor.enter_decl(decl);
    match &decl.kind {
        DeclKind::Import(specs) => specs.iter().for_each(|s| visitor.visit_import(s)),
        DeclKind::Type(specs) => {
            for spec in specs {
                visitor.visit_type_spec(spec);
                if let Some(st) = spec.ty.as_struct() {
                    for field in &st.fields {
                        visitor.visit_struct_field(spec, field);
                    }
                }
            }
        }
        DeclKind::Var(specs) => specs.iter().for_each(|s| visitor.visit_var_spec(s)),
        DeclKind::Const(specs) => specs.iter().for_each(|s| visitor.visit_const_spec(s)),
        DeclKind::Func(func) => visitor.visit_func(func),
    }
    visitor.leave_decl(decl);
}
