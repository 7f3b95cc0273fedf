//! The declaration walker.
//!
//! Visits every package-scope declaration in source order. Exported type
//! specs are registered, then their struct fields validated; exported
//! variables and every function signature must refer to types that are
//! already registered. The first failure ends the run.

use protogo_foundation::{ArgumentRole, DeclId, Error, ErrorKind, Result};
use protogo_syntax::Package;
use protogo_syntax::ast::{Decl, DeclKind, Field, FuncDecl, TypeExpr, TypeSpec, ValueSpec};
use protogo_syntax::span::Span;
use tracing::{debug, info, warn};

use crate::config::ValidatorConfig;
use crate::index::DeclarationIndex;
use crate::report::{SchemaType, ValidatedPackage};
use crate::structs::StructValidator;
use crate::symbols::SymbolTable;
use crate::tag::TagPattern;

/// Validates a package with the given configuration.
///
/// # Errors
/// Returns the first validation failure, or `InvalidTagKey` for a bad
/// configuration.
pub fn validate_package(package: &Package, config: &ValidatorConfig) -> Result<ValidatedPackage> {
    DeclarationWalker::new(package, config)?.run()
}

/// State of one validation run over one package.
pub struct DeclarationWalker<'a> {
    package: &'a Package,
    pattern: TagPattern,
    symbols: SymbolTable,
    index: DeclarationIndex,
}

impl<'a> DeclarationWalker<'a> {
    /// Prepares a run: compiles the tag pattern and builds the symbol table.
    ///
    /// # Errors
    /// Returns `InvalidTagKey` if the configured tag key is unusable.
    pub fn new(package: &'a Package, config: &ValidatorConfig) -> Result<Self> {
        Ok(Self {
            package,
            pattern: config.tag_pattern()?,
            symbols: SymbolTable::build(package),
            index: DeclarationIndex::new(),
        })
    }

    /// Walks every declaration, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first validation failure.
    pub fn run(mut self) -> Result<ValidatedPackage> {
        let package = self.package;
        for decl in &package.decls {
            self.walk_decl(decl)?;
        }
        let validated = self.finish();
        info!(
            package = %validated.package_name,
            types = validated.types.len(),
            "package validated"
        );
        Ok(validated)
    }

    /// Returns the index built so far.
    #[must_use]
    pub fn index(&self) -> &DeclarationIndex {
        &self.index
    }

    /// Returns the package's symbol table.
    #[must_use]
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Visits one declaration.
    ///
    /// Type specs take their ids from the symbol table, so declarations may
    /// be visited in any order. A type already declared is not checked
    /// again, and specs from another package are ignored.
    ///
    /// # Errors
    /// Returns the first validation failure within the declaration.
    pub fn walk_decl(&mut self, decl: &Decl) -> Result<()> {
        match &decl.kind {
            DeclKind::Type(specs) => specs.iter().try_for_each(|spec| self.check_type_spec(spec)),
            DeclKind::Var(specs) => specs.iter().try_for_each(|spec| self.check_var_spec(spec)),
            DeclKind::Func(func) => self.check_func(func),
            DeclKind::Import(_) | DeclKind::Const(_) => {
                debug!(kind = decl.kind_name(), line = decl.span.line, "skipping declaration");
                Ok(())
            }
        }
    }

    fn check_type_spec(&mut self, spec: &TypeSpec) -> Result<()> {
        if !spec.name.is_exported() {
            debug!(name = %spec.name, "skipping unexported type");
            return Ok(());
        }
        let Some(id) = self.symbols.id_of(spec) else {
            warn!(
                name = %spec.name,
                line = spec.span.line,
                "type spec is not part of this package"
            );
            return Ok(());
        };
        if self.index.is_exported(id) {
            debug!(name = %spec.name, id = ?id, "type already declared");
            return Ok(());
        }

        // Registered before its fields are checked, so a struct may refer to itself.
        self.index.register(id);
        debug!(name = %spec.name, id = ?id, "declaring type");

        if let Some(st) = spec.ty.as_struct() {
            StructValidator::new(self.package, &self.pattern).validate(
                &mut self.index,
                id,
                &spec.name.name,
                st,
            )?;
        }
        Ok(())
    }

    fn check_var_spec(&self, spec: &ValueSpec) -> Result<()> {
        for (i, name) in spec.names.iter().enumerate() {
            if !name.is_exported() {
                debug!(name = %name, "skipping unexported variable");
                continue;
            }
            let fail = |err: Error| self.fail(err, &format!("var {name}"), name.span);

            let Some(ty) = spec.type_of(i) else {
                return Err(fail(Error::new(ErrorKind::UnknownVariableType {
                    variable: name.name.clone(),
                })));
            };
            if ty.is_struct() {
                return Err(fail(Error::new(ErrorKind::AnonymousStructNotAllowed {
                    variable: name.name.clone(),
                })));
            }
            if self.registered(&ty).is_none() {
                return Err(fail(Error::undeclared_schema_type(&name.name, ty.to_string())));
            }
            debug!(name = %name, ty = %ty, "exported variable accepted");
        }
        Ok(())
    }

    fn check_func(&self, func: &FuncDecl) -> Result<()> {
        let groups = [
            (ArgumentRole::Parameter, &func.ty.params),
            (ArgumentRole::Result, &func.ty.results),
        ];
        for (role, fields) in groups {
            for (position, field) in fields.iter().enumerate() {
                self.check_argument(func, role, position, field)?;
            }
        }
        debug!(name = %func.name, "function accepted");
        Ok(())
    }

    fn check_argument(
        &self,
        func: &FuncDecl,
        role: ArgumentRole,
        position: usize,
        field: &Field,
    ) -> Result<()> {
        if self.registered(&field.ty).is_some() {
            return Ok(());
        }
        let frame = format!("func {}", func.name);
        // A package type that is unexported or declared further down.
        let declared = field
            .ty
            .as_named()
            .is_some_and(|ident| self.symbols.resolve(&ident.name).is_some());
        if declared {
            let err = Error::undeclared_schema_type(&func.name.name, field.ty.to_string());
            let context = self
                .package
                .context_at(field.span)
                .with_frame(frame)
                .with_frame(format!("{role} {position}"));
            return Err(err.with_context(context));
        }
        let err = Error::non_schema_argument(&func.name.name, role, position, field.ty.to_string());
        Err(self.fail(err, &frame, field.span))
    }

    /// Resolves a plain type name to a registered declaration.
    fn registered(&self, ty: &TypeExpr) -> Option<DeclId> {
        let ident = ty.as_named()?;
        self.symbols
            .resolve(&ident.name)
            .filter(|&id| self.index.is_exported(id))
    }

    fn fail(&self, err: Error, frame: &str, span: Span) -> Error {
        err.with_context(self.package.context_at(span).with_frame(frame))
    }

    fn finish(self) -> ValidatedPackage {
        let types = self
            .index
            .exported_types()
            .into_iter()
            .map(|id| SchemaType {
                id,
                name: self.symbols.name(id).unwrap_or_default().to_string(),
                is_struct: self.index.tags_of(id).is_some(),
                tags: self
                    .index
                    .tags_of(id)
                    .map(|tags| tags.iter().copied().collect())
                    .unwrap_or_default(),
            })
            .collect();
        ValidatedPackage {
            package_name: self.package.name.clone(),
            types,
        }
    }
}
