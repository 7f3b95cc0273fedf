//! Abstract syntax tree for package-scope Go declarations.
//!
//! Only what declaration checking needs is kept: function bodies are
//! dropped, and initializer expressions are reduced to the composite
//! literal they start with, if any.

use std::fmt;
use std::path::PathBuf;

use protogo_foundation::{ErrorContext, FileId};

use crate::span::Span;

/// Returns true if `name` is exported: its first character is an
/// upper-case letter.
#[must_use]
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// An identifier with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ident {
    /// The identifier text.
    pub name: String,
    /// Where it was written.
    pub span: Span,
}

impl Ident {
    /// Creates an identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }

    /// Returns true if this identifier is exported.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Direction of a channel type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A type expression.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeExpr {
    /// A plain name like `T` or `int`
    Named(Ident),
    /// A name from another package like `time.Time`
    Qualified {
        /// The package qualifier.
        package: Ident,
        /// The type name.
        name: Ident,
    },
    /// A generic instantiation like `List[T]`
    Generic {
        /// The generic type.
        base: Box<TypeExpr>,
        /// The type arguments.
        args: Vec<TypeExpr>,
        /// Source location.
        span: Span,
    },
    /// `*T`
    Pointer(Box<TypeExpr>, Span),
    /// `[]T`
    Slice(Box<TypeExpr>, Span),
    /// `[N]T`
    Array {
        /// The length expression as written.
        len: String,
        /// The element type.
        elem: Box<TypeExpr>,
        /// Source location.
        span: Span,
    },
    /// `map[K]V`
    Map {
        /// The key type.
        key: Box<TypeExpr>,
        /// The value type.
        value: Box<TypeExpr>,
        /// Source location.
        span: Span,
    },
    /// `chan T`, `chan<- T` or `<-chan T`
    Chan {
        /// The channel direction.
        dir: ChanDir,
        /// The element type.
        elem: Box<TypeExpr>,
        /// Source location.
        span: Span,
    },
    /// `func(...) ...`
    Func(Box<FuncType>, Span),
    /// `struct { ... }`
    Struct(StructType),
    /// `interface { ... }`
    Interface(InterfaceType),
    /// `...T` in the last parameter of a variadic function
    Ellipsis(Box<TypeExpr>, Span),
}

impl TypeExpr {
    /// Returns the source span of this type.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Named(ident) => ident.span,
            Self::Qualified { package, name } => package.span.to(name.span),
            Self::Struct(s) => s.span,
            Self::Interface(i) => i.span,
            Self::Generic { span, .. }
            | Self::Pointer(_, span)
            | Self::Slice(_, span)
            | Self::Array { span, .. }
            | Self::Map { span, .. }
            | Self::Chan { span, .. }
            | Self::Func(_, span)
            | Self::Ellipsis(_, span) => *span,
        }
    }

    /// Returns the identifier if this is a simple named reference.
    #[must_use]
    pub fn as_named(&self) -> Option<&Ident> {
        match self {
            Self::Named(ident) => Some(ident),
            _ => None,
        }
    }

    /// Returns the struct body if this is an inline struct type.
    #[must_use]
    pub fn as_struct(&self) -> Option<&StructType> {
        match self {
            Self::Struct(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this is an inline struct type.
    #[must_use]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Returns the name an embedded field of this type is known by.
    #[must_use]
    pub fn embedded_name(&self) -> Option<&Ident> {
        match self {
            Self::Named(ident) | Self::Qualified { name: ident, .. } => Some(ident),
            Self::Pointer(inner, _) | Self::Generic { base: inner, .. } => inner.embedded_name(),
            _ => None,
        }
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(ident) => write!(f, "{ident}"),
            Self::Qualified { package, name } => write!(f, "{package}.{name}"),
            Self::Generic { base, args, .. } => {
                write!(f, "{base}[")?;
                write_joined(f, args)?;
                write!(f, "]")
            }
            Self::Pointer(inner, _) => write!(f, "*{inner}"),
            Self::Slice(elem, _) => write!(f, "[]{elem}"),
            Self::Array { len, elem, .. } => write!(f, "[{len}]{elem}"),
            Self::Map { key, value, .. } => write!(f, "map[{key}]{value}"),
            Self::Chan { dir, elem, .. } => match dir {
                ChanDir::Both => write!(f, "chan {elem}"),
                ChanDir::Send => write!(f, "chan<- {elem}"),
                ChanDir::Recv => write!(f, "<-chan {elem}"),
            },
            Self::Func(func, _) => write!(f, "func{func}"),
            Self::Struct(s) => {
                if s.fields.is_empty() {
                    return write!(f, "struct{{}}");
                }
                write!(f, "struct{{ ")?;
                for (i, field) in s.fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{field}")?;
                }
                write!(f, " }}")
            }
            Self::Interface(i) if i.is_empty => write!(f, "interface{{}}"),
            Self::Interface(_) => write!(f, "interface{{ ... }}"),
            Self::Ellipsis(elem, _) => write!(f, "...{elem}"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[TypeExpr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// A struct tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tag {
    /// The tag contents with string quoting removed.
    pub value: String,
    /// Where the tag literal was written.
    pub span: Span,
}

/// A field of a struct, or a parameter/result group of a signature.
///
/// `a, b int` is one field with two names; an embedded struct field
/// has no names.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    /// Declared names, empty for embedded fields and unnamed parameters.
    pub names: Vec<Ident>,
    /// The field type.
    pub ty: TypeExpr,
    /// The struct tag, if any.
    pub tag: Option<Tag>,
    /// Source location.
    pub span: Span,
}

impl Field {
    /// Returns the names this field is accessed by: the declared names,
    /// or the type name of an embedded field.
    #[must_use]
    pub fn effective_names(&self) -> Vec<&Ident> {
        if self.names.is_empty() {
            self.ty.embedded_name().into_iter().collect()
        } else {
            self.names.iter().collect()
        }
    }

    /// Returns true if this is an embedded struct field.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.names.iter().enumerate() {
            let sep = if i + 1 == self.names.len() { " " } else { ", " };
            write!(f, "{name}{sep}")?;
        }
        write!(f, "{}", self.ty)?;
        if let Some(tag) = &self.tag {
            if tag.value.contains('`') {
                write!(f, " {:?}", tag.value)?;
            } else {
                write!(f, " `{}`", tag.value)?;
            }
        }
        Ok(())
    }
}

/// A `struct { ... }` body.
#[derive(Clone, Debug, PartialEq)]
pub struct StructType {
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Source location.
    pub span: Span,
}

/// An `interface { ... }` body; its elements are not inspected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceType {
    /// True for `interface{}`.
    pub is_empty: bool,
    /// Source location.
    pub span: Span,
}

/// A function signature.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct FuncType {
    /// Parameter groups in order.
    pub params: Vec<Field>,
    /// Result groups in order.
    pub results: Vec<Field>,
}

impl fmt::Display for FuncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_fields(f, &self.params)?;
        write!(f, ")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => write!(f, " {single}"),
            results => {
                write!(f, " (")?;
                write_fields(f, results)?;
                write!(f, ")")
            }
        }
    }
}

fn write_fields(f: &mut fmt::Formatter<'_>, fields: &[Field]) -> fmt::Result {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{field}")?;
    }
    Ok(())
}

/// The part of an initializer expression that declaration checking reads.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    /// A composite literal like `T{...}` or `struct{ A string }{}`
    CompositeLit(TypeExpr, Span),
    /// `&x`
    AddressOf(Box<Expr>, Span),
    /// Anything else
    Other(Span),
}

impl Expr {
    /// Returns the source span of this expression.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::CompositeLit(_, span) | Self::AddressOf(_, span) | Self::Other(span) => *span,
        }
    }

    /// Returns the type this expression evaluates to, when it can be read
    /// off the syntax alone.
    #[must_use]
    pub fn literal_type(&self) -> Option<TypeExpr> {
        match self {
            Self::CompositeLit(ty, _) => Some(ty.clone()),
            Self::AddressOf(inner, span) => inner
                .literal_type()
                .map(|ty| TypeExpr::Pointer(Box::new(ty), *span)),
            Self::Other(_) => None,
        }
    }
}

/// A `name [TypeParams] [=] Type` specification.
#[derive(Clone, Debug, PartialEq)]
pub struct TypeSpec {
    /// The declared name.
    pub name: Ident,
    /// Type parameter list as written, without brackets.
    pub type_params: Option<String>,
    /// True for `type A = B`.
    pub is_alias: bool,
    /// The underlying type.
    pub ty: TypeExpr,
    /// Source location.
    pub span: Span,
}

/// A `var` or `const` specification.
#[derive(Clone, Debug, PartialEq)]
pub struct ValueSpec {
    /// The declared names.
    pub names: Vec<Ident>,
    /// The declared type, if written.
    pub ty: Option<TypeExpr>,
    /// Initializer expressions, one per name when present.
    pub values: Vec<Expr>,
    /// Source location.
    pub span: Span,
}

impl ValueSpec {
    /// Returns the type of the `index`th name: the declared type if any,
    /// else the type of its initializer when that is a composite literal.
    #[must_use]
    pub fn type_of(&self, index: usize) -> Option<TypeExpr> {
        if let Some(ty) = &self.ty {
            return Some(ty.clone());
        }
        self.values.get(index).and_then(Expr::literal_type)
    }
}

/// A function or method declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct FuncDecl {
    /// The function name.
    pub name: Ident,
    /// The receiver, for methods.
    pub receiver: Option<Field>,
    /// Type parameter list as written, without brackets.
    pub type_params: Option<String>,
    /// The signature.
    pub ty: FuncType,
    /// False for declarations without a body (implemented elsewhere).
    pub has_body: bool,
    /// Source location.
    pub span: Span,
}

/// One import.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportSpec {
    /// `.`, `_` or a renaming identifier.
    pub alias: Option<String>,
    /// The import path.
    pub path: String,
    /// Source location.
    pub span: Span,
}

/// The kinds of package-scope declaration.
#[derive(Clone, Debug, PartialEq)]
pub enum DeclKind {
    /// `import ...`
    Import(Vec<ImportSpec>),
    /// `type ...`
    Type(Vec<TypeSpec>),
    /// `var ...`
    Var(Vec<ValueSpec>),
    /// `const ...`
    Const(Vec<ValueSpec>),
    /// `func ...`
    Func(FuncDecl),
}

/// A package-scope declaration.
#[derive(Clone, Debug, PartialEq)]
pub struct Decl {
    /// What is declared.
    pub kind: DeclKind,
    /// Source location, including the owning file.
    pub span: Span,
}

impl Decl {
    /// Returns a short name for the declaration kind.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self.kind {
            DeclKind::Import(_) => "import",
            DeclKind::Type(_) => "type",
            DeclKind::Var(_) => "var",
            DeclKind::Const(_) => "const",
            DeclKind::Func(_) => "func",
        }
    }
}

/// One parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceFile {
    /// The package clause name.
    pub package: Ident,
    /// Declarations in source order.
    pub decls: Vec<Decl>,
}

/// All files of one package, merged into a single declaration list.
#[derive(Clone, Debug, PartialEq)]
pub struct Package {
    /// The package name.
    pub name: String,
    /// Source files, indexed by [`FileId`].
    pub files: Vec<PathBuf>,
    /// Declarations of every file, in file order then source order.
    pub decls: Vec<Decl>,
}

impl Package {
    /// Returns the path of the file a span points into.
    #[must_use]
    pub fn file_path(&self, file: FileId) -> Option<&PathBuf> {
        self.files.get(file.index() as usize)
    }

    /// Builds an error context pointing at `span`.
    #[must_use]
    pub fn context_at(&self, span: Span) -> ErrorContext {
        let context = ErrorContext::new().with_position(span.line as usize, span.column as usize);
        match self.file_path(span.file) {
            Some(path) => context.with_source(path.display().to_string()),
            None => context,
        }
    }

    /// Returns every import of the package.
    pub fn imports(&self) -> impl Iterator<Item = &ImportSpec> {
        self.decls.iter().flat_map(|decl| match &decl.kind {
            DeclKind::Import(specs) => specs.as_slice(),
            _ => &[][..],
        })
    }

    /// Returns every type specification of the package, in order.
    pub fn type_specs(&self) -> impl Iterator<Item = &TypeSpec> {
        self.decls.iter().flat_map(|decl| match &decl.kind {
            DeclKind::Type(specs) => specs.as_slice(),
            _ => &[][..],
        })
    }
}
