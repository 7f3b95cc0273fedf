//! Pretty-printer for parsed packages.
//!
//! Renders the declarations the validator sees back as Go source.
//! Function bodies and initializer expressions are not kept by the
//! parser, so functions print as bare signatures and only composite
//! literal initializers are shown.
//!
//! # Example
//!
//! ```
//! use protogo_syntax::{parse_file, pretty::pretty_print_file};
//!
//! let file = parse_file("package p\ntype T struct{ X int `protogo:\"1\"` }\n").unwrap();
//! let source = pretty_print_file(&file);
//! assert!(source.contains("X int `protogo:\"1\"`"));
//! ```

use std::fmt::Write;

use crate::ast::{
    Decl, DeclKind, Expr, FuncDecl, ImportSpec, Package, SourceFile, TypeExpr, TypeSpec, ValueSpec,
};

/// Configuration for pretty-printing.
#[derive(Debug, Clone, Default)]
pub struct PrettyConfig {
    /// Number of spaces for each indentation level; zero means tabs.
    pub indent_width: usize,
    /// Whether to precede each declaration with a `// line:column` comment.
    pub show_positions: bool,
}

/// Pretty-print a merged package.
#[must_use]
pub fn pretty_print_package(package: &Package) -> String {
    pretty_print_package_with_config(package, PrettyConfig::default())
}

/// Pretty-print a merged package with custom configuration.
#[must_use]
pub fn pretty_print_package_with_config(package: &Package, config: PrettyConfig) -> String {
    let mut printer = PrettyPrinter::new(config);
    printer.print_unit(&package.name, &package.decls);
    printer.output
}

/// Pretty-print a single source file.
#[must_use]
pub fn pretty_print_file(file: &SourceFile) -> String {
    let mut printer = PrettyPrinter::new(PrettyConfig::default());
    printer.print_unit(&file.package.name, &file.decls);
    printer.output
}

/// Pretty-printer state.
struct PrettyPrinter {
    config: PrettyConfig,
    output: String,
}

impl PrettyPrinter {
    fn new(config: PrettyConfig) -> Self {
        Self {
            config,
            output: String::new(),
        }
    }

    fn indent(&self) -> String {
        if self.config.indent_width == 0 {
            "\t".to_string()
        } else {
            " ".repeat(self.config.indent_width)
        }
    }

    fn print_unit(&mut self, package: &str, decls: &[Decl]) {
        let _ = writeln!(self.output, "package {package}");
        for decl in decls {
            self.output.push('\n');
            self.print_decl(decl);
        }
    }

    fn print_decl(&mut self, decl: &Decl) {
        if self.config.show_positions {
            let _ = writeln!(self.output, "// {}:{}", decl.span.line, decl.span.column);
        }
        match &decl.kind {
            DeclKind::Import(specs) => self.print_group("import", specs, Self::print_import),
            DeclKind::Type(specs) => self.print_group("type", specs, Self::print_type_spec),
            DeclKind::Var(specs) => self.print_group("var", specs, Self::print_value_spec),
            DeclKind::Const(specs) => self.print_group("const", specs, Self::print_value_spec),
            DeclKind::Func(func) => self.print_func(func),
        }
    }

    fn print_group<T>(&mut self, keyword: &str, specs: &[T], print: fn(&mut Self, &T)) {
        if let [spec] = specs {
            let _ = write!(self.output, "{keyword} ");
            print(self, spec);
            self.output.push('\n');
            return;
        }
        let _ = writeln!(self.output, "{keyword} (");
        let indent = self.indent();
        for spec in specs {
            self.output.push_str(&indent);
            print(self, spec);
            self.output.push('\n');
        }
        self.output.push_str(")\n");
    }

    fn print_import(&mut self, spec: &ImportSpec) {
        if let Some(alias) = &spec.alias {
            let _ = write!(self.output, "{alias} ");
        }
        let _ = write!(self.output, "{:?}", spec.path);
    }

    fn print_type_spec(&mut self, spec: &TypeSpec) {
        self.output.push_str(&spec.name.name);
        if let Some(params) = &spec.type_params {
            let _ = write!(self.output, "[{params}]");
        }
        self.output.push_str(if spec.is_alias { " = " } else { " " });
        self.print_type(&spec.ty);
    }

    fn print_value_spec(&mut self, spec: &ValueSpec) {
        let names: Vec<_> = spec.names.iter().map(|n| n.name.as_str()).collect();
        self.output.push_str(&names.join(", "));
        if let Some(ty) = &spec.ty {
            self.output.push(' ');
            self.print_type(ty);
        }
        if !spec.values.is_empty() {
            self.output.push_str(" = ");
            for (i, value) in spec.values.iter().enumerate() {
                if i > 0 {
                    self.output.push_str(", ");
                }
                self.print_expr(value);
            }
        }
    }

    fn print_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::CompositeLit(ty, _) => {
                self.print_type(ty);
                self.output.push_str("{...}");
            }
            Expr::AddressOf(inner, _) => {
                self.output.push('&');
                self.print_expr(inner);
            }
            Expr::Other(_) => self.output.push_str("..."),
        }
    }

    fn print_func(&mut self, func: &FuncDecl) {
        self.output.push_str("func ");
        if let Some(receiver) = &func.receiver {
            let _ = write!(self.output, "({receiver}) ");
        }
        self.output.push_str(&func.name.name);
        if let Some(params) = &func.type_params {
            let _ = write!(self.output, "[{params}]");
        }
        let _ = write!(self.output, "{}", func.ty);
        if func.has_body {
            self.output.push_str(" { ... }");
        }
        self.output.push('\n');
    }

    /// Struct types print one field per line; everything else uses the
    /// single-line `Display` form.
    fn print_type(&mut self, ty: &TypeExpr) {
        let TypeExpr::Struct(st) = ty else {
            let _ = write!(self.output, "{ty}");
            return;
        };
        if st.fields.is_empty() {
            self.output.push_str("struct{}");
            return;
        }
        self.output.push_str("struct {\n");
        let indent = self.indent();
        for field in &st.fields {
            let _ = writeln!(self.output, "{indent}{field}");
        }
        self.output.push('}');
    }
}
