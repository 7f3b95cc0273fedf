//! Command-line front end for the protogo validator.
//!
//! Loads one package directory, optionally prints its declarations, and
//! runs the validator once. Any failure ends the run.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use protogo_foundation::Error;
use protogo_syntax::Package;
use protogo_syntax::ast::{FuncDecl, ImportSpec, TypeSpec, ValueSpec};
use protogo_syntax::pretty::{PrettyConfig, pretty_print_package_with_config};
use protogo_syntax::visitor::{DeclVisitor, walk_package};
use protogo_validate::{DEFAULT_TAG_KEY, ValidatedPackage, ValidatorConfig, validate_package};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Validate that a Go package's declarations can become a generated schema.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "protogo", version, about)]
pub struct Args {
    /// Path to the Go package directory.
    #[arg(long)]
    pub path: PathBuf,

    /// Struct tag key holding field numbers.
    #[arg(long, default_value = DEFAULT_TAG_KEY)]
    pub tag_key: String,

    /// Print the parsed declarations before validating.
    #[arg(long)]
    pub dump_ast: bool,

    /// Annotate dumped declarations with their line and column.
    #[arg(long, requires = "dump_ast")]
    pub positions: bool,

    /// Print the result as JSON.
    #[arg(long)]
    pub json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Returns the validator configuration these arguments select.
    #[must_use]
    pub fn validator_config(&self) -> ValidatorConfig {
        ValidatorConfig::new().with_tag_key(self.tag_key.clone())
    }
}

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `RUST_LOG` takes precedence over `verbose`.
pub fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // Already installed when called more than once in one process.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Declaration counts of a package.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DeclCounts {
    /// Import specs.
    pub imports: usize,
    /// Type specs.
    pub types: usize,
    /// Variable names.
    pub vars: usize,
    /// Constant names.
    pub consts: usize,
    /// Functions and methods.
    pub funcs: usize,
}

impl DeclCounts {
    /// Counts the declarations of a package.
    #[must_use]
    pub fn of(package: &Package) -> Self {
        let mut counts = Self::default();
        walk_package(&mut counts, package);
        counts
    }
}

impl DeclVisitor for DeclCounts {
    fn visit_import(&mut self, _spec: &ImportSpec) {
        self.imports += 1;
    }

    fn visit_type_spec(&mut self, _spec: &TypeSpec) {
        self.types += 1;
    }

    fn visit_var_spec(&mut self, spec: &ValueSpec) {
        self.vars += spec.names.len();
    }

    fn visit_const_spec(&mut self, spec: &ValueSpec) {
        self.consts += spec.names.len();
    }

    fn visit_func(&mut self, _func: &FuncDecl) {
        self.funcs += 1;
    }
}

/// What a successful run reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The package name.
    pub package: String,
    /// Source files, in merge order.
    pub files: Vec<String>,
    /// Declaration counts.
    pub declarations: DeclCounts,
    /// The validated package.
    pub validated: ValidatedPackage,
}

impl Report {
    fn new(package: &Package, validated: ValidatedPackage) -> Self {
        Self {
            package: package.name.clone(),
            files: package
                .files
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            declarations: DeclCounts::of(package),
            validated,
        }
    }

    /// Writes the human-readable summary.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write_text(&self, out: &mut impl Write) -> std::io::Result<()> {
        let d = &self.declarations;
        writeln!(
            out,
            "package {}: {} file(s), {} type(s), {} var(s), {} func(s)",
            self.package,
            self.files.len(),
            d.types,
            d.vars,
            d.funcs
        )?;
        for schema in &self.validated.types {
            if schema.is_struct {
                let tags: Vec<_> = schema.tags.iter().map(u32::to_string).collect();
                writeln!(out, "  {} {{{}}}", schema.name, tags.join(", "))?;
            } else {
                writeln!(out, "  {}", schema.name)?;
            }
        }
        writeln!(out, "ok")
    }
}

/// Runs the tool: load, optionally dump, validate, report.
///
/// # Errors
/// Returns the first loading or validation failure.
pub fn run(args: &Args, out: &mut impl Write) -> anyhow::Result<Report> {
    let package = protogo_syntax::load_package(&args.path)?;
    info!(package = %package.name, files = package.files.len(), "protogo package");

    if args.dump_ast {
        let config = PrettyConfig {
            show_positions: args.positions,
            ..PrettyConfig::default()
        };
        write!(out, "{}", pretty_print_package_with_config(&package, config))?;
        writeln!(out)?;
    }

    let validated = validate_package(&package, &args.validator_config())?;
    let report = Report::new(&package, validated);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        writeln!(out, "{json}")?;
    } else {
        report.write_text(out)?;
    }
    Ok(report)
}

/// Formats a failure for stderr, including where it happened.
#[must_use]
pub fn describe_error(err: &anyhow::Error) -> String {
    let mut message = format!("Error: {err:#}");
    if let Some(context) = err.downcast_ref::<Error>().and_then(|e| e.context.as_ref()) {
        let location = context.to_string();
        if !location.is_empty() {
            message.push_str("\n  ");
            message.push_str(location.trim_end());
        }
    }
    message
}
