//! Package loading.
//!
//! A package is every `*.go` file directly inside one directory. Files
//! are read in name order, parsed with their own [`FileId`], and merged
//! into one declaration list. Imports repeated across files are kept
//! once.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use protogo_foundation::{Error, ErrorKind, FileId, Result};
use tracing::debug;

use crate::ast::{Decl, DeclKind, Package, SourceFile};
use crate::parser::Parser;

/// Loads and merges the package in `dir`.
///
/// # Errors
/// Returns an error if the directory cannot be read, holds no Go files,
/// holds files of more than one package, or a file fails to parse.
pub fn load_package(dir: impl AsRef<Path>) -> Result<Package> {
    let dir = dir.as_ref();
    let paths = source_files(dir)?;
    if paths.is_empty() {
        return Err(Error::new(ErrorKind::NoSourceFiles {
            path: dir.display().to_string(),
        }));
    }

    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let source =
            fs::read_to_string(&path).map_err(|e| Error::io(path.display().to_string(), &e))?;
        sources.push((path, source));
    }

    debug!(dir = %dir.display(), files = sources.len(), "loading package");
    merge(dir, &sources)
}

/// Parses and merges in-memory sources as one package.
///
/// `dir` is used only in error messages.
///
/// # Errors
/// Returns an error if `sources` is empty, declares more than one
/// package, or a file fails to parse.
pub fn parse_package(dir: impl AsRef<Path>, sources: &[(PathBuf, String)]) -> Result<Package> {
    let dir = dir.as_ref();
    if sources.is_empty() {
        return Err(Error::new(ErrorKind::NoSourceFiles {
            path: dir.display().to_string(),
        }));
    }
    merge(dir, sources)
}

/// Lists the `.go` files directly inside `dir`, sorted by name.
fn source_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| Error::io(dir.display().to_string(), &e))?;
    let mut paths = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(dir.display().to_string(), &e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "go") {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

fn merge(dir: &Path, sources: &[(PathBuf, String)]) -> Result<Package> {
    let mut files = Vec::with_capacity(sources.len());
    for (index, (path, source)) in sources.iter().enumerate() {
        let file = FileId::new(u32::try_from(index).unwrap_or(u32::MAX));
        let parsed = Parser::for_file(source, file).parse_file().map_err(|e| {
            let context = e.context.clone().unwrap_or_default();
            let context = match &e.kind {
                ErrorKind::ParseError { line, column, .. } => {
                    context.with_position(*line as usize, *column as usize)
                }
                _ => context,
            };
            e.with_context(context.with_source(path.display().to_string()))
        })?;
        debug!(
            file = %path.display(),
            package = %parsed.package.name,
            decls = parsed.decls.len(),
            "parsed source file"
        );
        files.push(parsed);
    }

    let mut names: Vec<String> = Vec::new();
    for file in &files {
        if !names.contains(&file.package.name) {
            names.push(file.package.name.clone());
        }
    }
    if names.len() != 1 {
        return Err(Error::new(ErrorKind::PackageCount {
            path: dir.display().to_string(),
            found: names,
        }));
    }

    Ok(Package {
        name: names.remove(0),
        files: sources.iter().map(|(path, _)| path.clone()).collect(),
        decls: merge_decls(files),
    })
}

/// Concatenates declarations in file order, keeping each import path once.
fn merge_decls(files: Vec<SourceFile>) -> Vec<Decl> {
    let mut seen = HashSet::new();
    let mut decls = Vec::new();
    for file in files {
        for mut decl in file.decls {
            if let DeclKind::Import(specs) = &mut decl.kind {
                specs.retain(|spec| seen.insert((spec.alias.clone(), spec.path.clone())));
                if specs.is_empty() {
                    continue;
                }
            }
            decls.push(decl);
        }
    }
    decls
}
