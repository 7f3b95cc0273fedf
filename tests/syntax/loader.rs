//! Integration tests for package loading

use std::path::PathBuf;

use protogo_foundation::ErrorKind;
use protogo_syntax::ast::DeclKind;
use protogo_syntax::{load_package, parse_package};

use crate::fixture;

#[test]
fn load_single_file_package() {
    let package = load_package(fixture("greeter")).unwrap();
    assert_eq!(package.name, "greeter");
    assert_eq!(package.files.len(), 1);
    assert!(package.files[0].ends_with("greeter.go"));
    let names: Vec<_> = package.type_specs().map(|s| s.name.name.as_str()).collect();
    assert_eq!(names, vec!["Greeting", "Settings", "Count"]);
}

#[test]
fn load_merges_files_in_name_order() {
    let package = load_package(fixture("split")).unwrap();
    assert_eq!(package.name, "split");
    assert_eq!(package.files.len(), 2);
    assert!(package.files[0].ends_with("a_types.go"));
    assert!(package.files[1].ends_with("b_uses.go"));

    let imports: Vec<_> = package.imports().map(|i| i.path.as_str()).collect();
    assert_eq!(imports, vec!["fmt", "time"]);

    let first_var = package
        .decls
        .iter()
        .find(|d| matches!(d.kind, DeclKind::Var(_)))
        .unwrap();
    assert_eq!(first_var.span.file.index(), 1);
    assert_eq!(package.context_at(first_var.span).line, Some(8));
}

#[test]
fn load_rejects_two_packages() {
    let err = load_package(fixture("two_packages")).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::PackageCount {
            path: fixture("two_packages").display().to_string(),
            found: vec!["alpha".into(), "beta".into()],
        }
    );
}

#[test]
fn load_missing_directory() {
    let err = load_package(fixture("does_not_exist")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::Io { .. }));
}

#[test]
fn load_directory_without_go_files() {
    // The fixtures root holds only directories.
    let err = load_package(fixture("")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NoSourceFiles { .. }));
}

#[test]
fn parse_error_names_file_and_line() {
    let sources = vec![
        (PathBuf::from("ok.go"), "package p\n".to_string()),
        (PathBuf::from("bad.go"), "package p\n\nvar = 1\n".to_string()),
    ];
    let err = parse_package("pkg", &sources).unwrap_err();
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("bad.go"));
    assert_eq!(context.line, Some(3));
}
