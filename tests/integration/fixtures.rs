//! Fixture packages through the full load and validate pipeline

use protogo_foundation::{ArgumentRole, Error, ErrorKind};

use crate::{args, run_captured};

fn failure(name: &str) -> ErrorKind {
    let (result, _) = run_captured(&args(name));
    let err = result.unwrap_err();
    err.downcast_ref::<Error>().unwrap().kind.clone()
}

#[test]
fn greeter_package_passes() {
    let (result, _) = run_captured(&args("greeter"));
    let report = result.unwrap();
    assert_eq!(report.package, "greeter");
    let names: Vec<_> = report
        .validated
        .types
        .iter()
        .map(|t| t.name.as_str())
        .collect();
    assert_eq!(names, vec!["Greeting", "Settings", "Count"]);
    assert_eq!(report.validated.get("Greeting").unwrap().tags, vec![1, 2]);
}

#[test]
fn split_package_passes() {
    let (result, _) = run_captured(&args("split"));
    let report = result.unwrap();
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.declarations.imports, 2);
    assert_eq!(report.validated.get("Clock").unwrap().tags, vec![1, 3]);
}

#[test]
fn missing_tag_fails() {
    assert_eq!(
        failure("missing_tag"),
        ErrorKind::MissingTag {
            type_name: "Record".into(),
            field: "Name".into()
        }
    );
}

#[test]
fn error_result_fails() {
    assert_eq!(
        failure("bad_call"),
        ErrorKind::NonSchemaArgument {
            function: "Handle".into(),
            role: ArgumentRole::Result,
            position: 0,
            type_text: "error".into()
        }
    );
}

#[test]
fn two_packages_fail() {
    assert!(matches!(failure("two_packages"), ErrorKind::PackageCount { .. }));
}

#[test]
fn missing_directory_fails() {
    assert!(matches!(failure("nowhere"), ErrorKind::Io { .. }));
}
