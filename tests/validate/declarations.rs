//! Integration tests for the declaration walk
//!
//! Source order, cross-file visibility, variables and function signatures.

use protogo_foundation::{ArgumentRole, ErrorKind};
use protogo_validate::{DeclarationWalker, ValidatorConfig, validate_package};

use crate::{package, validate};

const HELLO: &str = r#"package hello

type ProtoGoHello struct {
	Message string `protogo:"1"`
	Other   string `protogo:"2"`

	id int64
}

type GlobalType struct {
	Data string `protogo:"1"`
}

var Global GlobalType

func Hello(_ GlobalType) ProtoGoHello {
	return ProtoGoHello{Message: "Hello", id: 42}
}
"#;

// =============================================================================
// Accepted Packages
// =============================================================================

#[test]
fn hello_package_is_valid() {
    let validated = validate(HELLO).unwrap();
    assert_eq!(validated.package_name, "hello");
    let summary: Vec<_> = validated
        .types
        .iter()
        .map(|t| (t.name.as_str(), t.tags.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![("ProtoGoHello", vec![1, 2]), ("GlobalType", vec![1])]
    );
}

#[test]
fn types_from_earlier_files_are_visible() {
    let package = package(&[
        ("a.go", "package p\ntype T struct{ X int `protogo:\"1\"` }\n"),
        ("b.go", "package p\nvar V T\nfunc F(T) T\n"),
    ]);
    validate_package(&package, &ValidatorConfig::default()).unwrap();
}

#[test]
fn custom_tag_key() {
    let package = package(&[("a.go", "package p\ntype T struct{ X int `wire:\"9\"` }\n")]);
    let config = ValidatorConfig::new().with_tag_key("wire");
    let validated = validate_package(&package, &config).unwrap();
    assert_eq!(validated.types[0].tags, vec![9]);

    let err = validate_package(&package, &ValidatorConfig::default()).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::MalformedTag { .. }));
}

#[test]
fn invalid_tag_key_fails_before_walking() {
    let package = package(&[("a.go", "package p\n")]);
    let config = ValidatorConfig::new().with_tag_key("bad key");
    let err = DeclarationWalker::new(&package, &config).err().unwrap();
    assert!(matches!(err.kind, ErrorKind::InvalidTagKey { .. }));
    assert!(!err.is_validation());
}

// =============================================================================
// Rejected Packages
// =============================================================================

#[test]
fn types_from_later_files_are_not_yet_registered() {
    let package = package(&[
        ("a.go", "package p\nvar V T\n"),
        ("b.go", "package p\ntype T struct{}\n"),
    ]);
    let err = validate_package(&package, &ValidatorConfig::default()).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UndeclaredSchemaType {
            referrer: "V".into(),
            type_name: "T".into()
        }
    );
    assert_eq!(err.context.unwrap().source.as_deref(), Some("a.go"));
}

#[test]
fn function_before_its_types_is_undeclared() {
    let package = package(&[
        ("a.go", "package p\nfunc Hello(g Global) Hello2 { return Hello2{} }\n"),
        (
            "b.go",
            "package p\ntype Global struct{ Data string `protogo:\"1\"` }\ntype Hello2 struct{}\n",
        ),
    ]);
    let err = validate_package(&package, &ValidatorConfig::default()).unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::UndeclaredSchemaType {
            referrer: "Hello".into(),
            type_name: "Global".into()
        }
    );
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("a.go"));
    assert_eq!(context.stack, vec!["func Hello".to_string(), "argument 0".to_string()]);
}

#[test]
fn builtin_parameter_is_not_a_schema_type() {
    let kind = validate("package p\ntype T struct{}\nfunc F(p int) T { return T{} }\n")
        .unwrap_err()
        .kind;
    assert!(matches!(kind, ErrorKind::NonSchemaArgument { ref type_text, .. } if type_text == "int"));
}

#[test]
fn anonymous_struct_variable() {
    for source in [
        "package p\nvar V struct{ X int }\n",
        "package p\nvar V = struct{ X int }{X: 1}\n",
    ] {
        assert_eq!(
            validate(source).unwrap_err().kind,
            ErrorKind::AnonymousStructNotAllowed { variable: "V".into() },
            "{source}"
        );
    }
}

#[test]
fn variable_of_builtin_type() {
    assert_eq!(
        validate("package p\nvar Count int\n").unwrap_err().kind,
        ErrorKind::UndeclaredSchemaType {
            referrer: "Count".into(),
            type_name: "int".into()
        }
    );
}

#[test]
fn variable_of_unknown_type() {
    assert_eq!(
        validate("package p\nvar V = compute()\n").unwrap_err().kind,
        ErrorKind::UnknownVariableType { variable: "V".into() }
    );
}

#[test]
fn function_with_error_result() {
    let err = validate(
        "package p\ntype Req struct{ X int `protogo:\"1\"` }\nfunc Handle(r Req) error { return nil }\n",
    )
    .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::NonSchemaArgument {
            function: "Handle".into(),
            role: ArgumentRole::Result,
            position: 0,
            type_text: "error".into()
        }
    );
    assert_eq!(err.context.unwrap().stack, vec!["func Handle".to_string()]);
}

#[test]
fn function_with_pointer_parameter() {
    let kind = validate("package p\ntype T struct{}\nfunc F(t *T) {}\n")
        .unwrap_err()
        .kind;
    assert!(matches!(
        kind,
        ErrorKind::NonSchemaArgument { role: ArgumentRole::Parameter, position: 0, ref type_text, .. } if type_text == "*T"
    ));
}

#[test]
fn first_failure_in_source_order() {
    let kind = validate("package p\nvar V int\ntype T struct{ X int }\n")
        .unwrap_err()
        .kind;
    assert!(matches!(kind, ErrorKind::UndeclaredSchemaType { .. }));
}

// =============================================================================
// Step-by-step Walking
// =============================================================================

#[test]
fn walker_exposes_progress() {
    let package = package(&[(
        "a.go",
        "package p\ntype A struct{ X int `protogo:\"5\"` }\ntype b int\n",
    )]);
    let mut walker = DeclarationWalker::new(&package, &ValidatorConfig::default()).unwrap();
    assert_eq!(walker.symbols().len(), 2);
    assert!(walker.index().is_empty());

    walker.walk_decl(&package.decls[0]).unwrap();
    let a = walker.symbols().resolve("A").unwrap();
    assert!(walker.index().is_exported(a));
    assert_eq!(
        walker.index().tags_of(a).map(|t| t.iter().copied().collect::<Vec<_>>()),
        Some(vec![5])
    );

    walker.walk_decl(&package.decls[1]).unwrap();
    let b = walker.symbols().resolve("b").unwrap();
    assert!(!walker.index().is_exported(b));
    assert_eq!(walker.index().exported_types(), vec![a]);
}
