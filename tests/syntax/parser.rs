//! Integration tests for the parser

use protogo_foundation::ErrorKind;
use protogo_syntax::ast::{DeclKind, Expr, TypeExpr};
use protogo_syntax::parse_file;

const HELLO: &str = r#"//go:build protogo
package hello

type ProtoGoHello struct {
	// Exported fields need a field number
	Message string `protogo:"1"`
	Other   string `protogo:"2"`

	id int64
}

type GlobalType struct {
	Data string `protogo:"1"`
}

var Global GlobalType

func Hello(_ GlobalType) ProtoGoHello {
	return ProtoGoHello{
		Message: "Hello",
		id:      42,
	}
}
"#;

#[test]
fn parse_hello_package() {
    let file = parse_file(HELLO).unwrap();
    assert_eq!(file.package.name, "hello");
    let kinds: Vec<_> = file.decls.iter().map(|d| d.kind_name()).collect();
    assert_eq!(kinds, vec!["type", "type", "var", "func"]);
}

#[test]
fn parse_struct_fields_and_tags() {
    let file = parse_file(HELLO).unwrap();
    let DeclKind::Type(specs) = &file.decls[0].kind else {
        panic!("expected a type declaration");
    };
    let st = specs[0].ty.as_struct().unwrap();
    let fields: Vec<_> = st
        .fields
        .iter()
        .map(|f| {
            (
                f.names[0].name.as_str(),
                f.tag.as_ref().map(|t| t.value.as_str()),
            )
        })
        .collect();
    assert_eq!(
        fields,
        vec![
            ("Message", Some("protogo:\"1\"")),
            ("Other", Some("protogo:\"2\"")),
            ("id", None),
        ]
    );
    assert_eq!(st.fields[2].ty.to_string(), "int64");
}

#[test]
fn parse_function_signature() {
    let file = parse_file(HELLO).unwrap();
    let DeclKind::Func(func) = &file.decls[3].kind else {
        panic!("expected a function");
    };
    assert_eq!(func.name.name, "Hello");
    assert!(func.receiver.is_none());
    assert!(func.has_body);
    assert_eq!(func.ty.params.len(), 1);
    assert_eq!(func.ty.params[0].names[0].name, "_");
    assert_eq!(func.ty.results.len(), 1);
    assert!(func.ty.results[0].names.is_empty());
    assert_eq!(func.ty.to_string(), "(_ GlobalType) ProtoGoHello");
}

#[test]
fn parse_grouped_declarations() {
    let file = parse_file(
        "package p\n\ntype (\n\tA struct{}\n\tB = A\n)\n\nvar (\n\tX A\n\tY, Z = A{}, &B{}\n)\n",
    )
    .unwrap();
    let DeclKind::Type(types) = &file.decls[0].kind else {
        panic!("expected types");
    };
    assert_eq!(types.len(), 2);
    assert!(types[1].is_alias);

    let DeclKind::Var(vars) = &file.decls[1].kind else {
        panic!("expected vars");
    };
    assert_eq!(vars[1].names.len(), 2);
    assert!(matches!(vars[1].values[0], Expr::CompositeLit(..)));
    assert!(matches!(vars[1].values[1], Expr::AddressOf(..)));
    assert_eq!(vars[1].type_of(1).map(|t| t.to_string()).as_deref(), Some("*B"));
}

#[test]
fn parse_compound_types() {
    let file = parse_file(
        "package p\nvar V map[string][]*time.Time\nvar C <-chan func(int) error\nvar L List[int, T]\n",
    )
    .unwrap();
    let types: Vec<_> = file
        .decls
        .iter()
        .map(|d| match &d.kind {
            DeclKind::Var(specs) => specs[0].ty.clone().unwrap(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(types[0].to_string(), "map[string][]*time.Time");
    assert!(matches!(types[1], TypeExpr::Chan { .. }));
    assert!(matches!(types[2], TypeExpr::Generic { .. }));
}

#[test]
fn parse_error_reports_position_and_line() {
    let err = parse_file("package p\n\ntype T struct {\n\tX int `protogo:\"1\"\n}\n").unwrap_err();
    let ErrorKind::ParseError { line, context, .. } = err.kind else {
        panic!("expected a parse error, got {:?}", err.kind);
    };
    assert_eq!(line, 4);
    assert!(context.contains("X int"));
}

#[test]
fn missing_package_clause_is_an_error() {
    assert!(matches!(
        parse_file("type T int\n").unwrap_err().kind,
        ErrorKind::ParseError { .. }
    ));
}
