//! Integration tests for struct field tag rules

use protogo_foundation::ErrorKind;

use crate::validate;

#[test]
fn tagged_struct_is_registered_with_its_numbers() {
    let validated = validate(
        "package p\n\ntype Event struct {\n\tID   int64  `protogo:\"1\"`\n\tKind string `protogo:\"4\"`\n\tAt   int64  `json:\"at,omitempty\" protogo:\"2\"`\n\tseen bool\n}\n",
    )
    .unwrap();
    let event = validated.get("Event").unwrap();
    assert!(event.is_struct);
    assert_eq!(event.tags, vec![1, 2, 4]);
}

#[test]
fn numbers_may_repeat_across_structs() {
    let validated = validate(
        "package p\ntype A struct{ X int `protogo:\"1\"` }\ntype B struct{ X int `protogo:\"1\"` }\n",
    )
    .unwrap();
    assert_eq!(validated.struct_count(), 2);
}

#[test]
fn zero_is_a_valid_number() {
    let validated = validate("package p\ntype A struct{ X int `protogo:\"0\"` }\n").unwrap();
    assert_eq!(validated.types[0].tags, vec![0]);
}

#[test]
fn leading_zeros_name_the_same_number() {
    let kind = validate(
        "package p\ntype A struct{\n\tX int `protogo:\"1\"`\n\tY int `protogo:\"01\"`\n}\n",
    )
    .unwrap_err()
    .kind;
    assert_eq!(
        kind,
        ErrorKind::DuplicateTag {
            type_name: "A".into(),
            field: "Y".into(),
            number: 1
        }
    );
}

#[test]
fn negative_number_is_malformed() {
    let kind = validate("package p\ntype A struct{ X int `protogo:\"-1\"` }\n")
        .unwrap_err()
        .kind;
    assert!(matches!(kind, ErrorKind::MalformedTag { matches: 0, .. }));
}

#[test]
fn annotation_is_found_anywhere_in_tag() {
    // the search is unanchored, so a longer key ending in the configured one still matches
    let validated = validate("package p\ntype A struct{ X int `xprotogo:\"3\"` }\n").unwrap();
    assert_eq!(validated.types[0].tags, vec![3]);
}

#[test]
fn missing_tag_points_at_field() {
    let err = validate("package p\n\ntype A struct {\n\tX int `protogo:\"1\"`\n\tName string\n}\n")
        .unwrap_err();
    assert_eq!(
        err.kind,
        ErrorKind::MissingTag {
            type_name: "A".into(),
            field: "Name".into()
        }
    );
    let context = err.context.unwrap();
    assert_eq!((context.line, context.column), (Some(5), Some(2)));
    assert_eq!(context.stack, vec!["type A".to_string()]);
}

#[test]
fn non_struct_types_register_without_numbers() {
    let validated =
        validate("package p\ntype ID int64\ntype Names []string\ntype Alias = ID\n").unwrap();
    let names: Vec<_> = validated.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["ID", "Names", "Alias"]);
    assert!(validated.types.iter().all(|t| !t.is_struct && t.tags.is_empty()));
}
