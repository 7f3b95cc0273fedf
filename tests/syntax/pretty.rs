//! Integration tests for the pretty-printer

use protogo_syntax::load_package;
use protogo_syntax::pretty::{
    PrettyConfig, pretty_print_file, pretty_print_package, pretty_print_package_with_config,
};

use crate::fixture;

#[test]
fn print_loaded_package() {
    let package = load_package(fixture("greeter")).unwrap();
    let out = pretty_print_package(&package);
    assert!(out.starts_with("package greeter\n\nimport \"strings\"\n"));
    assert!(out.contains("type Greeting struct {\n\tText string `protogo:\"1\"`\n"));
    assert!(out.contains("\tattempts int\n}\n"));
    assert!(out.contains("var Zero Count\n"));
    assert!(out.contains("func Greet(s Settings) Greeting { ... }\n"));
    assert!(out.contains("func (g Greeting) Loud() Greeting { ... }\n"));
}

#[test]
fn print_positions() {
    let package = load_package(fixture("missing_tag")).unwrap();
    let config = PrettyConfig {
        show_positions: true,
        ..PrettyConfig::default()
    };
    let out = pretty_print_package_with_config(&package, config);
    assert!(out.contains("// 3:1\ntype Record struct {\n"));
}

#[test]
fn printed_declarations_parse_again() {
    let package = load_package(fixture("missing_tag")).unwrap();
    let out = pretty_print_package(&package);
    assert_eq!(
        out,
        "package record\n\ntype Record struct {\n\tID int64 `protogo:\"1\"`\n\tName string\n}\n"
    );
    let reparsed = protogo_syntax::parse_file(&out).unwrap();
    assert_eq!(reparsed.package.name, "record");
    assert_eq!(pretty_print_file(&reparsed), out);
}
