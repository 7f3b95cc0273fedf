//! Output of the command-line front end

use clap::Parser;
use protogo_cli::{Args, describe_error};

use crate::{args, fixture, run_captured};

#[test]
fn text_summary() {
    let (result, out) = run_captured(&args("greeter"));
    result.unwrap();
    assert_eq!(
        out,
        "package greeter: 1 file(s), 3 type(s), 3 var(s), 2 func(s)\n  Greeting {1, 2}\n  Settings {1}\n  Count\nok\n"
    );
}

#[test]
fn json_report() {
    let mut args = args("split");
    args.json = true;
    let (result, out) = run_captured(&args);
    result.unwrap();

    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["package"], "split");
    assert_eq!(json["declarations"]["types"], 2);
    assert_eq!(json["validated"]["package_name"], "split");
    assert_eq!(json["validated"]["types"][0]["name"], "Clock");
    assert_eq!(json["validated"]["types"][0]["tags"], serde_json::json!([1, 3]));
    assert_eq!(json["validated"]["types"][1]["is_struct"], true);
}

#[test]
fn dump_ast_precedes_summary() {
    let mut args = args("missing_tag");
    args.dump_ast = true;
    let (result, out) = run_captured(&args);
    assert!(result.is_err());
    // the dump is written before validation fails
    assert!(out.starts_with("package record\n\ntype Record struct {\n"));
    assert!(!out.contains("ok\n"));
}

#[test]
fn custom_tag_key_from_arguments() {
    let args = Args::parse_from([
        "protogo",
        "--path",
        fixture("greeter").to_str().unwrap(),
        "--tag-key",
        "wire",
    ]);
    let (result, _) = run_captured(&args);
    let message = describe_error(&result.unwrap_err());
    assert!(message.starts_with("Error: Greeting.Text: expected one field tag annotation, got 0"));
    assert!(message.contains("greeter.go:9:"));
    assert!(message.contains("in type Greeting"));
}

#[test]
fn loader_error_has_no_location() {
    let (result, out) = run_captured(&args("two_packages"));
    let message = describe_error(&result.unwrap_err());
    assert!(message.starts_with("Error: "));
    assert!(message.contains("[alpha, beta]"));
    assert!(!message.contains('\n'));
    assert!(out.is_empty());
}
