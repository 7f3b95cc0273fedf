//! Integration tests for the lexer

use protogo_syntax::{Keyword, Lexer, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::tokenize_all(source)
        .into_iter()
        .map(|t| t.kind)
        .filter(|k| !k.is_trivia())
        .collect()
}

const SEMI: TokenKind = TokenKind::Semicolon { implicit: true };

#[test]
fn build_constraint_is_a_comment() {
    let tokens = Lexer::tokenize_all("//go:build protogo\npackage hello\n");
    assert!(matches!(&tokens[0].kind, TokenKind::Comment(c) if c == "//go:build protogo"));
    assert_eq!(tokens[1].kind, TokenKind::Keyword(Keyword::Package));
    assert_eq!(tokens[1].span.line, 2);
}

#[test]
fn struct_field_line() {
    assert_eq!(
        kinds("Message string `protogo:\"1\"`\n"),
        vec![
            TokenKind::Ident("Message".into()),
            TokenKind::Ident("string".into()),
            TokenKind::RawString("protogo:\"1\"".into()),
            SEMI,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn function_header() {
    assert_eq!(
        kinds("func Hello(_ GlobalType) ProtoGoHello {\n}"),
        vec![
            TokenKind::Keyword(Keyword::Func),
            TokenKind::Ident("Hello".into()),
            TokenKind::LParen,
            TokenKind::Ident("_".into()),
            TokenKind::Ident("GlobalType".into()),
            TokenKind::RParen,
            TokenKind::Ident("ProtoGoHello".into()),
            TokenKind::LBrace,
            TokenKind::RBrace,
            SEMI,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_track_lines_and_columns() {
    let tokens = Lexer::tokenize_all("type T struct {\n\tX int\n}\n");
    let x = tokens
        .iter()
        .find(|t| t.kind == TokenKind::Ident("X".into()))
        .unwrap();
    assert_eq!((x.span.line, x.span.column), (2, 2));
    assert_eq!(x.text("type T struct {\n\tX int\n}\n"), "X");
}

#[test]
fn unterminated_raw_string_is_an_error() {
    assert!(kinds("`protogo:\"1\"").iter().any(|k| matches!(k, TokenKind::Error(_))));
}
