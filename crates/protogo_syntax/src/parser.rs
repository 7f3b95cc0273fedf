//! Parser for Go source files.
//!
//! The parser reads the package clause, imports, and every package-scope
//! declaration. Function bodies and initializer expressions are skipped
//! by bracket matching; only the leading composite literal of an
//! initializer is kept.

use protogo_foundation::{Error, ErrorKind, FileId, Result};

use crate::ast::{
    ChanDir, Decl, DeclKind, Expr, Field, FuncDecl, FuncType, Ident, ImportSpec, InterfaceType,
    SourceFile, StructType, Tag, TypeExpr, TypeSpec, ValueSpec,
};
use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Keyword, Token, TokenKind};

/// Parser for one Go source file.
pub struct Parser<'src> {
    /// Tokens with trivia removed; always ends with `Eof`.
    tokens: Vec<Token>,
    /// Index of the current token.
    pos: usize,
    /// Source text (for error messages).
    source: &'src str,
}

impl<'src> Parser<'src> {
    /// Creates a new parser for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::for_file(source, FileId::default())
    }

    /// Creates a parser whose spans point into the given file.
    #[must_use]
    pub fn for_file(source: &'src str, file: FileId) -> Self {
        let tokens = Lexer::for_file(source, file)
            .collect_tokens()
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect();
        Self {
            tokens,
            pos: 0,
            source,
        }
    }

    /// Parses a whole source file.
    ///
    /// # Errors
    /// Returns an error if the source is not a valid file.
    pub fn parse_file(&mut self) -> Result<SourceFile> {
        self.expect_keyword(Keyword::Package)?;
        let package = self.expect_ident()?;
        self.expect_semicolon("package clause")?;

        let mut decls = Vec::new();
        while self.at_keyword(Keyword::Import) {
            decls.push(self.parse_import_decl()?);
            self.expect_semicolon("import declaration")?;
        }

        loop {
            while matches!(self.current().kind, TokenKind::Semicolon { .. }) {
                self.advance();
            }
            if self.current().kind == TokenKind::Eof {
                break;
            }
            decls.push(self.parse_top_level_decl()?);
            self.expect_semicolon("declaration")?;
        }

        Ok(SourceFile { package, decls })
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn parse_top_level_decl(&mut self) -> Result<Decl> {
        let start = self.current().span;
        let kind = match &self.current().kind {
            TokenKind::Keyword(Keyword::Type) => {
                self.advance();
                DeclKind::Type(self.parse_group(Self::parse_type_spec)?)
            }
            TokenKind::Keyword(Keyword::Var) => {
                self.advance();
                DeclKind::Var(self.parse_group(Self::parse_value_spec)?)
            }
            TokenKind::Keyword(Keyword::Const) => {
                self.advance();
                DeclKind::Const(self.parse_group(Self::parse_value_spec)?)
            }
            TokenKind::Keyword(Keyword::Func) => DeclKind::Func(self.parse_func_decl()?),
            TokenKind::Keyword(Keyword::Import) => {
                return Err(self.error("imports must appear before other declarations"));
            }
            _ => return Err(self.unexpected("declaration")),
        };
        Ok(Decl {
            kind,
            span: start.to(self.last_span()),
        })
    }

    fn parse_import_decl(&mut self) -> Result<Decl> {
        let start = self.current().span;
        self.expect_keyword(Keyword::Import)?;
        let specs = self.parse_group(Self::parse_import_spec)?;
        Ok(Decl {
            kind: DeclKind::Import(specs),
            span: start.to(self.last_span()),
        })
    }

    fn parse_import_spec(&mut self) -> Result<ImportSpec> {
        let start = self.current().span;
        let alias = match &self.current().kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance();
                Some(name)
            }
            TokenKind::Dot => {
                self.advance();
                Some(".".to_string())
            }
            _ => None,
        };
        let path = match &self.current().kind {
            TokenKind::String(path) | TokenKind::RawString(path) => path.clone(),
            _ => return Err(self.unexpected("import path")),
        };
        self.advance();
        Ok(ImportSpec {
            alias,
            path,
            span: start.to(self.last_span()),
        })
    }

    /// Parses either one spec or a parenthesized, semicolon-separated group.
    fn parse_group<T>(&mut self, mut parse_spec: impl FnMut(&mut Self) -> Result<T>) -> Result<Vec<T>> {
        if !self.eat(&TokenKind::LParen) {
            return Ok(vec![parse_spec(self)?]);
        }
        let mut specs = Vec::new();
        while self.current().kind != TokenKind::RParen {
            specs.push(parse_spec(self)?);
            if self.current().kind != TokenKind::RParen {
                self.expect_semicolon("specification")?;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(specs)
    }

    fn parse_type_spec(&mut self) -> Result<TypeSpec> {
        let name = self.expect_ident()?;
        let type_params = if self.at_type_params() {
            Some(self.skip_bracketed_text()?)
        } else {
            None
        };
        let is_alias = self.eat(&TokenKind::Assign);
        let ty = self.parse_type()?;
        Ok(TypeSpec {
            span: name.span.to(self.last_span()),
            name,
            type_params,
            is_alias,
            ty,
        })
    }

    /// Distinguishes `type G[T any] ...` from `type A [N]int`.
    fn at_type_params(&self) -> bool {
        self.current().kind == TokenKind::LBracket
            && matches!(self.peek(1), TokenKind::Ident(_))
            && matches!(
                self.peek(2),
                TokenKind::Ident(_)
                    | TokenKind::Comma
                    | TokenKind::Tilde
                    | TokenKind::LBracket
                    | TokenKind::Keyword(
                        Keyword::Interface
                            | Keyword::Func
                            | Keyword::Map
                            | Keyword::Chan
                            | Keyword::Struct
                    )
            )
    }

    fn parse_value_spec(&mut self) -> Result<ValueSpec> {
        let start = self.current().span;
        let names = self.parse_ident_list()?;
        let ty = if self.at_spec_end() || self.current().kind == TokenKind::Assign {
            None
        } else {
            Some(self.parse_type()?)
        };
        let mut values = Vec::new();
        if self.eat(&TokenKind::Assign) {
            values.push(self.parse_expr()?);
            while self.eat(&TokenKind::Comma) {
                values.push(self.parse_expr()?);
            }
        }
        Ok(ValueSpec {
            names,
            ty,
            values,
            span: start.to(self.last_span()),
        })
    }

    fn parse_func_decl(&mut self) -> Result<FuncDecl> {
        let start = self.current().span;
        self.expect_keyword(Keyword::Func)?;

        let receiver = if self.current().kind == TokenKind::LParen {
            let mut fields = self.parse_params()?;
            if fields.len() != 1 {
                return Err(self.error_at(start, "method must have exactly one receiver"));
            }
            fields.pop()
        } else {
            None
        };

        let name = self.expect_ident()?;
        let type_params = if self.current().kind == TokenKind::LBracket {
            Some(self.skip_bracketed_text()?)
        } else {
            None
        };
        let ty = self.parse_signature()?;

        let has_body = self.current().kind == TokenKind::LBrace;
        if has_body {
            self.skip_balanced()?;
        }

        Ok(FuncDecl {
            name,
            receiver,
            type_params,
            ty,
            has_body,
            span: start.to(self.last_span()),
        })
    }

    // =========================================================================
    // Signatures
    // =========================================================================

    fn parse_signature(&mut self) -> Result<FuncType> {
        let params = self.parse_params()?;
        let results = if self.current().kind == TokenKind::LParen {
            self.parse_params()?
        } else if self.current().kind.starts_type() {
            let ty = self.parse_type()?;
            vec![Field {
                names: Vec::new(),
                span: ty.span(),
                ty,
                tag: None,
            }]
        } else {
            Vec::new()
        };
        Ok(FuncType { params, results })
    }

    /// Parses `( ... )` into parameter groups.
    ///
    /// Either every entry is named or none is; in a named list, bare names
    /// share the type of the next named entry (`a, b int`).
    fn parse_params(&mut self) -> Result<Vec<Field>> {
        let open = self.expect(&TokenKind::LParen)?;

        let mut entries: Vec<(Option<Ident>, TypeExpr)> = Vec::new();
        while self.current().kind != TokenKind::RParen {
            let named = matches!(self.current().kind, TokenKind::Ident(_))
                && self.peek(1).starts_type();
            if named {
                let name = self.expect_ident()?;
                entries.push((Some(name), self.parse_type()?));
            } else {
                entries.push((None, self.parse_type()?));
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        if entries.iter().all(|(name, _)| name.is_none()) {
            return Ok(entries
                .into_iter()
                .map(|(_, ty)| Field {
                    names: Vec::new(),
                    span: ty.span(),
                    ty,
                    tag: None,
                })
                .collect());
        }

        let mut fields = Vec::new();
        let mut pending: Vec<Ident> = Vec::new();
        for (name, ty) in entries {
            match (name, ty) {
                (Some(name), ty) => {
                    pending.push(name);
                    let names = std::mem::take(&mut pending);
                    fields.push(Field {
                        span: names[0].span.to(ty.span()),
                        names,
                        ty,
                        tag: None,
                    });
                }
                (None, TypeExpr::Named(ident)) => pending.push(ident),
                (None, ty) => {
                    return Err(self.error_at(ty.span(), "mixed named and unnamed parameters"));
                }
            }
        }
        if let Some(first) = pending.first() {
            return Err(self.error_at(first.span, "mixed named and unnamed parameters"));
        }
        if fields.is_empty() {
            return Err(self.error_at(open.span, "empty parameter group"));
        }
        Ok(fields)
    }

    // =========================================================================
    // Types
    // =========================================================================

    /// Parses a type expression.
    fn parse_type(&mut self) -> Result<TypeExpr> {
        let start = self.current().span;
        match &self.current().kind {
            TokenKind::Ident(_) => {
                let base = self.parse_type_name()?;
                if self.current().kind == TokenKind::LBracket {
                    self.advance();
                    let mut args = vec![self.parse_type()?];
                    while self.eat(&TokenKind::Comma) {
                        if self.current().kind == TokenKind::RBracket {
                            break;
                        }
                        args.push(self.parse_type()?);
                    }
                    self.expect(&TokenKind::RBracket)?;
                    return Ok(TypeExpr::Generic {
                        base: Box::new(base),
                        args,
                        span: start.to(self.last_span()),
                    });
                }
                Ok(base)
            }
            TokenKind::Star => {
                self.advance();
                let inner = self.parse_type()?;
                Ok(TypeExpr::Pointer(Box::new(inner), start.to(self.last_span())))
            }
            TokenKind::LBracket => {
                if self.peek(1) == &TokenKind::RBracket {
                    self.advance();
                    self.advance();
                    let elem = self.parse_type()?;
                    return Ok(TypeExpr::Slice(Box::new(elem), start.to(self.last_span())));
                }
                let len = self.skip_bracketed_text()?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Array {
                    len,
                    elem: Box::new(elem),
                    span: start.to(self.last_span()),
                })
            }
            TokenKind::Keyword(Keyword::Map) => {
                self.advance();
                self.expect(&TokenKind::LBracket)?;
                let key = self.parse_type()?;
                self.expect(&TokenKind::RBracket)?;
                let value = self.parse_type()?;
                Ok(TypeExpr::Map {
                    key: Box::new(key),
                    value: Box::new(value),
                    span: start.to(self.last_span()),
                })
            }
            TokenKind::Keyword(Keyword::Chan) => {
                self.advance();
                let dir = if self.eat(&TokenKind::Arrow) {
                    ChanDir::Send
                } else {
                    ChanDir::Both
                };
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir,
                    elem: Box::new(elem),
                    span: start.to(self.last_span()),
                })
            }
            TokenKind::Arrow => {
                self.advance();
                self.expect_keyword(Keyword::Chan)?;
                let elem = self.parse_type()?;
                Ok(TypeExpr::Chan {
                    dir: ChanDir::Recv,
                    elem: Box::new(elem),
                    span: start.to(self.last_span()),
                })
            }
            TokenKind::Keyword(Keyword::Func) => {
                self.advance();
                let sig = self.parse_signature()?;
                Ok(TypeExpr::Func(Box::new(sig), start.to(self.last_span())))
            }
            TokenKind::Keyword(Keyword::Struct) => Ok(TypeExpr::Struct(self.parse_struct_type()?)),
            TokenKind::Keyword(Keyword::Interface) => {
                self.advance();
                let is_empty = self.current().kind == TokenKind::LBrace
                    && self.peek(1) == &TokenKind::RBrace;
                self.skip_balanced()?;
                Ok(TypeExpr::Interface(InterfaceType {
                    is_empty,
                    span: start.to(self.last_span()),
                }))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_type()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ellipsis => {
                self.advance();
                let elem = self.parse_type()?;
                Ok(TypeExpr::Ellipsis(Box::new(elem), start.to(self.last_span())))
            }
            _ => Err(self.unexpected("type")),
        }
    }

    /// Parses `Name` or `pkg.Name`.
    fn parse_type_name(&mut self) -> Result<TypeExpr> {
        let first = self.expect_ident()?;
        if self.eat(&TokenKind::Dot) {
            let name = self.expect_ident()?;
            return Ok(TypeExpr::Qualified {
                package: first,
                name,
            });
        }
        Ok(TypeExpr::Named(first))
    }

    fn parse_struct_type(&mut self) -> Result<StructType> {
        let start = self.current().span;
        self.expect_keyword(Keyword::Struct)?;
        self.expect(&TokenKind::LBrace)?;

        let mut fields = Vec::new();
        while self.current().kind != TokenKind::RBrace {
            if self.current().kind == TokenKind::Eof {
                return Err(self.error_at(start, "unterminated struct type"));
            }
            fields.push(self.parse_field_decl()?);
            if self.current().kind != TokenKind::RBrace {
                self.expect_semicolon("field declaration")?;
            }
        }
        self.expect(&TokenKind::RBrace)?;

        Ok(StructType {
            fields,
            span: start.to(self.last_span()),
        })
    }

    fn parse_field_decl(&mut self) -> Result<Field> {
        let start = self.current().span;
        let (names, ty) = match (&self.current().kind, self.peek(1)) {
            (TokenKind::Star, _) => (Vec::new(), self.parse_type()?),
            (TokenKind::Ident(_), TokenKind::Comma) => {
                let names = self.parse_ident_list()?;
                (names, self.parse_type()?)
            }
            (
                TokenKind::Ident(_),
                TokenKind::Dot
                | TokenKind::String(_)
                | TokenKind::RawString(_)
                | TokenKind::Semicolon { .. }
                | TokenKind::RBrace,
            ) => (Vec::new(), self.parse_type_name()?),
            (TokenKind::Ident(_), next) if next.starts_type() => {
                let name = self.expect_ident()?;
                (vec![name], self.parse_type()?)
            }
            _ => return Err(self.unexpected("field name or embedded type")),
        };

        let tag = match &self.current().kind {
            TokenKind::String(value) | TokenKind::RawString(value) => {
                let tag = Tag {
                    value: value.clone(),
                    span: self.current().span,
                };
                self.advance();
                Some(tag)
            }
            _ => None,
        };

        Ok(Field {
            names,
            ty,
            tag,
            span: start.to(self.last_span()),
        })
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Parses one initializer expression, keeping only a leading composite
    /// literal that makes up the whole expression.
    fn parse_expr(&mut self) -> Result<Expr> {
        let start = self.current().span;
        if let Some(expr) = self.parse_literal()? {
            if self.at_expr_end() {
                return Ok(expr);
            }
        }
        self.skip_expr_rest()?;
        Ok(Expr::Other(start.to(self.last_span())))
    }

    fn parse_literal(&mut self) -> Result<Option<Expr>> {
        let start = self.current().span;
        if self.eat(&TokenKind::Amp) {
            let inner = self.parse_literal()?;
            return Ok(inner.map(|e| Expr::AddressOf(Box::new(e), start.to(self.last_span()))));
        }

        let could_be_type = matches!(
            self.current().kind,
            TokenKind::Ident(_)
                | TokenKind::LBracket
                | TokenKind::Keyword(Keyword::Struct | Keyword::Map)
        );
        if !could_be_type {
            return Ok(None);
        }

        let saved = self.pos;
        match self.parse_type() {
            Ok(ty) if self.current().kind == TokenKind::LBrace => {
                self.skip_balanced()?;
                Ok(Some(Expr::CompositeLit(ty, start.to(self.last_span()))))
            }
            _ => {
                self.pos = saved;
                Ok(None)
            }
        }
    }

    fn at_expr_end(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Comma | TokenKind::Semicolon { .. } | TokenKind::RParen | TokenKind::Eof
        )
    }

    /// Skips the remainder of an expression, up to a top-level separator.
    fn skip_expr_rest(&mut self) -> Result<()> {
        loop {
            if self.at_expr_end() {
                return Ok(());
            }
            match &self.current().kind {
                TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace => {
                    self.skip_balanced()?;
                }
                TokenKind::RBracket | TokenKind::RBrace => {
                    return Err(self.unexpected("expression"));
                }
                TokenKind::Error(message) => return Err(self.error(message)),
                _ => self.advance(),
            }
        }
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn parse_ident_list(&mut self) -> Result<Vec<Ident>> {
        let mut names = vec![self.expect_ident()?];
        while self.eat(&TokenKind::Comma) {
            names.push(self.expect_ident()?);
        }
        Ok(names)
    }

    fn at_spec_end(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Semicolon { .. } | TokenKind::RParen | TokenKind::Eof
        )
    }

    /// Skips a bracketed region starting at the current open delimiter,
    /// checking that delimiters nest properly. Returns the region's span.
    fn skip_balanced(&mut self) -> Result<Span> {
        let open = self.current().clone();
        if !open.is_open_delimiter() {
            return Err(self.unexpected("'{', '(' or '['"));
        }

        let mut closers = Vec::new();
        loop {
            let token = self.current().clone();
            match &token.kind {
                TokenKind::LParen => closers.push(TokenKind::RParen),
                TokenKind::LBracket => closers.push(TokenKind::RBracket),
                TokenKind::LBrace => closers.push(TokenKind::RBrace),
                TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace => {
                    if closers.pop().as_ref() != Some(&token.kind) {
                        return Err(self.error(&format!("unexpected {}", token.kind.name())));
                    }
                }
                TokenKind::Eof => {
                    return Err(self.error_at(open.span, "unbalanced delimiters"));
                }
                TokenKind::Error(message) => return Err(self.error(message)),
                _ => {}
            }
            self.advance();
            if closers.is_empty() {
                return Ok(open.span.to(token.span));
            }
        }
    }

    /// Skips `[ ... ]` and returns the text between the brackets.
    fn skip_bracketed_text(&mut self) -> Result<String> {
        let span = self.skip_balanced()?;
        let inner = self
            .source
            .get(span.start + 1..span.end.saturating_sub(1))
            .unwrap_or_default();
        Ok(inner.trim().to_string())
    }

    fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek(&self, n: usize) -> &TokenKind {
        let index = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    fn last_span(&self) -> Span {
        let index = self.pos.saturating_sub(1).min(self.tokens.len() - 1);
        self.tokens[index].span
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn at_keyword(&self, keyword: Keyword) -> bool {
        self.current().kind == TokenKind::Keyword(keyword)
    }

    /// Consumes the current token if it has the same kind as `kind`.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        let matches = std::mem::discriminant(&self.current().kind) == std::mem::discriminant(kind);
        if matches {
            self.advance();
        }
        matches
    }

    /// Expects the current token to be of a specific kind, then advances.
    fn expect(&mut self, expected: &TokenKind) -> Result<Token> {
        let token = self.current().clone();
        if self.eat(expected) {
            Ok(token)
        } else {
            Err(self.unexpected(expected.name()))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.at_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(keyword.as_str()))
        }
    }

    fn expect_ident(&mut self) -> Result<Ident> {
        match &self.current().kind {
            TokenKind::Ident(name) => {
                let ident = Ident::new(name.clone(), self.current().span);
                self.advance();
                Ok(ident)
            }
            _ => Err(self.unexpected("identifier")),
        }
    }

    /// Expects a statement terminator; it may be omitted before `)` or `}`.
    fn expect_semicolon(&mut self, after: &str) -> Result<()> {
        match self.current().kind {
            TokenKind::Semicolon { .. } => {
                self.advance();
                Ok(())
            }
            TokenKind::RParen | TokenKind::RBrace | TokenKind::Eof => Ok(()),
            _ => Err(self.unexpected(&format!("';' or newline after {after}"))),
        }
    }

    /// Creates an "expected X, found Y" error, or surfaces a lexer error.
    fn unexpected(&self, expected: &str) -> Error {
        match &self.current().kind {
            TokenKind::Error(message) => self.error(message),
            found => self.error(&format!("expected {expected}, found {}", found.name())),
        }
    }

    /// Creates a parse error at the current position.
    fn error(&self, message: &str) -> Error {
        self.error_at(self.current().span, message)
    }

    /// Creates a parse error at a specific span.
    fn error_at(&self, span: Span, message: &str) -> Error {
        Error::new(ErrorKind::ParseError {
            message: message.to_string(),
            line: span.line,
            column: span.column,
            context: span.line_text(self.source).to_string(),
        })
    }
}

/// Parses a whole source file.
///
/// # Errors
/// Returns an error if the source cannot be parsed.
pub fn parse_file(source: &str) -> Result<SourceFile> {
    Parser::new(source).parse_file()
}
