//! Lexer for Go source.
//!
//! The lexer converts source text into a stream of tokens and inserts
//! the semicolons Go leaves implicit at line ends.

use protogo_foundation::FileId;

use crate::span::Span;
use crate::token::{Keyword, Token, TokenKind};

/// Multi-character operators, longest first so the first prefix match wins.
const OPERATORS: &[&str] = &[
    "<<=", ">>=", "&^=", "...", "&&", "||", "<-", "++", "--", "==", "!=", "<=", ">=", ":=", "+=",
    "-=", "*=", "/=", "%=", "&=", "|=", "^=", "<<", ">>", "&^",
];

/// Lexer for Go source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// File the produced spans belong to.
    file: FileId,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
    /// Whether a newline at this point ends the statement.
    insert_semicolon: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self::for_file(source, FileId::default())
    }

    /// Creates a lexer whose spans point into the given file.
    #[must_use]
    pub fn for_file(source: &'src str, file: FileId) -> Self {
        Self {
            source,
            rest: source,
            file,
            position: 0,
            line: 1,
            column: 1,
            insert_semicolon: false,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_blanks();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            if std::mem::take(&mut self.insert_semicolon) {
                return self.token_from(
                    TokenKind::Semicolon { implicit: true },
                    start,
                    start_line,
                    start_column,
                );
            }
            return self.token_from(TokenKind::Eof, start, start_line, start_column);
        };

        if c == '\n' {
            self.advance();
            // Only reached when a semicolon is pending; blank lines are skipped.
            self.insert_semicolon = false;
            return self.token_from(
                TokenKind::Semicolon { implicit: true },
                start,
                start_line,
                start_column,
            );
        }

        let kind = match c {
            '/' if self.peek_char_n(1) == Some('/') => self.scan_line_comment(),
            '/' if self.peek_char_n(1) == Some('*') => {
                let (kind, crossed_line) = self.scan_block_comment();
                if crossed_line && self.insert_semicolon && kind.is_trivia() {
                    self.insert_semicolon = false;
                    return self.token_from(
                        TokenKind::Semicolon { implicit: true },
                        start,
                        start_line,
                        start_column,
                    );
                }
                kind
            }
            '"' => self.scan_string(),
            '`' => self.scan_raw_string(),
            '\'' => self.scan_rune(),
            c if c.is_ascii_digit() => self.scan_number(),
            '.' if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => self.scan_number(),
            c if is_ident_start(c) => self.scan_word(),
            _ => self.scan_operator(),
        };

        if !kind.is_trivia() {
            self.insert_semicolon = kind.ends_line();
        }

        self.token_from(kind, start, start_line, start_column)
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Comments are included in the output.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        Lexer::new(source).collect_tokens()
    }

    /// Consumes the lexer, returning every remaining token up to and including `Eof`.
    #[must_use]
    pub fn collect_tokens(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    fn token_from(&self, kind: TokenKind, start: usize, line: u32, column: u32) -> Token {
        Token::new(kind, Span::new(self.file, start, self.position, line, column))
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` positions ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Skips whitespace, stopping at a newline that must become a semicolon.
    fn skip_blanks(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' && self.insert_semicolon {
                break;
            }
            if c.is_whitespace() || c == '\u{FEFF}' {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Scans a `//` comment, leaving the newline in place.
    fn scan_line_comment(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        TokenKind::Comment(self.source[start..self.position].to_string())
    }

    /// Scans a `/* */` comment. Also reports whether it spanned a newline.
    fn scan_block_comment(&mut self) -> (TokenKind, bool) {
        let start = self.position;
        self.advance();
        self.advance();
        let mut crossed_line = false;
        loop {
            match self.peek_char() {
                Some('*') if self.peek_char_n(1) == Some('/') => {
                    self.advance();
                    self.advance();
                    break;
                }
                Some(c) => {
                    crossed_line |= c == '\n';
                    self.advance();
                }
                None => {
                    return (TokenKind::Error("comment not terminated".into()), crossed_line);
                }
            }
        }
        (
            TokenKind::Comment(self.source[start..self.position].to_string()),
            crossed_line,
        )
    }

    /// Scans an interpreted string literal, decoding escapes.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // consume opening '"'
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    return TokenKind::String(text);
                }
                Some('\\') => {
                    self.advance();
                    match self.scan_escape('"') {
                        Ok(c) => text.push(c),
                        Err(message) => {
                            self.recover_string('"');
                            return TokenKind::Error(message);
                        }
                    }
                }
                Some('\n') | None => {
                    return TokenKind::Error("string literal not terminated".into());
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
    }

    /// Skips to the end of a literal after a bad escape so lexing can resume.
    fn recover_string(&mut self, quote: char) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.advance();
            if c == quote {
                break;
            }
        }
    }

    /// Decodes one escape sequence; the backslash is already consumed.
    fn scan_escape(&mut self, quote: char) -> Result<char, String> {
        let Some(c) = self.peek_char() else {
            return Err("escape sequence not terminated".into());
        };
        let simple = match c {
            'a' => Some('\u{07}'),
            'b' => Some('\u{08}'),
            'f' => Some('\u{0C}'),
            'n' => Some('\n'),
            'r' => Some('\r'),
            't' => Some('\t'),
            'v' => Some('\u{0B}'),
            '\\' => Some('\\'),
            c if c == quote => Some(c),
            _ => None,
        };
        if let Some(decoded) = simple {
            self.advance();
            return Ok(decoded);
        }

        let (digits, radix) = match c {
            '0'..='7' => (3, 8),
            'x' => (2, 16),
            'u' => (4, 16),
            'U' => (8, 16),
            other => return Err(format!("unknown escape sequence: \\{other}")),
        };
        if radix == 16 {
            self.advance();
        }
        let mut value: u32 = 0;
        for _ in 0..digits {
            let digit = self
                .peek_char()
                .and_then(|c| c.to_digit(radix))
                .ok_or_else(|| "illegal character in escape sequence".to_string())?;
            value = value * radix + digit;
            self.advance();
        }
        char::from_u32(value).ok_or_else(|| "escape sequence is invalid Unicode code point".into())
    }

    /// Scans a raw string literal.
    fn scan_raw_string(&mut self) -> TokenKind {
        self.advance(); // consume opening '`'
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some('`') => {
                    self.advance();
                    return TokenKind::RawString(text);
                }
                Some('\r') => self.advance(),
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
                None => return TokenKind::Error("raw string literal not terminated".into()),
            }
        }
    }

    /// Scans a rune literal, keeping it as written.
    fn scan_rune(&mut self) -> TokenKind {
        let start = self.position;
        self.advance(); // consume opening '\''
        let mut count = 0;
        loop {
            match self.peek_char() {
                Some('\'') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    if let Err(message) = self.scan_escape('\'') {
                        self.recover_string('\'');
                        return TokenKind::Error(message);
                    }
                    count += 1;
                }
                Some('\n') | None => {
                    return TokenKind::Error("rune literal not terminated".into());
                }
                Some(_) => {
                    self.advance();
                    count += 1;
                }
            }
        }
        if count == 1 {
            TokenKind::Char(self.source[start..self.position].to_string())
        } else {
            TokenKind::Error("illegal rune literal".into())
        }
    }

    /// Scans a numeric literal, classifying it by its spelling.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;
        let is_hex = self.rest.starts_with("0x") || self.rest.starts_with("0X");
        let mut prev = '\0';
        while let Some(c) = self.peek_char() {
            let exponent_sign = matches!(c, '+' | '-')
                && if is_hex {
                    matches!(prev, 'p' | 'P')
                } else {
                    matches!(prev, 'e' | 'E')
                };
            if c.is_ascii_alphanumeric() || c == '_' || c == '.' || exponent_sign {
                prev = c;
                self.advance();
            } else {
                break;
            }
        }

        let text = self.source[start..self.position].to_string();
        let is_float = text.contains('.')
            || if is_hex {
                text.contains(['p', 'P'])
            } else {
                text.contains(['e', 'E'])
            };
        if text.ends_with('i') {
            TokenKind::Imag(text)
        } else if is_float {
            TokenKind::Float(text)
        } else {
            TokenKind::Int(text)
        }
    }

    /// Scans an identifier or keyword.
    fn scan_word(&mut self) -> TokenKind {
        let start = self.position;
        while let Some(c) = self.peek_char() {
            if is_ident_char(c) {
                self.advance();
            } else {
                break;
            }
        }
        let word = &self.source[start..self.position];
        match Keyword::from_ident(word) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(word.to_string()),
        }
    }

    /// Scans punctuation and operators.
    fn scan_operator(&mut self) -> TokenKind {
        if let Some(op) = OPERATORS.iter().find(|op| self.rest.starts_with(**op)) {
            for _ in 0..op.len() {
                self.advance();
            }
            return match *op {
                "..." => TokenKind::Ellipsis,
                "<-" => TokenKind::Arrow,
                op => TokenKind::Op(op),
            };
        }

        let Some(c) = self.peek_char() else {
            return TokenKind::Eof;
        };
        self.advance();
        match c {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '[' => TokenKind::LBracket,
            ']' => TokenKind::RBracket,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon { implicit: false },
            '.' => TokenKind::Dot,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Assign,
            '*' => TokenKind::Star,
            '&' => TokenKind::Amp,
            '~' => TokenKind::Tilde,
            '|' => TokenKind::Pipe,
            '+' => TokenKind::Op("+"),
            '-' => TokenKind::Op("-"),
            '/' => TokenKind::Op("/"),
            '%' => TokenKind::Op("%"),
            '^' => TokenKind::Op("^"),
            '<' => TokenKind::Op("<"),
            '>' => TokenKind::Op(">"),
            '!' => TokenKind::Op("!"),
            c => TokenKind::Error(format!("unexpected character: {c:?}")),
        }
    }
}

/// Returns true if `c` can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns true if `c` can appear in an identifier (not at start).
fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_numeric()
}
