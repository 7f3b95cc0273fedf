//! Token types for Go source.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token is an opening delimiter.
    #[must_use]
    pub const fn is_open_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::LParen | TokenKind::LBracket | TokenKind::LBrace
        )
    }

    /// Returns true if this token is a closing delimiter.
    #[must_use]
    pub const fn is_close_delimiter(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::RParen | TokenKind::RBracket | TokenKind::RBrace
        )
    }
}

/// Reserved words of the language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum Keyword {
    Break,
    Case,
    Chan,
    Const,
    Continue,
    Default,
    Defer,
    Else,
    Fallthrough,
    For,
    Func,
    Go,
    Goto,
    If,
    Import,
    Interface,
    Map,
    Package,
    Range,
    Return,
    Select,
    Struct,
    Switch,
    Type,
    Var,
}

impl Keyword {
    /// Looks up a keyword by its spelling.
    #[must_use]
    pub fn from_ident(ident: &str) -> Option<Self> {
        let kw = match ident {
            "break" => Self::Break,
            "case" => Self::Case,
            "chan" => Self::Chan,
            "const" => Self::Const,
            "continue" => Self::Continue,
            "default" => Self::Default,
            "defer" => Self::Defer,
            "else" => Self::Else,
            "fallthrough" => Self::Fallthrough,
            "for" => Self::For,
            "func" => Self::Func,
            "go" => Self::Go,
            "goto" => Self::Goto,
            "if" => Self::If,
            "import" => Self::Import,
            "interface" => Self::Interface,
            "map" => Self::Map,
            "package" => Self::Package,
            "range" => Self::Range,
            "return" => Self::Return,
            "select" => Self::Select,
            "struct" => Self::Struct,
            "switch" => Self::Switch,
            "type" => Self::Type,
            "var" => Self::Var,
            _ => return None,
        };
        Some(kw)
    }

    /// Returns the spelling of this keyword.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Break => "break",
            Self::Case => "case",
            Self::Chan => "chan",
            Self::Const => "const",
            Self::Continue => "continue",
            Self::Default => "default",
            Self::Defer => "defer",
            Self::Else => "else",
            Self::Fallthrough => "fallthrough",
            Self::For => "for",
            Self::Func => "func",
            Self::Go => "go",
            Self::Goto => "goto",
            Self::If => "if",
            Self::Import => "import",
            Self::Interface => "interface",
            Self::Map => "map",
            Self::Package => "package",
            Self::Range => "range",
            Self::Return => "return",
            Self::Select => "select",
            Self::Struct => "struct",
            Self::Switch => "switch",
            Self::Type => "type",
            Self::Var => "var",
        }
    }

    /// Returns true if a newline after this keyword ends the statement.
    #[must_use]
    pub const fn ends_statement(self) -> bool {
        matches!(
            self,
            Self::Break | Self::Continue | Self::Fallthrough | Self::Return
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types for Go source.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `;`, either written or inserted at a line end
    Semicolon {
        /// True when inserted by the lexer rather than written.
        implicit: bool,
    },
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `:`
    Colon,
    /// `=`
    Assign,
    /// `*`
    Star,
    /// `&`
    Amp,
    /// `<-`
    Arrow,
    /// `~`
    Tilde,
    /// `|`
    Pipe,
    /// Any other operator, such as `+=` or `&&`
    Op(&'static str),

    // Words
    /// Identifier like `Message` or `_`
    Ident(String),
    /// Reserved word
    Keyword(Keyword),

    // Literals
    /// Integer literal as written, like `42` or `0x2A`
    Int(String),
    /// Floating-point literal as written
    Float(String),
    /// Imaginary literal as written, like `2i`
    Imag(String),
    /// Rune literal as written, like `'a'`
    Char(String),
    /// Interpreted string literal, with escapes decoded
    String(String),
    /// Raw string literal, with carriage returns removed
    RawString(String),

    // Meta
    /// Comment text (including the delimiters)
    Comment(String),
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during parsing.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns true if a newline directly after this token ends the statement.
    #[must_use]
    pub fn ends_line(&self) -> bool {
        match self {
            Self::Ident(_)
            | Self::Int(_)
            | Self::Float(_)
            | Self::Imag(_)
            | Self::Char(_)
            | Self::String(_)
            | Self::RawString(_)
            | Self::RParen
            | Self::RBracket
            | Self::RBrace => true,
            Self::Op(op) => matches!(*op, "++" | "--"),
            Self::Keyword(kw) => kw.ends_statement(),
            _ => false,
        }
    }

    /// Returns true if this token can begin a type expression.
    #[must_use]
    pub const fn starts_type(&self) -> bool {
        matches!(
            self,
            Self::Ident(_)
                | Self::Star
                | Self::LBracket
                | Self::LParen
                | Self::Arrow
                | Self::Ellipsis
                | Self::Keyword(
                    Keyword::Map
                        | Keyword::Chan
                        | Keyword::Func
                        | Keyword::Struct
                        | Keyword::Interface
                )
        )
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Semicolon { implicit: true } => "newline",
            Self::Semicolon { implicit: false } => "';'",
            Self::Dot => "'.'",
            Self::Ellipsis => "'...'",
            Self::Colon => "':'",
            Self::Assign => "'='",
            Self::Star => "'*'",
            Self::Amp => "'&'",
            Self::Arrow => "'<-'",
            Self::Tilde => "'~'",
            Self::Pipe => "'|'",
            Self::Op(_) => "operator",
            Self::Ident(_) => "identifier",
            Self::Keyword(kw) => kw.as_str(),
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Imag(_) => "imaginary",
            Self::Char(_) => "rune",
            Self::String(_) | Self::RawString(_) => "string",
            Self::Comment(_) => "comment",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
