//! Token types produced by the Scanner and consumed by the external
//! base-language parser.
//!
//! ## Token Categories
//!
//! | Category | Examples | Description |
//! |----------|----------|-------------|
//! | **Keyword** | `func`, `if`, `for` | Reserved words, written directly or via a keyword glyph |
//! | **Ident** | `x`, `len`, `fmt` | Identifiers: user-written, glyph-emitted, or package-alias |
//! | **Literal** | `50`, `"Hi!"` | Numeric and string literals, unchanged by the dialect |
//! | **Punct** | `(`, `)`, `{`, `}`, `,`, `;` | Structural punctuation |

use glyph_base::Span;

/// The reserved words a keyword glyph (or its ASCII spelling) may produce.
///
/// Named after the base-language keyword it stands in for; the Scanner
/// never invents keywords beyond what the glyph table lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Package,
    Import,
    Const,
    Var,
    Type,
    Func,
    Struct,
    Map,
    Interface,
    Chan,
    If,
    Else,
    Switch,
    Case,
    Default,
    Fallthrough,
    Select,
    For,
    Range,
    Defer,
    Go,
    Return,
    Break,
    Continue,
    Goto,
}

impl Keyword {
    /// The base-language spelling of this keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Package => "package",
            Keyword::Import => "import",
            Keyword::Const => "const",
            Keyword::Var => "var",
            Keyword::Type => "type",
            Keyword::Func => "func",
            Keyword::Struct => "struct",
            Keyword::Map => "map",
            Keyword::Interface => "interface",
            Keyword::Chan => "chan",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::Default => "default",
            Keyword::Fallthrough => "fallthrough",
            Keyword::Select => "select",
            Keyword::For => "for",
            Keyword::Range => "range",
            Keyword::Defer => "defer",
            Keyword::Go => "go",
            Keyword::Return => "return",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
            Keyword::Goto => "goto",
        }
    }

    /// Maps a base-language spelling back to its keyword, for recognizing
    /// ASCII-written keywords the dialect didn't need a glyph for.
    pub fn from_str(s: &str) -> Option<Keyword> {
        Some(match s {
            "package" => Keyword::Package,
            "import" => Keyword::Import,
            "const" => Keyword::Const,
            "var" => Keyword::Var,
            "type" => Keyword::Type,
            "func" => Keyword::Func,
            "struct" => Keyword::Struct,
            "map" => Keyword::Map,
            "interface" => Keyword::Interface,
            "chan" => Keyword::Chan,
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "default" => Keyword::Default,
            "fallthrough" => Keyword::Fallthrough,
            "select" => Keyword::Select,
            "for" => Keyword::For,
            "range" => Keyword::Range,
            "defer" => Keyword::Defer,
            "go" => Keyword::Go,
            "return" => Keyword::Return,
            "break" => Keyword::Break,
            "continue" => Keyword::Continue,
            "goto" => Keyword::Goto,
            _ => return None,
        })
    }
}

/// The kind of a scanned token. Carries the token's own payload; spelling
/// for identifiers and literals lives alongside in [`Token::text`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenType {
    Keyword(Keyword),
    /// An identifier: the user's own name, a glyph-emitted built-in name, or
    /// a package's canonical local alias. [`Token::text`] carries the
    /// spelling; whether it is a user name or a built-in is decided later,
    /// by the Rewriter, not the Scanner (§4.2, §4.3.1 of the design notes).
    Ident,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    /// `(` `)` `{` `}` `[` `]` `,` `;` `:` `.` and the operator set; the
    /// dialect does not extend base-language punctuation or operators, so
    /// the Scanner passes the literal spelling through in [`Token::text`].
    Punct,
    Eof,
}

/// A single scanned token: its kind, its spelling, and its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenType,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenType, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind == TokenType::Keyword(kw)
    }

    pub fn is_ident(&self) -> bool {
        self.kind == TokenType::Ident
    }
}
