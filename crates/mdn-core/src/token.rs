//! Token types produced by the lexer.
//!
//! Every token records the 0-based line and column range it was scanned
//! from, so the parser can point diagnostics at the exact source position.
//! Tokens are immutable once produced.

use std::borrow::Cow;
use std::fmt;

/// The kind of a lexed token.
///
/// `CloseMark` is shared between the self-closing marker `/>` and the
/// block-closing marker `</>`; the parser disambiguates the two by context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A name: `[A-Za-z_][A-Za-z0-9_-]*`.
    Identifier,
    /// A quoted string with escapes already decoded.
    Value,
    /// `(` opening a value list.
    LeftParen,
    /// `)` closing a value list.
    RightParen,
    /// `<` opening an element.
    LeftAngle,
    /// `>` ending an opening tag.
    RightAngle,
    /// `[` opening a parameter list.
    LeftBracket,
    /// `]` closing a parameter list.
    RightBracket,
    /// `/>` or `</>`.
    CloseMark,
    /// `,` separating parameters or values.
    Comma,
}

impl TokenKind {
    /// Human-readable description used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            TokenKind::Identifier => "identifier",
            TokenKind::Value => "value",
            TokenKind::LeftParen => "'('",
            TokenKind::RightParen => "')'",
            TokenKind::LeftAngle => "'<'",
            TokenKind::RightAngle => "'>'",
            TokenKind::LeftBracket => "'['",
            TokenKind::RightBracket => "']'",
            TokenKind::CloseMark => "close marker",
            TokenKind::Comma => "','",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A single lexed token.
///
/// Identifier and escape-free value tokens borrow their text directly from
/// the input; values containing escapes own their decoded text.
/// Punctuation tokens carry an empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    /// What was scanned.
    pub kind: TokenKind,
    /// Token text (empty for punctuation kinds).
    pub text: Cow<'a, str>,
    /// 0-based line of the token.
    pub line: u32,
    /// Column of the first character.
    pub column_start: u32,
    /// Column one past the last character.
    pub column_end: u32,
}

impl<'a> Token<'a> {
    /// Create a token carrying text.
    #[inline]
    pub fn new(
        kind: TokenKind,
        text: Cow<'a, str>,
        line: u32,
        column_start: u32,
        column_end: u32,
    ) -> Self {
        Self {
            kind,
            text,
            line,
            column_start,
            column_end,
        }
    }

    /// Create a punctuation token with empty text at a single column.
    #[inline]
    pub fn punct(kind: TokenKind, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(""),
            line,
            column_start: column,
            column_end: column + 1,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Value => write!(f, "value \"{}\"", self.text),
            _ => f.write_str(self.kind.describe()),
        }
    }
}
