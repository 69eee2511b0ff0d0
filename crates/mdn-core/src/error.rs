use crate::token::Token;
use std::fmt;

/// Error kinds for character-level failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    /// End of input reached inside a quoted value.
    UnterminatedValue,
    /// Raw (unescaped) line break inside a quoted value.
    LineBreakInValue,
    /// `/` or `</` not followed by `>`.
    MalformedCloseMark,
}

/// A character-level error raised by the lexer.
///
/// Tokenizing stops at the first error; no tokens past it are produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// Human-readable error message.
    pub message: String,
    /// 0-based line where the error occurred.
    pub line: u32,
    /// 0-based column where the error occurred.
    pub column: u32,
    /// Error categorization.
    pub kind: LexErrorKind,
}

impl LexError {
    /// Error for end of input inside a quoted value.
    pub fn unterminated_value(line: u32, column: u32) -> Self {
        Self {
            message: "unexpected end of input, expected '\"'".to_string(),
            line,
            column,
            kind: LexErrorKind::UnterminatedValue,
        }
    }

    /// Error for a raw line break inside a quoted value.
    pub fn line_break_in_value(line: u32, column: u32) -> Self {
        Self {
            message: "unexpected line break inside quoted value".to_string(),
            line,
            column,
            kind: LexErrorKind::LineBreakInValue,
        }
    }

    /// Error for a close marker missing its `>`.
    pub fn expected_close_angle(found: Option<char>, line: u32, column: u32) -> Self {
        let message = match found {
            Some(c) => format!("unexpected '{}', expected '>'", c),
            None => "unexpected end of input, expected '>'".to_string(),
        };
        Self {
            message,
            line,
            column,
            kind: LexErrorKind::MalformedCloseMark,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}:{}", self.message, self.line, self.column)
    }
}

impl std::error::Error for LexError {}

/// Error kinds for token-level grammar violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A token appeared where the grammar disallows it.
    UnexpectedToken,
    /// A `</>` with no matching open element.
    UnmatchedClose,
    /// The token stream ended mid-construct.
    UnexpectedEof,
}

/// A grammar violation raised by the parser.
///
/// Parsing stops at the first violation; no partial document is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Human-readable error message naming the offending token and what
    /// was structurally expected in its place.
    pub message: String,
    /// 0-based line of the offending token (0 for end-of-input errors).
    pub line: u32,
    /// 0-based column of the offending token.
    pub column: u32,
    /// Error categorization.
    pub kind: ParseErrorKind,
}

impl ParseError {
    /// Error for a token that violates a structural precondition.
    pub fn unexpected(token: &Token<'_>, expected: &str) -> Self {
        Self {
            message: format!("unexpected {}, expected {}", token, expected),
            line: token.line,
            column: token.column_start,
            kind: ParseErrorKind::UnexpectedToken,
        }
    }

    /// Error for a `</>` with no open element to close.
    pub fn unmatched_close(token: &Token<'_>) -> Self {
        Self {
            message: "unexpected close marker, no open element".to_string(),
            line: token.line,
            column: token.column_start,
            kind: ParseErrorKind::UnmatchedClose,
        }
    }

    /// Error for a token stream that ends inside an unfinished construct.
    pub fn unexpected_eof(expected: &str) -> Self {
        Self {
            message: format!("unexpected end of input, expected {}", expected),
            line: 0,
            column: 0,
            kind: ParseErrorKind::UnexpectedEof,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == ParseErrorKind::UnexpectedEof {
            f.write_str(&self.message)
        } else {
            write!(f, "{} at {}:{}", self.message, self.line, self.column)
        }
    }
}

impl std::error::Error for ParseError {}

/// Either error a full parse can fail with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Character-level failure from the lexer.
    Lex(LexError),
    /// Token-level failure from the parser.
    Parse(ParseError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Lex(e) => write!(f, "lex error: {}", e),
            Error::Parse(e) => write!(f, "parse error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Lex(e) => Some(e),
            Error::Parse(e) => Some(e),
        }
    }
}

impl From<LexError> for Error {
    fn from(e: LexError) -> Self {
        Error::Lex(e)
    }
}

impl From<ParseError> for Error {
    fn from(e: ParseError) -> Self {
        Error::Parse(e)
    }
}
