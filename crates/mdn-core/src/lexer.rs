//! Character-level lexer for MDN markup.
//!
//! The lexer walks the input one character at a time and produces the flat
//! token sequence consumed by the parser. It is total over arbitrary input:
//! the only failures are an unterminated quoted value, a raw line break
//! inside a quoted value, and a close marker missing its `>`.
//!
//! # Performance
//!
//! - Zero-copy: identifiers and escape-free values borrow from the input
//! - Comment skipping uses `memchr` for fast newline detection
//! - Values allocate only once an escape sequence is actually seen

use std::borrow::Cow;

use memchr::memchr;

use crate::error::LexError;
use crate::token::{Token, TokenKind};

/// Sentinel character standing in for end of input.
const EOF: char = '\0';

#[inline(always)]
fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

#[inline(always)]
fn is_identifier_body(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

/// Convert an input string into its token sequence.
///
/// Convenience wrapper around [`Lexer::tokenize`].
#[inline]
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::new(source).tokenize()
}

/// Character-level scanner over a single input string.
///
/// Tracks a 0-based line counter and a column position that resets to 0 at
/// each line break and increments otherwise.
pub struct Lexer<'a> {
    /// The complete input text.
    src: &'a str,
    /// Input as bytes for `memchr` scanning.
    bytes: &'a [u8],
    /// Byte offset of `current` within `src`.
    pos: usize,
    /// The character under the cursor (`EOF` past the end).
    current: char,
    /// 0-based line of `current`.
    line: u32,
    /// Column of `current` within its line.
    column: u32,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(src: &'a str) -> Self {
        let current = src.chars().next().unwrap_or(EOF);
        let (line, column) = if current == '\n' { (1, 0) } else { (0, 0) };
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            current,
            line,
            column,
        }
    }

    /// Move the cursor to the next character.
    #[inline(always)]
    fn advance(&mut self) {
        if self.pos >= self.src.len() {
            self.current = EOF;
            return;
        }
        self.pos += self.current.len_utf8();
        self.current = self.src[self.pos..].chars().next().unwrap_or(EOF);
        if self.current == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }

    /// Scan the whole input into a token sequence.
    ///
    /// Stops at the first character-level violation; tokens already produced
    /// are discarded along with the error's `Err`.
    pub fn tokenize(mut self) -> Result<Vec<Token<'a>>, LexError> {
        let mut tokens = Vec::new();

        while self.current != EOF {
            if is_identifier_start(self.current) {
                tokens.push(self.scan_identifier());
                continue;
            }
            if self.current == '"' {
                tokens.push(self.scan_value()?);
                // A `#` directly after the closing quote begins a comment.
                if self.current == '#' {
                    self.skip_comment();
                }
                continue;
            }
            match self.current {
                '#' => {
                    self.skip_comment();
                    continue;
                }
                ',' => tokens.push(Token::punct(TokenKind::Comma, self.line, self.column)),
                '(' => tokens.push(Token::punct(TokenKind::LeftParen, self.line, self.column)),
                ')' => tokens.push(Token::punct(TokenKind::RightParen, self.line, self.column)),
                '[' => tokens.push(Token::punct(TokenKind::LeftBracket, self.line, self.column)),
                ']' => tokens.push(Token::punct(TokenKind::RightBracket, self.line, self.column)),
                '>' => tokens.push(Token::punct(TokenKind::RightAngle, self.line, self.column)),
                '<' => {
                    let (line, start) = (self.line, self.column);
                    self.advance();
                    if self.current == '/' {
                        self.advance();
                        if self.current != '>' {
                            return Err(self.close_angle_error());
                        }
                        tokens.push(Token::new(
                            TokenKind::CloseMark,
                            Cow::Borrowed(""),
                            line,
                            start,
                            self.column + 1,
                        ));
                    } else {
                        // Lone `<`: the peeked character is re-dispatched.
                        tokens.push(Token::punct(TokenKind::LeftAngle, line, start));
                        continue;
                    }
                }
                '/' => {
                    let (line, start) = (self.line, self.column);
                    self.advance();
                    if self.current != '>' {
                        return Err(self.close_angle_error());
                    }
                    tokens.push(Token::new(
                        TokenKind::CloseMark,
                        Cow::Borrowed(""),
                        line,
                        start,
                        self.column + 1,
                    ));
                }
                // Whitespace and any other character produce no token.
                _ => {}
            }
            self.advance();
        }

        Ok(tokens)
    }

    /// Scan an identifier starting at the cursor.
    ///
    /// Leaves the cursor on the first non-identifier character.
    fn scan_identifier(&mut self) -> Token<'a> {
        let line = self.line;
        let start_col = self.column;
        let start = self.pos;
        self.advance();
        while is_identifier_body(self.current) {
            self.advance();
        }
        Token::new(
            TokenKind::Identifier,
            Cow::Borrowed(&self.src[start..self.pos]),
            line,
            start_col,
            self.column,
        )
    }

    /// Scan a quoted value starting at the opening `"`.
    ///
    /// Decodes the escape set `{\\, \t, \r, \n, \f, \"}`. A backslash
    /// followed by any other character is dropped and the character kept
    /// unchanged, with no diagnostic. Leaves the cursor on the character
    /// after the closing quote.
    fn scan_value(&mut self) -> Result<Token<'a>, LexError> {
        let line = self.line;
        let start_col = self.column;
        self.advance();
        let content_start = self.pos;

        // Allocated lazily: `None` means the value so far is a clean slice
        // of the input and can be borrowed verbatim.
        let mut buf: Option<String> = None;
        let mut pending_escape = false;

        loop {
            match self.current {
                '\\' => {
                    if pending_escape {
                        // Safe: the flag is only set after `buf` is filled.
                        buf.as_mut().unwrap().push('\\');
                        pending_escape = false;
                    } else {
                        buf.get_or_insert_with(|| self.src[content_start..self.pos].to_string());
                        pending_escape = true;
                    }
                }
                '"' => {
                    if pending_escape {
                        buf.as_mut().unwrap().push('"');
                        pending_escape = false;
                    } else {
                        break;
                    }
                }
                EOF => return Err(LexError::unterminated_value(self.line, self.column)),
                '\n' => return Err(LexError::line_break_in_value(self.line, self.column)),
                c => {
                    if pending_escape {
                        let decoded = match c {
                            't' => '\t',
                            'r' => '\r',
                            'n' => '\n',
                            'f' => '\u{c}',
                            other => other,
                        };
                        buf.as_mut().unwrap().push(decoded);
                        pending_escape = false;
                    } else if let Some(b) = buf.as_mut() {
                        b.push(c);
                    }
                }
            }
            self.advance();
        }

        let text = match buf {
            Some(owned) => Cow::Owned(owned),
            None => Cow::Borrowed(&self.src[content_start..self.pos]),
        };
        let token = Token::new(TokenKind::Value, text, line, start_col, self.column + 1);
        self.advance();
        Ok(token)
    }

    /// Discard characters up to (not including) the next line break.
    ///
    /// Uses `memchr` to jump straight to the newline.
    fn skip_comment(&mut self) {
        match memchr(b'\n', &self.bytes[self.pos..]) {
            Some(offset) => {
                self.pos += offset;
                self.current = '\n';
                self.line += 1;
                self.column = 0;
            }
            None => {
                self.pos = self.src.len();
                self.current = EOF;
            }
        }
    }

    fn close_angle_error(&self) -> LexError {
        let found = if self.current == EOF {
            None
        } else {
            Some(self.current)
        };
        LexError::expected_close_angle(found, self.line, self.column)
    }
}
