//! Finite-state parser for MDN token streams.
//!
//! Consumes the token sequence produced by [`crate::lexer`] and builds a
//! [`Document`] tree. Parsing is strictly left-to-right with no recovery:
//! the first grammar violation stops the parse and no partial document is
//! returned.
//!
//! The parser is a state machine with one state per grammatical context.
//! Each state owns the element and parameter under construction, so a
//! half-built node can never leak into a completed document. Open block
//! elements live on an explicit stack and children attach to their parent
//! when they close, which preserves sibling order without holding a live
//! reference into the tree.

use crate::ast::{Document, Element, Param};
use crate::error::ParseError;
use crate::token::{Token, TokenKind};

/// Parse a token sequence into a document.
///
/// Convenience wrapper around [`Parser::parse`].
#[inline]
pub fn parse(tokens: &[Token<'_>]) -> Result<Document, ParseError> {
    Parser::new().parse(tokens)
}

/// Grammatical context, one variant per position in an element.
///
/// States own the nodes being built; transitions move them along until
/// they attach to the tree.
enum State {
    /// Between elements, at document level or inside an open block.
    TopLevel,
    /// Inside an opening tag, before its `>` or `/>`.
    InElement { element: Element },
    /// Inside `[...]`, awaiting a parameter name.
    InParamList { element: Element, param: Param },
    /// After a parameter name, awaiting `(`, `,` or `]`.
    InParam { element: Element, param: Param },
    /// Inside a parameter's `(...)` value list.
    InValueList {
        element: Element,
        param: Param,
        /// True directly after `(` or a `,`; a value may only arrive then.
        expect_value: bool,
    },
}

/// Stream parser building a [`Document`] from tokens.
pub struct Parser {
    state: State,
    document: Document,
    /// Elements that consumed their `>` but not yet their `</>`,
    /// innermost last.
    open: Vec<Element>,
}

impl Parser {
    /// Create a parser in its initial state.
    pub fn new() -> Self {
        Self {
            state: State::TopLevel,
            document: Document::new(),
            open: Vec::new(),
        }
    }

    /// Consume the whole token sequence and return the finished document.
    pub fn parse(mut self, tokens: &[Token<'_>]) -> Result<Document, ParseError> {
        for token in tokens {
            let state = std::mem::replace(&mut self.state, State::TopLevel);
            self.state = self.transition(state, token)?;
        }
        self.finish()
    }

    /// One transition of the machine: (state, token) -> state.
    fn transition(&mut self, state: State, token: &Token<'_>) -> Result<State, ParseError> {
        use TokenKind::*;

        match (state, token.kind) {
            // ---- between elements -------------------------------------
            (State::TopLevel, LeftAngle) => Ok(State::InElement {
                element: Element::new(""),
            }),
            (State::TopLevel, CloseMark) => match self.open.pop() {
                Some(element) => {
                    self.attach(element);
                    Ok(State::TopLevel)
                }
                None => Err(ParseError::unmatched_close(token)),
            },
            (State::TopLevel, _) => Err(ParseError::unexpected(token, "'<'")),

            // ---- inside an opening tag --------------------------------
            (State::InElement { mut element }, Identifier) => {
                if element.name().is_empty() {
                    element.set_name(token.text.as_ref());
                    Ok(State::InElement { element })
                } else {
                    Err(ParseError::unexpected(token, "'['"))
                }
            }
            (State::InElement { element }, LeftBracket) => Ok(State::InParamList {
                element,
                param: Param::new(""),
            }),
            (State::InElement { element }, RightAngle) => {
                if element.name().is_empty() {
                    Err(ParseError::unexpected(token, "identifier"))
                } else {
                    self.open.push(element);
                    Ok(State::TopLevel)
                }
            }
            (State::InElement { element }, CloseMark) => {
                if element.name().is_empty() {
                    Err(ParseError::unexpected(token, "identifier"))
                } else {
                    // Self-closing form: the element completes childless.
                    self.attach(element);
                    Ok(State::TopLevel)
                }
            }
            (State::InElement { .. }, LeftAngle) => Err(ParseError::unexpected(token, "'>'")),
            (State::InElement { .. }, _) => Err(ParseError::unexpected(token, "'['")),

            // ---- awaiting a parameter name ----------------------------
            (State::InParamList { element, mut param }, Identifier) => {
                param.set_name(token.text.as_ref());
                Ok(State::InParam { element, param })
            }
            // Empty list `[]` or a trailing comma: the unnamed placeholder
            // parameter is discarded.
            (State::InParamList { element, .. }, RightBracket) => {
                Ok(State::InElement { element })
            }
            (State::InParamList { .. }, _) => Err(ParseError::unexpected(token, "identifier")),

            // ---- after a parameter name -------------------------------
            (State::InParam { element, param }, LeftParen) => Ok(State::InValueList {
                element,
                param,
                expect_value: true,
            }),
            (State::InParam { mut element, param }, Comma) => {
                element.add_param(param);
                Ok(State::InParamList {
                    element,
                    param: Param::new(""),
                })
            }
            (State::InParam { mut element, param }, RightBracket) => {
                element.add_param(param);
                Ok(State::InElement { element })
            }
            (State::InParam { .. }, CloseMark | LeftAngle | RightAngle) => {
                Err(ParseError::unexpected(token, "']'"))
            }
            (State::InParam { .. }, _) => Err(ParseError::unexpected(token, "'('")),

            // ---- inside a value list ----------------------------------
            (
                State::InValueList {
                    element,
                    mut param,
                    expect_value,
                },
                Value,
            ) => {
                if expect_value {
                    param.add_value(token.text.as_ref());
                    Ok(State::InValueList {
                        element,
                        param,
                        expect_value: false,
                    })
                } else {
                    Err(ParseError::unexpected(token, "','"))
                }
            }
            (
                State::InValueList {
                    element,
                    param,
                    expect_value,
                },
                Comma,
            ) => {
                if expect_value {
                    Err(ParseError::unexpected(token, "value"))
                } else {
                    Ok(State::InValueList {
                        element,
                        param,
                        expect_value: true,
                    })
                }
            }
            (State::InValueList { element, param, .. }, RightParen) => {
                Ok(State::InParam { element, param })
            }
            (State::InValueList { .. }, CloseMark) => Err(ParseError::unexpected(token, "')'")),
            (State::InValueList { .. }, _) => {
                Err(ParseError::unexpected(token, "value or ')'"))
            }
        }
    }

    /// Attach a completed element to the innermost open element, or to the
    /// document when no element is open.
    fn attach(&mut self, element: Element) {
        match self.open.last_mut() {
            Some(parent) => parent.add_child(element),
            None => self.document.add_element(element),
        }
    }

    /// Terminal condition at end of the token stream.
    ///
    /// Elements still open are accepted and drain into their parents in
    /// source order; a stream that ends mid-tag or mid-parameter-list is
    /// an error.
    fn finish(mut self) -> Result<Document, ParseError> {
        let mid_construct = match &self.state {
            State::TopLevel => None,
            State::InElement { .. } => Some("'>' or close marker"),
            State::InParamList { .. } => Some("identifier"),
            State::InParam { .. } => Some("']'"),
            State::InValueList { .. } => Some("')'"),
        };
        if let Some(expected) = mid_construct {
            return Err(ParseError::unexpected_eof(expected));
        }
        while let Some(element) = self.open.pop() {
            self.attach(element);
        }
        Ok(self.document)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
