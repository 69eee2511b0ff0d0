//! Integration tests for the MDN lexer and parser

use mdn_core::error::{LexErrorKind, ParseErrorKind};
use mdn_core::{lexer, parser, Document, Element, Param, TokenKind};

fn kinds(input: &str) -> Vec<TokenKind> {
    lexer::tokenize(input)
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn parse(input: &str) -> Document {
    mdn_core::parse(input).unwrap()
}

// ============================================================================
// Lexer: token kinds
// ============================================================================

#[test]
fn test_tokenize_self_closing_element() {
    assert_eq!(
        kinds(r#"<A[p("1")]/>"#),
        vec![
            TokenKind::LeftAngle,
            TokenKind::Identifier,
            TokenKind::LeftBracket,
            TokenKind::Identifier,
            TokenKind::LeftParen,
            TokenKind::Value,
            TokenKind::RightParen,
            TokenKind::RightBracket,
            TokenKind::CloseMark,
        ]
    );
}

#[test]
fn test_tokenize_block_element() {
    assert_eq!(
        kinds("<A[]></>"),
        vec![
            TokenKind::LeftAngle,
            TokenKind::Identifier,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::RightAngle,
            TokenKind::CloseMark,
        ]
    );
}

#[test]
fn test_tokenize_identifier_characters() {
    let tokens = lexer::tokenize("_a-b2 Z9_ x").unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_ref()).collect();
    assert_eq!(texts, vec!["_a-b2", "Z9_", "x"]);
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Identifier));
}

#[test]
fn test_tokenize_close_mark_is_single_token() {
    assert_eq!(kinds("/>"), vec![TokenKind::CloseMark]);
    assert_eq!(kinds("</>"), vec![TokenKind::CloseMark]);
}

#[test]
fn test_tokenize_lone_left_angle_keeps_next_char() {
    // `<` not followed by `/` emits LeftAngle and re-dispatches the peeked
    // character.
    assert_eq!(
        kinds("<a"),
        vec![TokenKind::LeftAngle, TokenKind::Identifier]
    );
    assert_eq!(kinds("<<"), vec![TokenKind::LeftAngle, TokenKind::LeftAngle]);
}

#[test]
fn test_tokenize_skips_unknown_characters() {
    // Whitespace and anything outside the grammar produce no token.
    assert_eq!(kinds("  \t\r\n  ; ! ? é ∂ 7"), vec![]);
}

#[test]
fn test_tokenize_empty_input() {
    assert_eq!(kinds(""), vec![]);
}

// ============================================================================
// Lexer: quoted values and escapes
// ============================================================================

#[test]
fn test_value_plain() {
    let tokens = lexer::tokenize(r#""hello world""#).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Value);
    assert_eq!(tokens[0].text.as_ref(), "hello world");
}

#[test]
fn test_value_empty() {
    let tokens = lexer::tokenize(r#""""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "");
}

#[test]
fn test_value_recognized_escapes() {
    let tokens = lexer::tokenize(r#""a\tb\rc\nd\fe\"f\\g""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "a\tb\rc\nd\u{c}e\"f\\g");
}

#[test]
fn test_value_escaped_quote_does_not_terminate() {
    let tokens = lexer::tokenize(r#""say \"hi\"""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "say \"hi\"");
}

#[test]
fn test_value_unrecognized_escape_drops_backslash() {
    // A backslash before a character outside the escape set is silently
    // dropped and the character kept unchanged.
    let tokens = lexer::tokenize(r#""a\qb""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "aqb");

    let tokens = lexer::tokenize(r#""\x\y\z""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "xyz");
}

#[test]
fn test_value_tab_escape_regression() {
    let tokens = lexer::tokenize(r#""a\tb""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "a\tb");
}

#[test]
fn test_value_unescaped_escape_letters_are_literal() {
    // 't', 'n' etc. are only special directly after a backslash.
    let tokens = lexer::tokenize(r#""trnf""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "trnf");
}

#[test]
fn test_value_non_ascii_content() {
    let tokens = lexer::tokenize(r#""héllo ∂""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "héllo ∂");
}

#[test]
fn test_value_unterminated_is_lex_error() {
    let err = lexer::tokenize(r#""abc"#).unwrap_err();
    assert_eq!(err.kind, LexErrorKind::UnterminatedValue);
}

#[test]
fn test_value_raw_line_break_is_lex_error() {
    let err = lexer::tokenize("\"ab\ncd\"").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::LineBreakInValue);

    // Even an escaped line break is rejected.
    let err = lexer::tokenize("\"ab\\\ncd\"").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::LineBreakInValue);
}

#[test]
fn test_malformed_close_marker_is_lex_error() {
    let err = lexer::tokenize("/x").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MalformedCloseMark);

    let err = lexer::tokenize("</x").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MalformedCloseMark);

    let err = lexer::tokenize("/").unwrap_err();
    assert_eq!(err.kind, LexErrorKind::MalformedCloseMark);
}

// ============================================================================
// Lexer: comments
// ============================================================================

#[test]
fn test_comment_produces_no_tokens() {
    assert_eq!(kinds("# just a comment"), vec![]);
}

#[test]
fn test_comment_runs_to_end_of_line() {
    assert_eq!(
        kinds("# comment with <A[]/> inside\n<B[]/>"),
        vec![
            TokenKind::LeftAngle,
            TokenKind::Identifier,
            TokenKind::LeftBracket,
            TokenKind::RightBracket,
            TokenKind::CloseMark,
        ]
    );
}

#[test]
fn test_comment_directly_after_closing_quote() {
    let tokens = lexer::tokenize("\"v\"# trailing comment\n\"w\"").unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_ref()).collect();
    assert_eq!(texts, vec!["v", "w"]);
}

#[test]
fn test_comment_at_end_of_input_without_newline() {
    assert_eq!(kinds("<A[]/> # done"), kinds("<A[]/>"));
}

#[test]
fn test_hash_inside_value_is_not_a_comment() {
    let tokens = lexer::tokenize(r#""a # b""#).unwrap();
    assert_eq!(tokens[0].text.as_ref(), "a # b");
}

// ============================================================================
// Lexer: positions
// ============================================================================

#[test]
fn test_token_positions_first_line() {
    let tokens = lexer::tokenize(r#"<A[p("1")]/>"#).unwrap();

    // LeftAngle at column 0, Identifier A spans 1..2.
    assert_eq!((tokens[0].line, tokens[0].column_start), (0, 0));
    assert_eq!(
        (tokens[1].column_start, tokens[1].column_end),
        (1, 2)
    );
    // Value spans both quotes: columns 5..8.
    assert_eq!(
        (tokens[5].column_start, tokens[5].column_end),
        (5, 8)
    );
    // CloseMark spans the two-character `/>`: columns 10..12.
    let close = tokens.last().unwrap();
    assert_eq!((close.column_start, close.column_end), (10, 12));
}

#[test]
fn test_token_lines_increment_at_line_breaks() {
    let tokens = lexer::tokenize("<A[]/>\n<B[]/>\n\n<C[]/>").unwrap();
    let opens: Vec<&mdn_core::Token> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::LeftAngle)
        .collect();
    assert_eq!(opens[0].line, 0);
    assert_eq!(opens[1].line, 1);
    assert_eq!(opens[2].line, 3);
}

#[test]
fn test_identifier_borrows_from_input() {
    let input = r#"<Alpha[]/>"#;
    let tokens = lexer::tokenize(input).unwrap();
    assert!(matches!(tokens[1].text, std::borrow::Cow::Borrowed(_)));
}

#[test]
fn test_escaped_value_owns_its_text() {
    let tokens = lexer::tokenize(r#""a\tb""#).unwrap();
    assert!(matches!(tokens[0].text, std::borrow::Cow::Owned(_)));
}

// ============================================================================
// Parser: well-formed documents
// ============================================================================

#[test]
fn test_parse_self_closing_with_values() {
    let doc = parse(r#"<A[p("1","2")]/>"#);
    assert_eq!(doc.elements().len(), 1);

    let a = &doc.elements()[0];
    assert_eq!(a.name(), "A");
    assert!(a.children().is_empty());
    assert_eq!(a.params().len(), 1);

    let p = a.param("p").unwrap();
    assert_eq!(p.values(), ["1", "2"]);
}

#[test]
fn test_parse_nested_block() {
    let input = "<E[]>\n    <C[k(\"v\")]/>\n</>";
    let doc = parse(input);

    let e = doc.element("E").unwrap();
    assert!(e.params().is_empty());
    assert_eq!(e.children().len(), 1);

    let c = e.child("C").unwrap();
    assert_eq!(c.param("k").unwrap().values(), ["v"]);
}

#[test]
fn test_parse_self_closing_equals_empty_block() {
    assert_eq!(parse("<X[]/>"), parse("<X[]></>"));
}

#[test]
fn test_parse_multiple_parameters() {
    let doc = parse(r#"<W[title("Main"), size("800","600"), resizable()]/>"#);
    let w = doc.element("W").unwrap();
    assert_eq!(w.params().len(), 3);
    assert_eq!(w.params()[0].name(), "title");
    assert_eq!(w.params()[1].name(), "size");
    assert_eq!(w.params()[2].name(), "resizable");
    assert!(w.params()[2].is_empty());
}

#[test]
fn test_parse_parameter_without_value_list() {
    // The grammar at the token level does not require `(...)`.
    let doc = parse("<X[flag]/>");
    let p = doc.element("X").unwrap().param("flag").unwrap();
    assert!(p.is_empty());
}

#[test]
fn test_parse_element_without_brackets() {
    // Likewise `[...]` itself is optional at the token level.
    let doc = parse("<X/>");
    assert_eq!(doc.element("X").unwrap().params().len(), 0);
}

#[test]
fn test_parse_trailing_comma_in_value_list() {
    let doc = parse(r#"<X[p("a",)]/>"#);
    assert_eq!(doc.element("X").unwrap().param("p").unwrap().values(), ["a"]);
}

#[test]
fn test_parse_deep_nesting() {
    let doc = parse("<a[]><b[]><c[]><d[]/></></></>");
    let d = doc.element("a").unwrap().child("b").unwrap().child("c").unwrap().child("d");
    assert!(d.is_some());
}

#[test]
fn test_parse_sibling_order_preserved() {
    let doc = parse("<p[]><a[]/><b[]><c[]/></><d[]/></>");
    let p = doc.element("p").unwrap();
    let names: Vec<&str> = p.children().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["a", "b", "d"]);
    assert_eq!(p.children()[1].children()[0].name(), "c");
}

#[test]
fn test_parse_duplicate_names_are_independent() {
    let doc = parse(r#"<item[v("1")]/><item[v("2")]/>"#);
    assert_eq!(doc.elements().len(), 2);

    let values: Vec<&str> = doc
        .elements_named("item")
        .map(|e| e.param("v").unwrap().value(0).unwrap())
        .collect();
    assert_eq!(values, vec!["1", "2"]);
    // First-match lookup addresses the first duplicate.
    assert_eq!(doc.element("item").unwrap().param("v").unwrap().value(0), Some("1"));
}

#[test]
fn test_parse_duplicate_parameter_names() {
    let doc = parse(r#"<X[p("1"), p("2")]/>"#);
    let x = doc.element("X").unwrap();
    assert_eq!(x.params().len(), 2);
    assert_eq!(x.params_named("p").count(), 2);
}

#[test]
fn test_parse_empty_input_is_empty_document() {
    let doc = parse("");
    assert!(doc.elements().is_empty());
    let doc = parse("# only a comment\n");
    assert!(doc.elements().is_empty());
}

#[test]
fn test_parse_trailing_unclosed_elements_accepted() {
    // End of input with open elements still on the stack is success; the
    // open elements keep their place in the tree.
    let doc = mdn_core::parse("<A[]><B[]/>").unwrap();
    let a = doc.element("A").unwrap();
    assert_eq!(a.children().len(), 1);
    assert_eq!(a.children()[0].name(), "B");

    let doc = mdn_core::parse("<A[]><B[]>").unwrap();
    assert_eq!(doc.element("A").unwrap().child("B").unwrap().children().len(), 0);
}

// ============================================================================
// Parser: grammar violations
// ============================================================================

fn parse_err(input: &str) -> mdn_core::ParseError {
    let tokens = lexer::tokenize(input).unwrap();
    parser::parse(&tokens).unwrap_err()
}

#[test]
fn test_error_identifier_outside_element() {
    let err = parse_err("orphan");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert!(err.message.contains("'<'"), "{}", err.message);
}

#[test]
fn test_error_value_outside_value_list() {
    assert!(parse_err(r#""v""#).message.contains("'<'"));
    assert!(parse_err(r#"<X["v"]/>"#).message.contains("identifier"));
    assert!(parse_err(r#"<X[p"v"]/>"#).message.contains("'('"));
}

#[test]
fn test_error_duplicate_identifier_in_tag() {
    let err = parse_err("<X Y[]/>");
    assert!(err.message.contains("'['"), "{}", err.message);
}

#[test]
fn test_error_unnamed_element() {
    assert_eq!(parse_err("<[]/>").kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(parse_err("<>").kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(parse_err("</>extra").kind, ParseErrorKind::UnmatchedClose);
}

#[test]
fn test_error_stray_right_angle() {
    let err = parse_err(">");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn test_error_consecutive_commas_in_value_list() {
    let err = parse_err(r#"<X[p("a",,"b")]/>"#);
    assert!(err.message.contains("value"), "{}", err.message);
}

#[test]
fn test_error_value_without_separator() {
    let err = parse_err(r#"<X[p("a" "b")]/>"#);
    assert!(err.message.contains("','"), "{}", err.message);
}

#[test]
fn test_error_unnamed_parameter() {
    assert_eq!(parse_err("<X[]]/>").kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(parse_err("<X[,]/>").kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(parse_err(r#"<X[("v")]/>"#).kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn test_error_close_mark_inside_parameter_list() {
    assert_eq!(parse_err("<X[p/>").kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(parse_err(r#"<X[p("v"/>"#).kind, ParseErrorKind::UnexpectedToken);
}

#[test]
fn test_error_unmatched_close() {
    let err = parse_err("<A[]/></>");
    assert_eq!(err.kind, ParseErrorKind::UnmatchedClose);

    let err = parse_err("<A[]></></>");
    assert_eq!(err.kind, ParseErrorKind::UnmatchedClose);
}

#[test]
fn test_error_eof_inside_tag() {
    assert_eq!(parse_err("<A").kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(parse_err("<A[p").kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(parse_err(r#"<A[p("v""#).kind, ParseErrorKind::UnexpectedEof);
    assert_eq!(parse_err("<A[").kind, ParseErrorKind::UnexpectedEof);
}

#[test]
fn test_error_reports_token_position() {
    let err = parse_err("<A[]/>\n  value");
    // The offending identifier sits on line 1.
    assert_eq!(err.line, 1);
    assert!(err.message.contains("value"), "{}", err.message);
}

#[test]
fn test_facade_wraps_both_error_kinds() {
    match mdn_core::parse(r#""unterminated"#) {
        Err(mdn_core::Error::Lex(e)) => assert_eq!(e.kind, LexErrorKind::UnterminatedValue),
        other => panic!("expected lex error, got {:?}", other),
    }
    match mdn_core::parse("stray") {
        Err(mdn_core::Error::Parse(e)) => assert_eq!(e.kind, ParseErrorKind::UnexpectedToken),
        other => panic!("expected parse error, got {:?}", other),
    }
}

// ============================================================================
// Document model operations
// ============================================================================

#[test]
fn test_document_add_and_remove_element() {
    let mut doc = Document::new();
    doc.add_element(Element::new("a"));
    doc.add_element(Element::new("b"));
    doc.add_element(Element::new("a"));

    // Removal takes the first match only.
    let removed = doc.remove_element("a").unwrap();
    assert_eq!(removed.name(), "a");
    assert_eq!(doc.elements().len(), 2);
    assert_eq!(doc.elements()[0].name(), "b");

    assert!(doc.remove_element("missing").is_none());
}

#[test]
fn test_element_param_and_child_lookup() {
    let mut el = Element::new("root")
        .with_param(Param::new("p").with_value("1"))
        .with_child(Element::new("kid"));

    assert!(el.param("p").is_some());
    assert!(el.param("q").is_none());
    assert!(el.child("kid").is_some());

    el.param_mut("p").unwrap().add_value("2");
    assert_eq!(el.param("p").unwrap().len(), 2);

    el.child_mut("kid").unwrap().set_name("renamed");
    assert!(el.child("kid").is_none());
    assert!(el.remove_child("renamed").is_some());
    assert!(el.remove_param("p").is_some());
    assert!(el.params().is_empty());
}

#[test]
fn test_param_value_access() {
    let p = Param::new("p").with_value("a").with_value("b");
    assert_eq!(p.value(0), Some("a"));
    assert_eq!(p.value(5), None);
    assert_eq!(p.value_or(1, "x"), "b");
    assert_eq!(p.value_or(9, "x"), "x");
    assert!(p.is_list());
    assert_eq!(p.len(), 2);
}

#[test]
fn test_param_coercions_never_fail() {
    let p = Param::new("n")
        .with_value("42")
        .with_value("2.5")
        .with_value("true")
        .with_value("ff")
        .with_value("1010")
        .with_value("oops");

    assert_eq!(p.parse_or::<i64>(0, -1), 42);
    assert_eq!(p.parse_or::<f64>(1, 0.0), 2.5);
    assert!(p.parse_or::<bool>(2, false));
    assert_eq!(p.hex_or(3, 0), 0xff);
    assert_eq!(p.bin_or(4, 0), 10);

    // Failed parses and missing indices fall back to the default.
    assert_eq!(p.parse_or::<i64>(5, -1), -1);
    assert_eq!(p.parse_or::<i64>(99, -1), -1);
    assert_eq!(p.hex_or(5, 7), 7);
    assert_eq!(p.bin_or(99, 7), 7);
}

#[test]
fn test_param_enum_coercion_via_fromstr() {
    #[derive(Debug, PartialEq)]
    enum Mode {
        On,
        Off,
    }
    impl std::str::FromStr for Mode {
        type Err = ();
        fn from_str(s: &str) -> Result<Self, ()> {
            match s {
                "on" => Ok(Mode::On),
                "off" => Ok(Mode::Off),
                _ => Err(()),
            }
        }
    }

    let p = Param::new("mode").with_value("off").with_value("sideways");
    assert_eq!(p.parse_or(0, Mode::On), Mode::Off);
    assert_eq!(p.parse_or(1, Mode::On), Mode::On);
}

#[test]
fn test_param_display_shapes() {
    assert_eq!(Param::new("a").to_string(), "a: \"\"");
    assert_eq!(Param::new("a").with_value("x").to_string(), "a: \"x\"");
    assert_eq!(
        Param::new("a").with_value("x").with_value("y").to_string(),
        "a: [\"x\",\"y\"]"
    );
}
