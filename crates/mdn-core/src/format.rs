//! Canonical formatter for MDN documents.
//!
//! Serializes a [`Document`] back to markup text. Formatting is total and
//! infallible: it re-derives canonical text from the tree and never echoes
//! source bytes, so comments and original spacing are not preserved.
//!
//! Values are emitted verbatim inside quotes with no escape re-encoding.
//! A document built programmatically with a raw quote, backslash or line
//! break in a value therefore produces text that does not re-parse
//! identically; that is the caller's responsibility.

use crate::ast::{Document, Element, Param};

/// Render a document as canonical markup text.
///
/// Top-level elements are joined by a single newline, with no trailing
/// newline after the last.
pub fn format_document(document: &Document) -> String {
    let mut out = String::new();
    for (i, element) in document.elements().iter().enumerate() {
        if i != 0 {
            out.push('\n');
        }
        write_element(element, &mut out, 0);
    }
    out
}

/// Render one element at the given nesting depth.
///
/// Childless elements use the self-closing form `<Name[...]/>`; elements
/// with children use the block form with each child indented one tab stop
/// deeper and a closing `</>` at the element's own depth.
fn write_element(element: &Element, out: &mut String, depth: usize) {
    write_indent(out, depth);
    out.push('<');
    out.push_str(element.name());
    out.push('[');
    for (i, param) in element.params().iter().enumerate() {
        if i != 0 {
            out.push_str(", ");
        }
        write_param(param, out);
    }
    out.push(']');

    if element.children().is_empty() {
        out.push_str("/>");
    } else {
        out.push_str(">\n");
        for child in element.children() {
            write_element(child, out, depth + 1);
            out.push('\n');
        }
        write_indent(out, depth);
        out.push_str("</>");
    }
}

/// Render one parameter as `name("v1","v2")`; an empty value list renders
/// as `name()`.
fn write_param(param: &Param, out: &mut String) {
    out.push_str(param.name());
    out.push('(');
    for (i, value) in param.values().iter().enumerate() {
        if i != 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(value);
        out.push('"');
    }
    out.push(')');
}

#[inline]
fn write_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}
