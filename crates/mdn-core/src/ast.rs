//! Document tree types for MDN markup.
//!
//! A [`Document`] owns an ordered list of top-level [`Element`]s; each
//! element owns its [`Param`]s and child elements. The tree is strict:
//! no sharing, no cycles. Insertion order is significant everywhere and
//! duplicate names are legal — lookups return the first match in order,
//! with `*_named` iterators for all matches.

use std::fmt;
use std::str::FromStr;

/// A named, ordered list of string values attached to an element.
///
/// The name is identifier syntax and non-empty once construction is
/// complete. Values keep their insertion order; duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Param {
    name: String,
    values: Vec<String>,
}

impl Param {
    /// Create a parameter with no values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// The parameter name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the parameter.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a value.
    pub fn add_value(&mut self, value: impl Into<String>) {
        self.values.push(value.into());
    }

    /// Builder-style [`add_value`](Self::add_value).
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }

    /// All values in insertion order.
    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Number of values.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the parameter holds no values.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether the parameter holds more than one value.
    #[inline]
    pub fn is_list(&self) -> bool {
        self.values.len() > 1
    }

    /// The value at `index`, if present.
    #[inline]
    pub fn value(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    /// The value at `index`, or `default` if the index is out of range.
    ///
    /// Never fails.
    pub fn value_or<'s>(&'s self, index: usize, default: &'s str) -> &'s str {
        self.value(index).unwrap_or(default)
    }

    /// Coerce the value at `index` with [`FromStr`], or return `default`
    /// on a missing index or a failed parse.
    ///
    /// Covers integers, floats, booleans, chars and any enum implementing
    /// `FromStr`. Never fails.
    pub fn parse_or<T: FromStr>(&self, index: usize, default: T) -> T {
        match self.value(index).map(str::parse) {
            Some(Ok(v)) => v,
            _ => default,
        }
    }

    /// Parse the value at `index` as a base-16 integer, or return `default`.
    pub fn hex_or(&self, index: usize, default: i64) -> i64 {
        match self.value(index).map(|v| i64::from_str_radix(v, 16)) {
            Some(Ok(v)) => v,
            _ => default,
        }
    }

    /// Parse the value at `index` as a base-2 integer, or return `default`.
    pub fn bin_or(&self, index: usize, default: i64) -> i64 {
        match self.value(index).map(|v| i64::from_str_radix(v, 2)) {
            Some(Ok(v)) => v,
            _ => default,
        }
    }
}

impl fmt::Display for Param {
    /// Debug-friendly `name: "v"` / `name: ["a","b"]` rendering.
    ///
    /// This is not the wire form; see [`crate::format`] for that.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        match self.values.as_slice() {
            [] => f.write_str("\"\""),
            [single] => write!(f, "\"{}\"", single),
            values => {
                f.write_str("[")?;
                for (i, v) in values.iter().enumerate() {
                    if i != 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "\"{}\"", v)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// A named node in the document tree.
///
/// Owns an ordered list of parameters and an ordered list of child
/// elements. The name is non-empty once the element is fully constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    params: Vec<Param>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no parameters or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The element name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the element.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Append a parameter.
    pub fn add_param(&mut self, param: Param) {
        self.params.push(param);
    }

    /// Builder-style [`add_param`](Self::add_param).
    pub fn with_param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// All parameters in insertion order.
    #[inline]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// First parameter with the given name.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    /// First parameter with the given name, mutably.
    pub fn param_mut(&mut self, name: &str) -> Option<&mut Param> {
        self.params.iter_mut().find(|p| p.name == name)
    }

    /// All parameters with the given name, in document order.
    pub fn params_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Param> {
        self.params.iter().filter(move |p| p.name == name)
    }

    /// Remove and return the first parameter with the given name.
    pub fn remove_param(&mut self, name: &str) -> Option<Param> {
        let index = self.params.iter().position(|p| p.name == name)?;
        Some(self.params.remove(index))
    }

    /// Append a child element.
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Builder-style [`add_child`](Self::add_child).
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// All child elements in insertion order.
    #[inline]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|e| e.name == name)
    }

    /// First child with the given name, mutably.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|e| e.name == name)
    }

    /// All children with the given name, in document order.
    pub fn children_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Element> {
        self.children.iter().filter(move |e| e.name == name)
    }

    /// Remove and return the first child with the given name.
    pub fn remove_child(&mut self, name: &str) -> Option<Element> {
        let index = self.children.iter().position(|e| e.name == name)?;
        Some(self.children.remove(index))
    }
}

/// A parsed MDN document: an ordered list of top-level elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a top-level element.
    pub fn add_element(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Builder-style [`add_element`](Self::add_element).
    pub fn with_element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// All top-level elements in insertion order.
    #[inline]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// First top-level element with the given name.
    pub fn element(&self, name: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// First top-level element with the given name, mutably.
    pub fn element_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.name == name)
    }

    /// All top-level elements with the given name, in document order.
    pub fn elements_named<'s>(&'s self, name: &'s str) -> impl Iterator<Item = &'s Element> {
        self.elements.iter().filter(move |e| e.name == name)
    }

    /// Remove and return the first top-level element with the given name.
    pub fn remove_element(&mut self, name: &str) -> Option<Element> {
        let index = self.elements.iter().position(|e| e.name == name)?;
        Some(self.elements.remove(index))
    }
}
