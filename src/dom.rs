//! DOM Operations Adapter
//!
//! Thin layer over the `dom_query` crate covering what link processing
//! needs: fragment parsing and serialization, attribute access on anchors,
//! and text content.

// Re-export core types for external use
pub use dom_query::{Document, NodeRef, Selection};

pub use tendril::StrTendril;

// === Parsing ===

/// Parse an HTML fragment (post body, widget content) into a document.
///
/// Parsing follows the HTML5 algorithm with a `<body>` context, so any input
/// yields a tree: unclosed tags are closed, stray end tags dropped and bad
/// nesting repaired.
///
/// The `<body>` context also means table parts outside a table (`<td>`,
/// `<tr>`, `<tbody>` ...) lose their tags and keep only their content. A
/// fragment made of stray cells is serialized without them once it changes.
#[inline]
#[must_use]
pub fn parse_fragment(html: &str) -> Document {
    Document::fragment(html)
}

/// Serialize the content of a fragment document without any wrapper element
/// the parser placed around it.
#[must_use]
pub fn fragment_html(doc: &Document) -> String {
    let root = doc.root();
    let children = root.children();

    match children.as_slice() {
        [only] if only.node_name().is_some_and(|n| &*n == "html") => {
            Selection::from(*only).inner_html().to_string()
        }
        _ => Selection::from(root).inner_html().to_string(),
    }
}

/// All anchor elements of a document, in document order.
#[inline]
#[must_use]
pub fn anchors(doc: &Document) -> Selection<'_> {
    doc.select("a")
}

// === Attribute Operations ===

/// Get an attribute value.
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Set an attribute value, keeping its position if it already exists.
#[inline]
pub fn set_attribute(sel: &Selection, name: &str, value: &str) {
    sel.set_attr(name, value);
}

/// Check if an attribute exists.
#[inline]
#[must_use]
pub fn has_attribute(sel: &Selection, name: &str) -> bool {
    sel.has_attr(name)
}

/// Remove an attribute.
#[inline]
pub fn remove_attribute(sel: &Selection, name: &str) {
    sel.remove_attr(name);
}

// === Text Content ===

/// All text content of the node and its descendants.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

// === Tree Manipulation ===

/// Replace an element with its children, keeping text and nested markup.
pub fn unwrap_element(sel: &Selection) {
    let inner = sel.inner_html();
    sel.replace_with_html(inner);
}
