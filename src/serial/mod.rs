//! XML serializer.
//!
//! Serializes a [`Tree`] into XML text. Element names are emitted as
//! stored — the builder already encoded them — so only text payloads need
//! escaping here.

use crate::tree::{ElementId, Tree};

/// Options controlling XML serialization output.
///
/// # Examples
///
/// ```
/// use treedump::{build_named, Value};
/// use treedump::serial::{serialize_with_options, SerializeOptions};
///
/// let tree = build_named(Some(&Value::from(5)), "Count").unwrap().unwrap();
/// let xml = serialize_with_options(&tree, &SerializeOptions::default().declaration(true));
/// assert!(xml.starts_with("<?xml"));
/// ```
#[derive(Debug, Clone)]
pub struct SerializeOptions {
    /// Whether to produce indented (pretty-printed) output.
    /// Defaults to `false`.
    pub indent: bool,
    /// The indentation string used for each level when `indent` is `true`.
    /// Defaults to two spaces.
    pub indent_str: String,
    /// Whether to emit an XML declaration before the root element.
    /// Defaults to `false`.
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            indent: false,
            indent_str: "  ".to_string(),
            declaration: false,
        }
    }
}

impl SerializeOptions {
    /// Enables or disables indented (pretty-printed) output.
    ///
    /// When enabled, child elements are placed on their own lines with
    /// indentation (two spaces per level by default). Use
    /// [`indent_str`](Self::indent_str) to customize the indentation
    /// string. Disabled by default.
    #[must_use]
    pub fn indent(mut self, indent: bool) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the indentation string used for each nesting level.
    ///
    /// The default is two spaces (`"  "`). This only takes effect when
    /// [`indent`](Self::indent) is enabled.
    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }

    /// Enables or disables the XML declaration. Disabled by default.
    #[must_use]
    pub fn declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }
}

/// Serializes a tree to an XML string.
///
/// # Examples
///
/// ```
/// use treedump::{build_named, Composite, Member, Value};
/// use treedump::serial::serialize;
///
/// let point = Composite::new("Point").property(Member::new("X", 5));
/// let tree = build_named(Some(&Value::from(point)), "Point").unwrap().unwrap();
/// assert_eq!(serialize(&tree), "<Point><X>5</X></Point>");
/// ```
#[must_use]
pub fn serialize(tree: &Tree) -> String {
    serialize_with_options(tree, &SerializeOptions::default())
}

/// Serializes a tree to an XML string with the given options.
#[must_use]
pub fn serialize_with_options(tree: &Tree, options: &SerializeOptions) -> String {
    let mut output = String::new();

    if options.declaration {
        output.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>");
        if options.indent {
            output.push('\n');
        }
    }

    serialize_element(tree, tree.root(), &mut output, options, 0);

    if options.indent {
        output.push('\n');
    }
    output
}

fn serialize_element(
    tree: &Tree,
    id: ElementId,
    out: &mut String,
    options: &SerializeOptions,
    depth: usize,
) {
    if options.indent && depth > 0 {
        for _ in 0..depth {
            out.push_str(&options.indent_str);
        }
    }

    let name = tree.name(id);
    out.push('<');
    out.push_str(name);

    match (tree.text(id), tree.child_count(id)) {
        (None, 0) => {
            out.push_str("/>");
        }
        (Some(text), _) => {
            out.push('>');
            write_escaped_text(out, text);
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        (None, _) => {
            out.push('>');
            if options.indent {
                out.push('\n');
            }
            for child in tree.children(id) {
                serialize_element(tree, child, out, options, depth + 1);
                if options.indent {
                    out.push('\n');
                }
            }
            if options.indent {
                for _ in 0..depth {
                    out.push_str(&options.indent_str);
                }
            }
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

/// Writes a hexadecimal character reference (`&#xHH;`) for a Unicode code point.
fn write_hex_char_ref(out: &mut String, ch: char) {
    use std::fmt::Write;
    let _ = write!(out, "&#x{:X};", ch as u32);
}

/// Escapes text content for XML output.
///
/// - `<`, `>`, `&` are escaped with named entity references
/// - `\r` is encoded as `&#13;`
/// - `\t` and `\n` are passed through
/// - Control characters below 0x20 (other than `\t`, `\n`, `\r`) are hex-encoded
/// - Non-ASCII characters are passed through as raw UTF-8
fn write_escaped_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\r' => out.push_str("&#13;"),
            '\t' | '\n' => out.push(ch),
            c if (c as u32) < 0x20 => write_hex_char_ref(out, c),
            _ => out.push(ch),
        }
    }
}
