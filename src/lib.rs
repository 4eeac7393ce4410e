//! # serde_xmldoc
//!
//! A bidirectional codec between dynamically-shaped values and XML element trees.
//!
//! ## Overview
//!
//! Data lives in two shapes:
//!
//! - [`Value`]: a scalar, an ordered list or an insertion-ordered map
//!   ([`XmlMap`]), buildable from any `Serialize` type or with the [`xml!`] macro
//! - [`Element`]: an XML node with a name, attributes, namespaces, optional
//!   text and ordered children
//!
//! The [`Encoder`] turns values into elements, the [`Serializer`] writes
//! elements as XML text, the [`Decoder`] parses text back into elements, and
//! [`Element::to_value`] closes the loop.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! serde_xmldoc = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Encoding
//!
//! ```rust
//! use serde_xmldoc::{encode, to_string, xml};
//!
//! let data = xml!({
//!     "@attributes": {"id": 7},
//!     "name": "Alice",
//!     "roles": ["admin", "dev"]
//! });
//!
//! let root = encode(&data).unwrap();
//! assert_eq!(
//!     to_string(&root).unwrap(),
//!     concat!(
//!         r#"<?xml version="1.0" encoding="UTF-8"?>"#,
//!         r#"<root id="7"><name>Alice</name><roles>admin</roles><roles>dev</roles></root>"#
//!     )
//! );
//! ```
//!
//! ### Decoding
//!
//! ```rust
//! use serde_xmldoc::{from_str, xml};
//!
//! let root = from_str(r#"<order no="12"><line>pen</line><line>ink</line></order>"#).unwrap();
//!
//! assert_eq!(root.name(), "order");
//! assert_eq!(root.attribute("no"), Some("12"));
//! assert_eq!(root.children_by_name("line").count(), 2);
//! assert_eq!(
//!     root.to_value(),
//!     xml!({"@attributes": {"no": 12}, "line": ["pen", "ink"]})
//! );
//! ```
//!
//! ### Rust types
//!
//! ```rust
//! use serde::Serialize;
//! use serde_xmldoc::to_xml_string;
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let text = to_xml_string(&Point { x: 1, y: 2 }).unwrap();
//! assert!(text.ends_with("<root><x>1</x><y>2</y></root>"));
//! ```
//!
//! ## Text and types
//!
//! XML text is untyped. Scalars are written with [`Value::unbox`] and read
//! back with [`Value::autobox`], so `"42"` decodes to an integer and `"true"`
//! to a boolean.
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`debug` at entry points, `trace` per
//! element, `warn` for ignored input) and installs no subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - encoding a struct and reading it back
//! - **`dynamic_values.rs`** - building and inspecting values
//! - **`custom_options.rs`** - root and item names, declaration, indentation
//!
//! Run any example with: `cargo run --example <name>`

pub mod de;
pub mod element;
pub mod encoder;
pub mod error;
pub mod macros;
pub mod map;
pub mod name;
pub mod options;
pub mod ser;
pub mod value;
pub mod value_ser;

pub use de::{Decoder, QuickXmlParser, RawNode, RawParser};
pub use element::Element;
pub use encoder::Encoder;
pub use error::{Error, Result};
pub use map::XmlMap;
pub use name::sanitize_name;
pub use options::XmlOptions;
pub use ser::Serializer;
pub use value::{Number, Value};
pub use value_ser::{to_value, ValueSerializer};

use serde::Serialize;
use std::io;
use std::path::Path;
use tracing::debug;

/// Encode a [`Value`] into an element tree rooted at `"root"`.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::{encode, xml};
///
/// let root = encode(&xml!({"a": 1})).unwrap();
/// assert_eq!(root.name(), "root");
/// assert_eq!(root.child("a").and_then(|a| a.value()), Some("1"));
/// ```
///
/// # Errors
///
/// Returns an error for keys that sanitize to nothing, values without a
/// text form where one is needed, or nesting past the default depth limit.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value) -> Result<Element> {
    encode_with_options(value, &XmlOptions::default())
}

/// Encode a [`Value`] using the root name, item name and depth limit of `options`.
///
/// # Errors
///
/// See [`encode`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &Value, options: &XmlOptions) -> Result<Element> {
    debug!(root = %options.root_name, "encoding value");
    Encoder::new(options).encode(value, &options.root_name)
}

/// Serialize any `T: Serialize` straight to an XML document string.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::to_xml_string;
///
/// let text = to_xml_string(&vec![1, 2]).unwrap();
/// assert_eq!(
///     text,
///     r#"<?xml version="1.0" encoding="UTF-8"?><root><item>1</item><item>2</item></root>"#
/// );
/// ```
///
/// # Errors
///
/// Returns an error if `value` cannot be converted to a [`Value`] or encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_xml_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let options = XmlOptions::default();
    let root = encode_with_options(&to_value(value)?, &options)?;
    to_string_with_options(&root, &options)
}

/// Write an element tree as a compact XML document with a declaration.
///
/// # Errors
///
/// Returns an error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(root: &Element) -> Result<String> {
    to_string_with_options(root, &XmlOptions::default())
}

/// Write an element tree as an indented XML document.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::{encode, to_string_pretty, xml};
///
/// let root = encode(&xml!({"a": {"b": 1}})).unwrap();
/// let text = to_string_pretty(&root).unwrap();
/// assert!(text.contains("\n    <a>\n        <b>1</b>\n    </a>\n"));
/// ```
///
/// # Errors
///
/// Returns an error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(root: &Element) -> Result<String> {
    to_string_with_options(root, &XmlOptions::pretty())
}

/// Write an element tree as XML text shaped by `options`.
///
/// # Errors
///
/// Returns an error if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(root: &Element, options: &XmlOptions) -> Result<String> {
    let mut buffer = Vec::new();
    to_writer_with_options(&mut buffer, root, options)?;
    String::from_utf8(buffer).map_err(|e| Error::io(&e.to_string()))
}

/// Write an element tree to an `io::Write` sink.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::{to_writer, Element};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Element::new("empty")).unwrap();
/// assert!(buffer.ends_with(b"<empty/>"));
/// ```
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, root: &Element) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, root, &XmlOptions::default())
}

/// Write an element tree to an `io::Write` sink with custom options.
///
/// # Errors
///
/// Returns an error if writing to the sink fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(writer: W, root: &Element, options: &XmlOptions) -> Result<()>
where
    W: io::Write,
{
    debug!(root = root.name(), pretty = options.pretty, "writing document");
    let mut serializer = Serializer::new(writer, options);
    serializer.write_document(root)
}

/// Parse XML text into an element tree.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::from_str;
///
/// let root = from_str("<a><b>1</b></a>").unwrap();
/// assert_eq!(root.child("b").and_then(|b| b.value()), Some("1"));
///
/// assert!(from_str("<a><b></a>").unwrap_err().is_parse());
/// ```
///
/// # Errors
///
/// Returns [`Error::Parse`] for malformed input and
/// [`Error::DepthLimitExceeded`] for documents nested too deeply.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Element> {
    from_str_with_options(s, &XmlOptions::default())
}

/// Parse XML text with the depth limit of `options`.
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: &XmlOptions) -> Result<Element> {
    debug!(len = s.len(), max_depth = options.max_depth, "decoding document");
    Decoder::new(QuickXmlParser::new(options.max_depth), options.max_depth).decode(s)
}

/// Parse UTF-8 encoded XML bytes.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the bytes are not valid UTF-8 or not
/// well-formed XML.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Element> {
    let s = std::str::from_utf8(v).map_err(|e| Error::parse(e.valid_up_to() as u64, &e.to_string()))?;
    from_str(s)
}

/// Parse XML read from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::from_reader;
/// use std::io::Cursor;
///
/// let root = from_reader(Cursor::new(b"<a>1</a>")).unwrap();
/// assert_eq!(root.value(), Some("1"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, and [`Error::Parse`] for input that
/// is not UTF-8, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Element>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Parse the XML document stored at `path`.
///
/// # Errors
///
/// Returns [`Error::MissingSource`] if `path` does not exist, [`Error::Io`] if
/// it cannot be read, otherwise as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Element> {
    from_file_with_options(path, &XmlOptions::default())
}

/// Parse the XML document stored at `path` with custom options.
///
/// # Errors
///
/// See [`from_file`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_file_with_options<P: AsRef<Path>>(path: P, options: &XmlOptions) -> Result<Element> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading document");

    let text = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => Error::missing_source(&path.display().to_string()),
        _ => Error::io(&e.to_string()),
    })?;
    from_str_with_options(&text, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;
    use serde::Serialize;

    #[derive(Serialize)]
    struct User {
        id: u32,
        name: String,
        active: bool,
        tags: Vec<String>,
    }

    fn user() -> User {
        User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["admin".to_string(), "user".to_string()],
        }
    }

    #[test]
    fn test_struct_round_trip() {
        let value = to_value(&user()).unwrap();
        let text = to_string(&encode(&value).unwrap()).unwrap();
        let back = from_str(&text).unwrap();
        assert_eq!(back.to_value(), value);
    }

    #[test]
    fn test_to_xml_string() {
        let text = to_xml_string(&user()).unwrap();
        assert!(text.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(text.contains("<tags>admin</tags><tags>user</tags>"));
    }

    #[test]
    fn test_pretty_round_trip() {
        let root = encode(&to_value(&user()).unwrap()).unwrap();
        let text = to_string_pretty(&root).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(from_str(&text).unwrap(), root);
    }

    #[test]
    fn test_custom_options() {
        let options = XmlOptions::new()
            .with_root_name("people")
            .with_item_name("person")
            .without_declaration();

        let root = encode_with_options(&xml!(["a", "b"]), &options).unwrap();
        let text = to_string_with_options(&root, &options).unwrap();
        assert_eq!(text, "<people><person>a</person><person>b</person></people>");
    }

    #[test]
    fn test_from_slice_rejects_invalid_utf8() {
        let err = from_slice(b"<a>\xff</a>").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_from_reader_invalid_utf8_is_parse_error() {
        let err = from_reader(std::io::Cursor::new(b"<a>\xff</a>".to_vec())).unwrap_err();
        assert!(err.is_parse(), "{:?}", err);
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_from_reader_io_failure() {
        assert!(matches!(from_reader(FailingReader), Err(Error::Io(_))));
    }

    #[test]
    fn test_from_file_missing() {
        let err = from_file("/definitely/not/here.xml").unwrap_err();
        assert!(err.is_missing_source());
    }
}
