//! XML text output.
//!
//! This module provides the [`Serializer`] that renders an [`Element`] tree as
//! XML text through `quick_xml::Writer`.
//!
//! ## Output rules
//!
//! - An optional `<?xml version=".." encoding=".."?>` declaration comes first
//! - Namespace declarations precede attributes on the opening tag; a prefix
//!   already bound to the same URI by an ancestor is not declared again
//! - An `xmlns` attribute for a prefix the element declares is dropped
//! - Text is escaped, or wrapped in CDATA when the element asks for it
//! - Children follow the text in stored order
//! - Elements without text and children are self-closing
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_xmldoc::{encode, to_string, xml};
//!
//! let element = encode(&xml!({"a": 1})).unwrap();
//! let text = to_string(&element).unwrap();
//! assert_eq!(text, r#"<?xml version="1.0" encoding="UTF-8"?><root><a>1</a></root>"#);
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_xmldoc::{Element, Serializer, XmlOptions};
//!
//! let mut root = Element::new("greeting");
//! root.set_value("hello", false);
//!
//! let options = XmlOptions::new().without_declaration();
//! let mut serializer = Serializer::new(Vec::new(), &options);
//! serializer.write_document(&root).unwrap();
//!
//! assert_eq!(serializer.into_inner(), b"<greeting>hello</greeting>");
//! ```

use crate::{Element, Error, Result, XmlOptions};
use indexmap::IndexMap;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;
use tracing::{trace, warn};

/// Writes element trees as XML text to an `io::Write` sink.
pub struct Serializer<W: Write> {
    writer: Writer<W>,
    declaration: Option<(String, String)>,
}

impl<W: Write> Serializer<W> {
    pub fn new(inner: W, options: &XmlOptions) -> Self {
        let writer = if options.pretty {
            Writer::new_with_indent(inner, b' ', options.indent)
        } else {
            Writer::new(inner)
        };

        let declaration = options
            .declaration
            .then(|| (options.version.clone(), options.encoding.clone()));

        Serializer {
            writer,
            declaration,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Writes the declaration (when enabled) followed by `root` and its subtree.
    pub fn write_document(&mut self, root: &Element) -> Result<()> {
        if let Some((version, encoding)) = self.declaration.take() {
            self.write(Event::Decl(BytesDecl::new(&version, Some(&encoding), None)))?;
        }

        self.write_element(root, &IndexMap::new())
    }

    fn write_element(&mut self, element: &Element, in_scope: &IndexMap<String, String>) -> Result<()> {
        trace!(name = element.name(), "writing element");

        let mut start = BytesStart::new(element.name());
        let mut scope = in_scope.clone();
        let mut declared: Vec<&str> = Vec::new();

        for (prefix, uri) in element.namespaces() {
            if in_scope.get(prefix) == Some(uri) {
                continue;
            }
            if prefix.is_empty() {
                start.push_attribute(("xmlns", uri.as_str()));
            } else {
                let key = format!("xmlns:{}", prefix);
                start.push_attribute((key.as_str(), uri.as_str()));
            }
            scope.insert(prefix.clone(), uri.clone());
            declared.push(prefix);
        }

        for (key, value) in element.attributes() {
            if let Some(prefix) = declared_prefix(key) {
                if declared.contains(&prefix) {
                    warn!(name = element.name(), key = %key, "attribute repeats a namespace declaration, skipped");
                    continue;
                }
            }
            start.push_attribute((key.as_str(), value.as_str()));
        }

        let text = element
            .value()
            .filter(|text| !text.is_empty() || element.is_cdata());

        if text.is_none() && !element.has_children() {
            return self.write(Event::Empty(start));
        }

        self.write(Event::Start(start))?;

        if let Some(text) = text {
            if element.is_cdata() {
                self.write_cdata(text)?;
            } else {
                self.write(Event::Text(BytesText::new(text)))?;
            }
        }

        for child in element.children() {
            self.write_element(child, &scope)?;
        }

        self.write(Event::End(BytesEnd::new(element.name())))
    }

    /// A CDATA section cannot contain `]]>`, so such text is split across sections.
    fn write_cdata(&mut self, text: &str) -> Result<()> {
        let mut rest = text;
        while let Some(pos) = rest.find("]]>") {
            let (head, tail) = rest.split_at(pos + 2);
            self.write(Event::CData(BytesCData::new(head)))?;
            rest = tail;
        }
        self.write(Event::CData(BytesCData::new(rest)))
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::io(&e.to_string()))
    }
}

/// The prefix an `xmlns` or `xmlns:p` attribute key binds.
fn declared_prefix(key: &str) -> Option<&str> {
    if key == "xmlns" {
        return Some("");
    }
    key.strip_prefix("xmlns:")
}
