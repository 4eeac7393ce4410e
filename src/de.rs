//! XML text input.
//!
//! Decoding happens in two steps. A [`RawParser`] turns text into a
//! [`RawNode`] tree, and the [`Decoder`] converts that tree into
//! [`Element`]s. The default parser, [`QuickXmlParser`], is backed by
//! `quick-xml`; any other parser can be plugged in through the trait.
//!
//! ## What is kept
//!
//! - Tag names as written, prefixes included
//! - Attributes in document order, unescaped (namespace declarations excluded)
//! - Every namespace declaration in scope at each node
//! - Direct text content, including CDATA sections and entity references
//! - Children in document order
//!
//! Comments, processing instructions, the XML declaration and `DOCTYPE` are
//! skipped. Text is trimmed by the decoder; whether it came from a CDATA
//! section is not recorded.
//!
//! ```rust
//! use serde_xmldoc::from_str;
//!
//! let root = from_str("<root><![CDATA[ <raw> ]]></root>").unwrap();
//! assert_eq!(root.value(), Some("<raw>"));
//! assert!(!root.is_cdata());
//! ```

use crate::{Element, Error, Result};
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::PrefixDeclaration;
use quick_xml::Reader;
use tracing::trace;

/// A parsed node before conversion into an [`Element`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Prefix to URI, for every declaration in scope at this node.
    pub namespaces: Vec<(String, String)>,
    /// Untrimmed direct text content.
    pub text: String,
    pub children: Vec<RawNode>,
}

/// Turns XML text into a raw node tree.
pub trait RawParser {
    /// Parses a complete document and returns its root node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for input that is not well-formed.
    fn parse(&self, input: &str) -> Result<RawNode>;
}

/// The default [`RawParser`], backed by `quick_xml::Reader`.
///
/// The tree is built without recursion; nesting deeper than `max_depth`
/// fails with [`Error::DepthLimitExceeded`].
#[derive(Clone, Debug)]
pub struct QuickXmlParser {
    max_depth: usize,
}

impl QuickXmlParser {
    pub fn new(max_depth: usize) -> Self {
        QuickXmlParser { max_depth }
    }
}

impl Default for QuickXmlParser {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_MAX_DEPTH)
    }
}

impl RawParser for QuickXmlParser {
    fn parse(&self, input: &str) -> Result<RawNode> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);

        let mut stack: Vec<RawNode> = Vec::new();
        let mut root: Option<RawNode> = None;
        let mut started = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| Error::parse(reader.error_position(), &e.to_string()))?;
            let position = reader.buffer_position();
            let at_start = !std::mem::replace(&mut started, true);

            match event {
                Event::Start(ref e) | Event::Empty(ref e) => {
                    if root.is_some() {
                        return Err(Error::parse(position, "content after the root element"));
                    }
                    if stack.len() >= self.max_depth {
                        return Err(Error::depth_limit(self.max_depth));
                    }

                    let inherited = stack.last().map(|parent| parent.namespaces.as_slice());
                    let node = open_node(e, inherited.unwrap_or(&[]), position)?;
                    trace!(name = %node.name, depth = stack.len(), "opened node");

                    if matches!(event, Event::Empty(_)) {
                        close_node(node, &mut stack, &mut root);
                    } else {
                        stack.push(node);
                    }
                }
                Event::End(_) => {
                    let node = stack
                        .pop()
                        .ok_or_else(|| Error::parse(position, "unexpected closing tag"))?;
                    close_node(node, &mut stack, &mut root);
                }
                Event::Text(e) => {
                    let text = e
                        .decode()
                        .map_err(|e| Error::parse(position, &e.to_string()))?;
                    append_text(&mut stack, &text, position)?;
                }
                Event::CData(e) => {
                    let text = std::str::from_utf8(&e)
                        .map_err(|e| Error::parse(position, &e.to_string()))?;
                    append_text(&mut stack, text, position)?;
                }
                Event::GeneralRef(e) => {
                    let raw = e
                        .decode()
                        .map_err(|e| Error::parse(position, &e.to_string()))?;
                    let resolved = resolve_entity(&raw, position)?;
                    append_text(&mut stack, &resolved, position)?;
                }
                Event::Decl(_) if !at_start => {
                    return Err(Error::parse(position, "XML declaration must start the document"));
                }
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::parse(
                reader.buffer_position(),
                &format!("unclosed element <{}>", open.name),
            ));
        }

        root.ok_or_else(|| Error::parse(reader.buffer_position(), "document has no root element"))
    }
}

fn open_node(start: &BytesStart<'_>, inherited: &[(String, String)], position: u64) -> Result<RawNode> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| Error::parse(position, &e.to_string()))?
        .to_string();

    let mut namespaces = inherited.to_vec();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::parse(position, &e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| Error::parse(position, &e.to_string()))?
            .into_owned();

        match attr.key.as_namespace_binding() {
            Some(PrefixDeclaration::Default) => declare(&mut namespaces, String::new(), value),
            Some(PrefixDeclaration::Named(prefix)) => {
                let prefix = std::str::from_utf8(prefix)
                    .map_err(|e| Error::parse(position, &e.to_string()))?;
                declare(&mut namespaces, prefix.to_string(), value);
            }
            None => {
                let key = std::str::from_utf8(attr.key.as_ref())
                    .map_err(|e| Error::parse(position, &e.to_string()))?;
                attributes.push((key.to_string(), value));
            }
        }
    }

    Ok(RawNode {
        name,
        attributes,
        namespaces,
        text: String::new(),
        children: Vec::new(),
    })
}

/// A redeclared prefix keeps its position and takes the new URI.
fn declare(namespaces: &mut Vec<(String, String)>, prefix: String, uri: String) {
    match namespaces.iter_mut().find(|(existing, _)| *existing == prefix) {
        Some(entry) => entry.1 = uri,
        None => namespaces.push((prefix, uri)),
    }
}

fn close_node(node: RawNode, stack: &mut [RawNode], root: &mut Option<RawNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}

fn append_text(stack: &mut [RawNode], text: &str, position: u64) -> Result<()> {
    match stack.last_mut() {
        Some(node) => node.text.push_str(text),
        None if text.chars().all(is_xml_space) => {}
        None => return Err(Error::parse(position, "text outside the root element")),
    }
    Ok(())
}

/// The `S` production of XML: only these four characters are markup whitespace.
fn is_xml_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn resolve_entity(raw: &str, position: u64) -> Result<String> {
    if let Some(resolved) = resolve_xml_entity(raw) {
        return Ok(resolved.into());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16)
        } else {
            rest.parse::<u32>()
        }
        .map_err(|_| Error::parse(position, &format!("invalid character reference &{};", raw)))?;

        let ch = char::from_u32(code)
            .ok_or_else(|| Error::parse(position, &format!("invalid code point {}", code)))?;
        return Ok(ch.to_string());
    }

    Err(Error::parse(position, &format!("undeclared entity &{};", raw)))
}

/// Converts raw node trees into [`Element`] trees.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::{Decoder, QuickXmlParser};
///
/// let decoder = Decoder::new(QuickXmlParser::default(), 64);
/// let root = decoder.decode("<root a=\"1\"><item> x </item></root>").unwrap();
///
/// assert_eq!(root.attribute("a"), Some("1"));
/// assert_eq!(root.child("item").and_then(|c| c.value()), Some("x"));
/// ```
#[derive(Clone, Debug)]
pub struct Decoder<P: RawParser> {
    parser: P,
    max_depth: usize,
}

impl<P: RawParser> Decoder<P> {
    pub fn new(parser: P, max_depth: usize) -> Self {
        Decoder { parser, max_depth }
    }

    /// Parses `input` and converts the whole document.
    pub fn decode(&self, input: &str) -> Result<Element> {
        let raw = self.parser.parse(input)?;
        self.convert(raw, 0)
    }

    fn convert(&self, raw: RawNode, depth: usize) -> Result<Element> {
        if depth >= self.max_depth {
            return Err(Error::depth_limit(self.max_depth));
        }

        let mut element = Element::new(raw.name);
        for (key, value) in raw.attributes {
            element.set_attribute(key, value);
        }
        for (prefix, uri) in raw.namespaces {
            element.set_namespace(prefix, uri);
        }

        let text = raw.text.trim_matches(is_xml_space);
        if !text.is_empty() {
            element.set_value(text, false);
        }

        for child in raw.children {
            element.add_child(self.convert(child, depth + 1)?);
        }

        Ok(element)
    }
}

impl Default for Decoder<QuickXmlParser> {
    fn default() -> Self {
        Decoder::new(QuickXmlParser::default(), crate::options::DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> Result<RawNode> {
        QuickXmlParser::default().parse(input)
    }

    #[test]
    fn test_raw_tree_shape() {
        let raw = parse(r#"<root a="1"><item>x</item><item>y</item></root>"#).unwrap();
        assert_eq!(raw.name, "root");
        assert_eq!(raw.attributes, vec![("a".to_string(), "1".to_string())]);
        assert_eq!(raw.children.len(), 2);
        assert_eq!(raw.children[1].text, "y");
    }

    #[test]
    fn test_namespaces_are_inherited() {
        let raw = parse(
            r#"<r xmlns="urn:default" xmlns:a="urn:a"><a:c xmlns:a="urn:other" xmlns:b="urn:b"/></r>"#,
        )
        .unwrap();

        assert!(raw.attributes.is_empty());
        assert_eq!(
            raw.children[0].namespaces,
            vec![
                (String::new(), "urn:default".to_string()),
                ("a".to_string(), "urn:other".to_string()),
                ("b".to_string(), "urn:b".to_string()),
            ]
        );
    }

    #[test]
    fn test_entities_and_cdata_join_text() {
        let raw = parse("<t>a &amp; b &#65;&#x42; <![CDATA[<c>]]></t>").unwrap();
        assert_eq!(raw.text, "a & b AB <c>");
    }

    #[test]
    fn test_prolog_and_comments_skipped() {
        let raw = parse(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE r>\n<!-- note -->\n<r><?pi data?>v<!-- x --></r>\n",
        )
        .unwrap();
        assert_eq!(raw.name, "r");
        assert_eq!(raw.text, "v");
    }

    #[test]
    fn test_malformed_documents() {
        for input in [
            "",
            "   ",
            "<a>",
            "<a></b>",
            "</a>",
            "<a/><b/>",
            "text<a/>",
            "<a/>tail",
            "<a>&unknown;</a>",
            "<a/><?xml version=\"1.0\"?>",
            " <?xml version=\"1.0\"?><a/>",
            "\u{a0}<a/>",
            "<a/>\u{2003}",
        ] {
            let err = parse(input).unwrap_err();
            assert!(err.is_parse(), "{:?} gave {:?}", input, err);
        }
    }

    #[test]
    fn test_only_markup_whitespace_is_trimmed() {
        let element = Decoder::default()
            .decode("<a>\n\t\u{a0}x\u{2003} \r\n</a>")
            .unwrap();
        assert_eq!(element.value(), Some("\u{a0}x\u{2003}"));
    }

    #[test]
    fn test_depth_limit() {
        let deep = "<a>".repeat(10) + &"</a>".repeat(10);
        assert!(QuickXmlParser::new(10).parse(&deep).is_ok());
        assert!(matches!(
            QuickXmlParser::new(9).parse(&deep),
            Err(Error::DepthLimitExceeded { limit: 9 })
        ));
    }

    struct FixedParser(RawNode);

    impl RawParser for FixedParser {
        fn parse(&self, _input: &str) -> Result<RawNode> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_decoder_with_injected_parser() {
        let raw = RawNode {
            name: "doc".to_string(),
            attributes: vec![("id".to_string(), "7".to_string())],
            namespaces: vec![("x".to_string(), "urn:x".to_string())],
            text: "  \n ".to_string(),
            children: vec![RawNode {
                name: "x:leaf".to_string(),
                text: "  padded  ".to_string(),
                ..Default::default()
            }],
        };

        let element = Decoder::new(FixedParser(raw), 8).decode("ignored").unwrap();
        assert_eq!(element.attribute("id"), Some("7"));
        assert_eq!(element.namespace("x"), Some("urn:x"));
        assert_eq!(element.value(), None);
        assert_eq!(element.children()[0].value(), Some("padded"));
    }

    #[test]
    fn test_decoder_depth_limit() {
        let mut raw = RawNode {
            name: "n".to_string(),
            ..Default::default()
        };
        for _ in 0..5 {
            raw = RawNode {
                name: "n".to_string(),
                children: vec![raw],
                ..Default::default()
            };
        }

        assert!(Decoder::new(FixedParser(raw.clone()), 6).decode("").is_ok());
        assert!(Decoder::new(FixedParser(raw), 5).decode("").is_err());
    }
}
