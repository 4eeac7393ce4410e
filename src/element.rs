//! The in-memory XML node.
//!
//! An [`Element`] owns its attributes, namespace declarations, optional text
//! and children. Trees are built by the [`Encoder`](crate::Encoder) or the
//! [`Decoder`](crate::Decoder) and are read-only for everyone else: a caller
//! that wants a different tree builds a new one.
//!
//! ```rust
//! use serde_xmldoc::from_str;
//!
//! let root = from_str(r#"<root a="1"><item>x</item><item>y</item></root>"#).unwrap();
//!
//! assert_eq!(root.name(), "root");
//! assert_eq!(root.attribute("a"), Some("1"));
//! let items: Vec<_> = root.children_by_name("item").filter_map(|c| c.value()).collect();
//! assert_eq!(items, vec!["x", "y"]);
//! ```

use crate::ser::Serializer;
use crate::{Value, XmlMap, XmlOptions};
use indexmap::IndexMap;
use std::fmt;

/// One node of an XML document tree.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Element {
    name: String,
    attributes: IndexMap<String, String>,
    namespaces: IndexMap<String, String>,
    value: Option<String>,
    cdata: bool,
    children: Vec<Element>,
}

impl Element {
    /// Creates an element with the given name, taken as is.
    ///
    /// Use [`sanitize_name`](crate::sanitize_name) first when the name comes
    /// from untrusted keys.
    pub fn new(name: impl Into<String>) -> Self {
        Element {
            name: name.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets an attribute, replacing any previous value under the same key.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Declares a namespace prefix. The empty prefix is the default namespace.
    pub fn set_namespace(&mut self, prefix: impl Into<String>, uri: impl Into<String>) -> &mut Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// Sets the text content. With `cdata` the text is written as a CDATA section.
    pub fn set_value(&mut self, value: impl Into<String>, cdata: bool) -> &mut Self {
        self.value = Some(value.into());
        self.cdata = cdata;
        self
    }

    pub fn add_child(&mut self, child: Element) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn add_children<I>(&mut self, children: I) -> &mut Self
    where
        I: IntoIterator<Item = Element>,
    {
        self.children.extend(children);
        self
    }

    /// Returns an attribute value, if present.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    #[must_use]
    pub fn has_attribute(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    #[must_use]
    pub fn has_attributes(&self) -> bool {
        !self.attributes.is_empty()
    }

    /// Returns the URI bound to a namespace prefix, if declared.
    #[must_use]
    pub fn namespace(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    #[must_use]
    pub fn namespaces(&self) -> &IndexMap<String, String> {
        &self.namespaces
    }

    #[must_use]
    pub fn has_namespace(&self, prefix: &str) -> bool {
        self.namespaces.contains_key(prefix)
    }

    #[must_use]
    pub fn has_namespaces(&self) -> bool {
        !self.namespaces.is_empty()
    }

    /// Returns the text content, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the text content as a typed scalar (see [`Value::autobox`]).
    ///
    /// An element without text boxes to an empty string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::{from_str, Value};
    ///
    /// let root = from_str("<count>12</count>").unwrap();
    /// assert_eq!(root.boxed_value(), Value::from(12));
    /// ```
    #[must_use]
    pub fn boxed_value(&self) -> Value {
        Value::autobox(self.value.as_deref().unwrap_or(""))
    }

    /// Returns `true` if the text is written as a CDATA section.
    #[must_use]
    pub fn is_cdata(&self) -> bool {
        self.cdata
    }

    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Returns the first child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    /// Returns every child with the given name, in document order.
    pub fn children_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    /// Returns the attributes whose key carries the `prefix:` namespace prefix.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::from_str;
    ///
    /// let root = from_str(r#"<a xmlns:x="urn:x" x:one="1" two="2" x:three="3"/>"#).unwrap();
    /// let keys: Vec<_> = root.namespace_attributes("x").map(|(k, _)| k).collect();
    /// assert_eq!(keys, vec!["x:one", "x:three"]);
    /// ```
    pub fn namespace_attributes<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.attributes
            .iter()
            .filter(move |(key, _)| has_prefix(key, prefix))
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Returns the children whose name carries the `prefix:` namespace prefix.
    pub fn namespace_children<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter(move |child| has_prefix(&child.name, prefix))
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Element> {
        self.children.iter()
    }

    /// Converts the element's content into a [`Value`], the inverse of encoding.
    ///
    /// - An element with children becomes a map: `@attributes` first (values
    ///   boxed) when present, then one entry per child name. Repeated names
    ///   collect into a list in document order.
    /// - A leaf without attributes or CDATA becomes its boxed text.
    /// - Any other leaf becomes `{ "@attributes"?, "@value", "@cdata"? }`.
    ///
    /// The element's own name is not part of the result; see
    /// [`to_document_value`](Self::to_document_value).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::{from_str, xml};
    ///
    /// let root = from_str("<root><a>1</a><b>x</b><b>y</b></root>").unwrap();
    /// assert_eq!(root.to_value(), xml!({"a": 1, "b": ["x", "y"]}));
    /// ```
    #[must_use]
    pub fn to_value(&self) -> Value {
        if self.children.is_empty() {
            if self.attributes.is_empty() && !self.cdata {
                return self.boxed_value();
            }

            let mut map = XmlMap::with_capacity(3);
            if let Some(attributes) = self.boxed_attributes() {
                map.insert("@attributes".to_string(), attributes);
            }
            map.insert("@value".to_string(), self.boxed_value());
            if self.cdata {
                map.insert("@cdata".to_string(), Value::Bool(true));
            }
            return Value::Map(map);
        }

        let mut map = XmlMap::new();
        if let Some(attributes) = self.boxed_attributes() {
            map.insert("@attributes".to_string(), attributes);
        }

        for child in &self.children {
            let value = child.to_value();
            match map.get_mut(&child.name) {
                Some(Value::List(list)) => list.push(value),
                Some(existing) => {
                    let first = std::mem::take(existing);
                    *existing = Value::List(vec![first, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }

        Value::Map(map)
    }

    /// Like [`to_value`](Self::to_value), wrapped in a map keyed by this element's name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::{from_str, xml};
    ///
    /// let root = from_str("<note>hi</note>").unwrap();
    /// assert_eq!(root.to_document_value(), xml!({"note": "hi"}));
    /// ```
    #[must_use]
    pub fn to_document_value(&self) -> Value {
        let mut map = XmlMap::with_capacity(1);
        map.insert(self.name.clone(), self.to_value());
        Value::Map(map)
    }

    fn boxed_attributes(&self) -> Option<Value> {
        if self.attributes.is_empty() {
            return None;
        }

        let attributes = self
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), Value::autobox(value)))
            .collect::<XmlMap>();
        Some(Value::Map(attributes))
    }
}

fn has_prefix(name: &str, prefix: &str) -> bool {
    name.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with(':'))
}

/// Compact XML without a declaration.
impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = XmlOptions::new().without_declaration();
        let mut serializer = Serializer::new(Vec::new(), &options);
        serializer.write_document(self).map_err(|_| fmt::Error)?;
        let bytes = serializer.into_inner();
        f.write_str(&String::from_utf8_lossy(&bytes))
    }
}

impl<'a> IntoIterator for &'a Element {
    type Item = &'a Element;
    type IntoIter = std::slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml;

    fn leaf(name: &str, value: &str) -> Element {
        let mut element = Element::new(name);
        element.set_value(value, false);
        element
    }

    #[test]
    fn test_queries() {
        let mut root = Element::new("feed");
        root.set_namespace("media", "http://search.yahoo.com/mrss/")
            .set_attribute("media:id", "7")
            .set_attribute("lang", "en")
            .add_child(leaf("title", "News"))
            .add_child(leaf("media:thumb", "a.png"))
            .add_child(leaf("media:thumb", "b.png"));

        assert_eq!(root.len(), 3);
        assert!(root.has_attribute("lang"));
        assert!(!root.has_attribute("missing"));
        assert_eq!(root.namespace("media"), Some("http://search.yahoo.com/mrss/"));
        assert_eq!(root.child("title").and_then(Element::value), Some("News"));
        assert!(root.child("body").is_none());
        assert_eq!(root.children_by_name("media:thumb").count(), 2);
        assert_eq!(root.namespace_children("media").count(), 2);
        assert_eq!(
            root.namespace_attributes("media").collect::<Vec<_>>(),
            vec![("media:id", "7")]
        );
        assert_eq!(root.iter().map(Element::name).collect::<Vec<_>>(), vec![
            "title",
            "media:thumb",
            "media:thumb"
        ]);
    }

    #[test]
    fn test_prefix_match_requires_colon() {
        let mut root = Element::new("r");
        root.add_child(Element::new("mediathing"));
        assert_eq!(root.namespace_children("media").count(), 0);
    }

    #[test]
    fn test_to_value_leaf_forms() {
        assert_eq!(leaf("n", "5").to_value(), Value::from(5));
        assert_eq!(Element::new("empty").to_value(), Value::from(""));

        let mut tagged = leaf("price", "9.5");
        tagged.set_attribute("currency", "EUR");
        assert_eq!(
            tagged.to_value(),
            xml!({"@attributes": {"currency": "EUR"}, "@value": 9.5})
        );

        let mut raw = Element::new("script");
        raw.set_value("a < b", true);
        assert_eq!(raw.to_value(), xml!({"@value": "a < b", "@cdata": true}));
    }

    #[test]
    fn test_to_value_groups_repeated_children() {
        let mut root = Element::new("root");
        root.add_child(leaf("b", "1"))
            .add_child(leaf("a", "x"))
            .add_child(leaf("b", "2"))
            .add_child(leaf("b", "3"));

        assert_eq!(root.to_value(), xml!({"b": [1, 2, 3], "a": "x"}));
    }

    #[test]
    fn test_display_is_compact_xml() {
        let mut root = Element::new("root");
        root.set_attribute("id", "1").add_child(leaf("a", "x & y"));
        assert_eq!(root.to_string(), r#"<root id="1"><a>x &amp; y</a></root>"#);
    }
}
