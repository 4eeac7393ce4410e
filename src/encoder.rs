//! Construction of element trees from [`Value`]s.
//!
//! Maps become elements whose keys name the children, lists become repeated
//! sibling elements, and scalars become leaf text. Three reserved keys steer
//! the construction of a single element:
//!
//! - `@attributes`: a map of attribute names to scalar values
//! - `@value`: the scalar text of a leaf element
//! - `@cdata`: `true` to wrap the `@value` text in CDATA
//!
//! ```rust
//! use serde_xmldoc::{encode, xml};
//!
//! let root = encode(&xml!({
//!     "@attributes": {"version": 2},
//!     "title": {"@value": "a < b", "@cdata": true, "@attributes": {"lang": "en"}},
//!     "tag": ["x", "y"]
//! }))
//! .unwrap();
//!
//! assert_eq!(
//!     root.to_string(),
//!     r#"<root version="2"><title lang="en"><![CDATA[a < b]]></title><tag>x</tag><tag>y</tag></root>"#
//! );
//! ```

use crate::{sanitize_name, Element, Error, Result, Value, XmlMap, XmlOptions};
use tracing::{trace, warn};

pub(crate) const ATTRIBUTES_KEY: &str = "@attributes";
pub(crate) const VALUE_KEY: &str = "@value";
pub(crate) const CDATA_KEY: &str = "@cdata";

fn is_control_key(key: &str) -> bool {
    matches!(key, ATTRIBUTES_KEY | VALUE_KEY | CDATA_KEY)
}

/// Builds [`Element`] trees from [`Value`]s.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::{xml, Encoder, XmlOptions};
///
/// let encoder = Encoder::new(&XmlOptions::new().with_item_name("row"));
/// let root = encoder.encode(&xml!([1, 2]), "rows").unwrap();
///
/// assert_eq!(root.to_string(), "<rows><row>1</row><row>2</row></rows>");
/// ```
#[derive(Clone, Debug)]
pub struct Encoder {
    item_name: String,
    max_depth: usize,
}

impl Encoder {
    pub fn new(options: &XmlOptions) -> Self {
        Encoder {
            item_name: options.item_name.clone(),
            max_depth: options.max_depth,
        }
    }

    /// Encodes any value under an element named `root`.
    ///
    /// Maps go through [`encode_map`](Self::encode_map), lists through
    /// [`encode_list`](Self::encode_list) with the configured item name, and a
    /// scalar becomes a single leaf.
    pub fn encode(&self, value: &Value, root: &str) -> Result<Element> {
        match value {
            Value::Map(map) => self.encode_map(root, map),
            Value::List(list) => self.encode_list(root, &self.item_name, list),
            scalar => {
                let mut element = Element::new(sanitize_name(root)?);
                element.set_value(scalar.unbox()?, false);
                Ok(element)
            }
        }
    }

    /// Encodes a map as element `root`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidName`] when `root` or a key sanitizes to nothing
    /// - [`Error::UnsupportedShape`] for non-scalar `@value` or attribute
    ///   values, and a non-boolean `@cdata`
    /// - [`Error::DepthLimitExceeded`] past the configured nesting depth
    pub fn encode_map(&self, root: &str, map: &XmlMap) -> Result<Element> {
        self.build_map(root, map, 0)
    }

    /// Encodes every list item as a child of element `root`, each one named `item`.
    pub fn encode_list(&self, root: &str, item: &str, list: &[Value]) -> Result<Element> {
        let mut element = Element::new(sanitize_name(root)?);
        for value in list {
            self.append_child(&mut element, item, value, 1)?;
        }
        Ok(element)
    }

    fn build_map(&self, name: &str, map: &XmlMap, depth: usize) -> Result<Element> {
        self.check_depth(depth)?;

        let mut element = Element::new(sanitize_name(name)?);
        trace!(name = element.name(), depth, "building element");

        if let Some(attributes) = map.get(ATTRIBUTES_KEY) {
            apply_attributes(&mut element, attributes)?;
        }
        if map.contains_key(VALUE_KEY) || map.contains_key(CDATA_KEY) {
            warn!(name = element.name(), "@value and @cdata are ignored on a map element");
        }

        for (key, value) in map.iter().filter(|(key, _)| !is_control_key(key)) {
            self.append_child(&mut element, key, value, depth + 1)?;
        }

        Ok(element)
    }

    fn append_child(&self, parent: &mut Element, key: &str, value: &Value, depth: usize) -> Result<()> {
        self.check_depth(depth)?;

        match value {
            Value::Map(map) if map.contains_key(VALUE_KEY) => {
                parent.add_child(leaf_from_map(key, map)?);
            }
            Value::Map(map) => {
                parent.add_child(self.build_map(key, map, depth)?);
            }
            Value::List(items) => {
                for item in items {
                    self.append_child(parent, key, item, depth)?;
                }
            }
            scalar => {
                let mut child = Element::new(sanitize_name(key)?);
                child.set_value(scalar.unbox()?, false);
                trace!(name = child.name(), depth, "built leaf");
                parent.add_child(child);
            }
        }

        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(Error::depth_limit(self.max_depth));
        }
        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(&XmlOptions::default())
    }
}

/// A map carrying `@value` describes one leaf; its other keys are dropped.
fn leaf_from_map(key: &str, map: &XmlMap) -> Result<Element> {
    let mut element = Element::new(sanitize_name(key)?);

    let text = match map.get(VALUE_KEY) {
        Some(value) => value.unbox()?,
        None => String::new(),
    };
    let cdata = match map.get(CDATA_KEY) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(other) => {
            return Err(Error::unsupported_shape(&format!(
                "{} of <{}> must be a boolean, found {:?}",
                CDATA_KEY,
                element.name(),
                other
            )))
        }
    };
    element.set_value(text, cdata);

    if let Some(attributes) = map.get(ATTRIBUTES_KEY) {
        apply_attributes(&mut element, attributes)?;
    }

    let ignored: Vec<&str> = map
        .keys()
        .map(String::as_str)
        .filter(|key| !is_control_key(key))
        .collect();
    if !ignored.is_empty() {
        warn!(name = element.name(), ?ignored, "keys beside @value are ignored");
    }

    Ok(element)
}

fn apply_attributes(element: &mut Element, attributes: &Value) -> Result<()> {
    let Value::Map(attributes) = attributes else {
        warn!(name = element.name(), "ignoring @attributes that is not a map");
        return Ok(());
    };

    for (key, value) in attributes {
        let text = value.unbox().map_err(|_| {
            Error::unsupported_shape(&format!(
                "attribute {:?} of <{}> must be a scalar",
                key,
                element.name()
            ))
        })?;
        element.set_attribute(sanitize_name(key)?, text);
    }

    Ok(())
}
