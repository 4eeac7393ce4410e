//! Configuration options for XML encoding, decoding and output.
//!
//! [`XmlOptions`] controls the names the encoder invents (the root element and
//! the per-item element of a top-level list), the shape of the written text
//! (declaration, indentation) and the nesting limit applied in both
//! directions.
//!
//! ## Examples
//!
//! ```rust
//! use serde_xmldoc::{encode_with_options, to_string_with_options, xml, XmlOptions};
//!
//! let options = XmlOptions::new()
//!     .with_root_name("users")
//!     .with_item_name("user")
//!     .without_declaration();
//!
//! let data = xml!(["alice", "bob"]);
//! let element = encode_with_options(&data, &options).unwrap();
//! let text = to_string_with_options(&element, &options).unwrap();
//! assert_eq!(text, "<users><user>alice</user><user>bob</user></users>");
//! ```

/// Default name of the root element when none is given.
pub const DEFAULT_ROOT_NAME: &str = "root";

/// Default element name for items of a top-level list.
pub const DEFAULT_ITEM_NAME: &str = "item";

/// Default maximum nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for the XML codec.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::XmlOptions;
///
/// // Default compact options
/// let options = XmlOptions::new();
///
/// // Indented output with 4-space indentation
/// let options = XmlOptions::pretty();
///
/// // Custom configuration
/// let options = XmlOptions::new()
///     .with_root_name("catalog")
///     .with_indent(2)
///     .with_max_depth(32);
/// ```
#[derive(Clone, Debug)]
pub struct XmlOptions {
    pub root_name: String,
    pub item_name: String,
    pub pretty: bool,
    pub indent: usize,
    pub declaration: bool,
    pub version: String,
    pub encoding: String,
    pub max_depth: usize,
}

impl Default for XmlOptions {
    fn default() -> Self {
        XmlOptions {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            item_name: DEFAULT_ITEM_NAME.to_string(),
            pretty: false,
            indent: 4,
            declaration: true,
            version: "1.0".to_string(),
            encoding: "UTF-8".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl XmlOptions {
    /// Creates default options (compact output with an XML declaration).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::XmlOptions;
    ///
    /// let options = XmlOptions::new();
    /// assert_eq!(options.root_name, "root");
    /// assert!(!options.pretty);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::XmlOptions;
    ///
    /// let options = XmlOptions::pretty();
    /// assert!(options.pretty);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        XmlOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the root element name used when encoding a value.
    #[must_use]
    pub fn with_root_name(mut self, name: &str) -> Self {
        self.root_name = name.to_string();
        self
    }

    /// Sets the element name given to each item of a top-level list.
    #[must_use]
    pub fn with_item_name(mut self, name: &str) -> Self {
        self.item_name = name.to_string();
        self
    }

    /// Sets the indentation size (number of spaces per level).
    ///
    /// Only affects pretty-printed output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Sets the version and encoding written in the XML declaration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::XmlOptions;
    ///
    /// let options = XmlOptions::new().with_declaration("1.1", "ISO-8859-1");
    /// assert!(options.declaration);
    /// assert_eq!(options.encoding, "ISO-8859-1");
    /// ```
    #[must_use]
    pub fn with_declaration(mut self, version: &str, encoding: &str) -> Self {
        self.declaration = true;
        self.version = version.to_string();
        self.encoding = encoding.to_string();
        self
    }

    /// Omits the `<?xml ...?>` declaration from written output.
    #[must_use]
    pub fn without_declaration(mut self) -> Self {
        self.declaration = false;
        self
    }

    /// Sets the maximum nesting depth accepted by the encoder and decoder.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
