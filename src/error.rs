//! Error types for XML encoding and decoding.
//!
//! Every failure is surfaced to the caller of the top-level entry point as a
//! typed [`Error`]; no partially built tree is ever returned.
//!
//! ## Error Categories
//!
//! - **Parse Errors**: The XML text is not well-formed (carries the parser diagnostic)
//! - **Missing Source**: A document path given to [`from_file`](crate::from_file) does not exist
//! - **Invalid Names**: A key sanitizes to an empty element or attribute name
//! - **Unsupported Shapes**: A value appears where no encoding rule applies
//! - **Depth Limit**: Nesting exceeds [`XmlOptions::max_depth`](crate::XmlOptions)
//! - **I/O Errors**: Reading or writing failed
//!
//! ## Examples
//!
//! ```rust
//! use serde_xmldoc::from_str;
//!
//! let result = from_str("<root><open></root>");
//! assert!(result.is_err());
//!
//! if let Err(err) = result {
//!     assert!(err.is_parse());
//!     eprintln!("Parse error: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur while encoding or decoding XML documents.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed XML input
    #[error("XML parse error at byte {position}: {msg}")]
    Parse { position: u64, msg: String },

    /// The document to decode could not be found
    #[error("Source document {0} does not exist")]
    MissingSource(String),

    /// A key sanitized to an empty element or attribute name
    #[error("Invalid XML name: {0:?} contains no usable name characters")]
    InvalidName(String),

    /// A value shape with no defined encoding rule
    #[error("Unsupported shape: {0}")]
    UnsupportedShape(String),

    /// Nesting deeper than the configured limit
    #[error("Nesting depth exceeds the limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a parse error at the given byte offset of the input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::Error;
    ///
    /// let err = Error::parse(12, "unexpected end of input");
    /// assert!(err.to_string().contains("byte 12"));
    /// ```
    pub fn parse(position: u64, msg: &str) -> Self {
        Error::Parse {
            position,
            msg: msg.to_string(),
        }
    }

    /// Creates a missing-source error for a path that does not exist.
    pub fn missing_source(path: &str) -> Self {
        Error::MissingSource(path.to_string())
    }

    /// Creates an invalid-name error carrying the key as it was supplied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::Error;
    ///
    /// let err = Error::invalid_name("!!");
    /// assert!(err.is_invalid_name());
    /// ```
    pub fn invalid_name(name: &str) -> Self {
        Error::InvalidName(name.to_string())
    }

    /// Creates an unsupported-shape error.
    pub fn unsupported_shape(msg: &str) -> Self {
        Error::UnsupportedShape(msg.to_string())
    }

    pub fn depth_limit(limit: usize) -> Self {
        Error::DepthLimitExceeded { limit }
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for file reading/writing failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns `true` if the input XML was malformed.
    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Returns `true` if the source document was not found.
    #[must_use]
    pub const fn is_missing_source(&self) -> bool {
        matches!(self, Error::MissingSource(_))
    }

    /// Returns `true` if a key could not be turned into an XML name.
    #[must_use]
    pub const fn is_invalid_name(&self) -> bool {
        matches!(self, Error::InvalidName(_))
    }

    /// Returns `true` if the input data had a shape the encoder cannot express.
    #[must_use]
    pub const fn is_unsupported_shape(&self) -> bool {
        matches!(self, Error::UnsupportedShape(_))
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_are_distinct() {
        let parse = Error::parse(3, "bad");
        let missing = Error::missing_source("/nowhere.xml");
        let name = Error::invalid_name("");
        let shape = Error::unsupported_shape("list as @value");

        assert!(parse.is_parse() && !parse.is_missing_source());
        assert!(missing.is_missing_source() && !missing.is_parse());
        assert!(name.is_invalid_name() && !name.is_unsupported_shape());
        assert!(shape.is_unsupported_shape() && !shape.is_invalid_name());
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::missing_source("a.xml").to_string(),
            "Source document a.xml does not exist"
        );
        assert_eq!(
            Error::depth_limit(8).to_string(),
            "Nesting depth exceeds the limit of 8"
        );
    }
}
