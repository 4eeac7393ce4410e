//! Normalization of arbitrary keys into XML element and attribute names.

use crate::{Error, Result};

/// Turns an arbitrary key into a usable XML name.
///
/// Every character outside `[A-Za-z0-9:.\-_]` is deleted. When the remaining
/// name starts with a digit, `-` or `.`, it is prefixed with `_`.
/// Sanitizing an already sanitized name returns it unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidName`] when no character survives.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::sanitize_name;
///
/// assert_eq!(sanitize_name("3abc").unwrap(), "_3abc");
/// assert_eq!(sanitize_name("a b!c").unwrap(), "abc");
/// assert_eq!(sanitize_name("xlink:href").unwrap(), "xlink:href");
/// assert!(sanitize_name("").is_err());
/// ```
pub fn sanitize_name(name: &str) -> Result<String> {
    let mut sanitized: String = name.chars().filter(|c| is_name_char(*c)).collect();

    match sanitized.chars().next() {
        None => return Err(Error::invalid_name(name)),
        Some(first) if first.is_ascii_digit() || first == '-' || first == '.' => {
            sanitized.insert(0, '_');
        }
        Some(_) => {}
    }

    Ok(sanitized)
}

#[inline]
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, ':' | '.' | '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_invalid_characters() {
        assert_eq!(sanitize_name("first name").unwrap(), "firstname");
        assert_eq!(sanitize_name("price($)").unwrap(), "price");
        assert_eq!(sanitize_name("héllo").unwrap(), "hllo");
    }

    #[test]
    fn test_prefixes_bad_first_character() {
        assert_eq!(sanitize_name("1st").unwrap(), "_1st");
        assert_eq!(sanitize_name("-dash").unwrap(), "_-dash");
        assert_eq!(sanitize_name(".dot").unwrap(), "_.dot");
        assert_eq!(sanitize_name("!9lives").unwrap(), "_9lives");
    }

    #[test]
    fn test_keeps_valid_names() {
        assert_eq!(sanitize_name("_private").unwrap(), "_private");
        assert_eq!(sanitize_name("ns:tag").unwrap(), "ns:tag");
        assert_eq!(sanitize_name("a.b-c_d").unwrap(), "a.b-c_d");
    }

    #[test]
    fn test_empty_result_is_error() {
        let err = sanitize_name("").unwrap_err();
        assert!(err.is_invalid_name());

        let err = sanitize_name("@#$ %").unwrap_err();
        assert!(matches!(err, Error::InvalidName(ref key) if key == "@#$ %"));
    }

    #[test]
    fn test_idempotent_on_samples() {
        for input in ["3abc", "a b!c", "-x", "..", "ok", "_1", "9"] {
            let once = sanitize_name(input).unwrap();
            assert_eq!(sanitize_name(&once).unwrap(), once);
        }
    }
}
