//! Dynamic value representation for document data.
//!
//! This module provides the [`Value`] enum, the data-side half of the codec:
//! anything the encoder can turn into an element tree, and anything
//! [`Element::to_value`](crate::Element::to_value) produces.
//!
//! ## Boxing
//!
//! XML text carries no types. [`Value::unbox`] renders a scalar as the text
//! stored in the document and [`Value::autobox`] recovers a typed scalar from
//! such text:
//!
//! ```rust
//! use serde_xmldoc::{Number, Value};
//!
//! assert_eq!(Value::autobox("3"), Value::Number(Number::Integer(3)));
//! assert_eq!(Value::autobox("3.14"), Value::Number(Number::Float(3.14)));
//! assert_eq!(Value::autobox("true"), Value::Bool(true));
//! assert_eq!(Value::autobox("null"), Value::Null);
//! assert_eq!(Value::autobox("abc"), Value::from("abc"));
//!
//! assert_eq!(Value::from(2.0).unbox().unwrap(), "2.0");
//! assert_eq!(Value::Null.unbox().unwrap(), "null");
//! ```
//!
//! Boxing is best effort: text that merely looks numeric (`"007"`) comes back
//! as a number. Only text produced by `unbox` is guaranteed to re-box to the
//! original scalar.

use crate::{Error, Result, XmlMap};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed document value: a scalar, an ordered list or an ordered map.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::{Number, Value};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_scalar());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Map(XmlMap),
}

/// A numeric scalar, either an integer or a floating-point number.
///
/// # Examples
///
/// ```rust
/// use serde_xmldoc::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// assert_eq!(float.to_string(), "3.5");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if possible.
    ///
    /// Floats convert only when they have no fractional part and fit in `i64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }
}

/// Writes the canonical text form: floats always carry a `.` so they re-box as floats.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) => {
                let text = fl.to_string();
                if fl.is_finite() && !text.contains('.') {
                    write!(f, "{}.0", text)
                } else {
                    f.write_str(&text)
                }
            }
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Recovers a typed scalar from document text.
    ///
    /// Text made of an optional leading `-`, ASCII digits and at most one `.`
    /// is numeric: a `.` selects [`Number::Float`], otherwise
    /// [`Number::Integer`] (falling back to a float beyond the `i64` range).
    /// `"true"`/`"false"` become booleans and `"null"` becomes [`Value::Null`].
    /// Everything else, including exponents, `+` signs and surrounding
    /// whitespace, stays a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::{Number, Value};
    ///
    /// assert_eq!(Value::autobox("-12"), Value::Number(Number::Integer(-12)));
    /// assert_eq!(Value::autobox("007"), Value::Number(Number::Integer(7)));
    /// assert_eq!(Value::autobox("1e3"), Value::from("1e3"));
    /// assert_eq!(Value::autobox("1.2.3"), Value::from("1.2.3"));
    /// ```
    #[must_use]
    pub fn autobox(text: &str) -> Value {
        if let Some(number) = parse_numeric(text) {
            return Value::Number(number);
        }

        match text {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            "null" => Value::Null,
            _ => Value::String(text.to_string()),
        }
    }

    /// Renders a scalar as document text.
    ///
    /// # Errors
    ///
    /// Lists and maps have no text form and return
    /// [`Error::UnsupportedShape`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_xmldoc::Value;
    ///
    /// assert_eq!(Value::Bool(false).unbox().unwrap(), "false");
    /// assert_eq!(Value::from(7).unbox().unwrap(), "7");
    /// assert!(Value::List(vec![]).unbox().is_err());
    /// ```
    pub fn unbox(&self) -> Result<String> {
        match self {
            Value::Null => Ok("null".to_string()),
            Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::String(s) => Ok(s.clone()),
            Value::List(_) => Err(Error::unsupported_shape("a list has no text form")),
            Value::Map(_) => Err(Error::unsupported_shape("a map has no text form")),
        }
    }

    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is a list.
    #[inline]
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns `true` if the value is a map.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` for null, boolean, number and string values.
    #[inline]
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Value::List(_) | Value::Map(_))
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// If the value is a list, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&Vec<Value>> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    /// If the value is a map, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&XmlMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }
}

/// Optional `-`, then ASCII digits with at most one `.` and at least one digit.
fn parse_numeric(text: &str) -> Option<Number> {
    let body = text.strip_prefix('-').unwrap_or(text);

    let mut digits = 0;
    let mut dots = 0;
    for byte in body.bytes() {
        match byte {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return None,
        }
    }

    if digits == 0 || dots > 1 {
        return None;
    }

    if dots == 1 {
        text.parse::<f64>().ok().map(Number::Float)
    } else {
        text.parse::<i64>()
            .map(Number::Integer)
            .or_else(|_| text.parse::<f64>().map(Number::Float))
            .ok()
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(list) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(list.len()))?;
                for element in list {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Map(map) => {
                use serde::ser::SerializeMap;
                let mut state = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map.iter() {
                    state.serialize_entry(k, v)?;
                }
                state.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a scalar, a list or a map")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Number(Number::Integer(value as i64)))
                } else {
                    Ok(Value::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> std::result::Result<Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::List(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = XmlMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Map(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .ok_or_else(|| Error::custom(format!("cannot convert {} to i64", n))),
            _ => Err(Error::custom(format!("expected integer, found {:?}", value))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(Error::custom(format!("expected number, found {:?}", value))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(Error::custom(format!("expected bool, found {:?}", value))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(Error::custom(format!("expected string, found {:?}", value))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::List(value)
    }
}

impl From<XmlMap> for Value {
    fn from(value: XmlMap) -> Self {
        Value::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_as_i64_bounds() {
        assert_eq!(Number::Float(9_223_372_036_854_775_808.0).as_i64(), None);
        assert_eq!(Number::Float(-9_223_372_036_854_775_808.0).as_i64(), Some(i64::MIN));
        assert_eq!(Number::Float(4.0).as_i64(), Some(4));
        assert_eq!(Number::Float(4.5).as_i64(), None);
    }

    #[test]
    fn test_autobox_numbers() {
        assert_eq!(Value::autobox("3"), Value::Number(Number::Integer(3)));
        assert_eq!(Value::autobox("2.75"), Value::Number(Number::Float(2.75)));
        assert_eq!(Value::autobox("-0.5"), Value::Number(Number::Float(-0.5)));
        assert_eq!(Value::autobox(".5"), Value::Number(Number::Float(0.5)));
        assert_eq!(Value::autobox("5."), Value::Number(Number::Float(5.0)));
    }

    #[test]
    fn test_autobox_integer_overflow_falls_back_to_float() {
        let boxed = Value::autobox("99999999999999999999");
        assert!(matches!(boxed, Value::Number(Number::Float(_))));
    }

    #[test]
    fn test_autobox_non_numeric() {
        assert_eq!(Value::autobox(""), Value::from(""));
        assert_eq!(Value::autobox("-"), Value::from("-"));
        assert_eq!(Value::autobox("."), Value::from("."));
        assert_eq!(Value::autobox("+5"), Value::from("+5"));
        assert_eq!(Value::autobox(" 5"), Value::from(" 5"));
        assert_eq!(Value::autobox("1,5"), Value::from("1,5"));
        assert_eq!(Value::autobox("True"), Value::from("True"));
    }

    #[test]
    fn test_autobox_keywords() {
        assert_eq!(Value::autobox("true"), Value::Bool(true));
        assert_eq!(Value::autobox("false"), Value::Bool(false));
        assert_eq!(Value::autobox("null"), Value::Null);
    }

    #[test]
    fn test_unbox_scalars() {
        assert_eq!(Value::Null.unbox().unwrap(), "null");
        assert_eq!(Value::Bool(true).unbox().unwrap(), "true");
        assert_eq!(Value::from(-42).unbox().unwrap(), "-42");
        assert_eq!(Value::from(1.5).unbox().unwrap(), "1.5");
        assert_eq!(Value::from(3.0).unbox().unwrap(), "3.0");
        assert_eq!(Value::from("text").unbox().unwrap(), "text");
    }

    #[test]
    fn test_unbox_containers_fail() {
        assert!(Value::List(vec![Value::from(1)])
            .unbox()
            .unwrap_err()
            .is_unsupported_shape());
        assert!(Value::Map(XmlMap::new())
            .unbox()
            .unwrap_err()
            .is_unsupported_shape());
    }

    #[test]
    fn test_unbox_then_autobox_restores_scalars() {
        let scalars = vec![
            Value::Null,
            Value::Bool(false),
            Value::from(0),
            Value::from(i64::MIN),
            Value::from(0.1),
            Value::from(-2.0),
            Value::from(1e21),
            Value::from("plain"),
        ];

        for scalar in scalars {
            let text = scalar.unbox().unwrap();
            assert_eq!(Value::autobox(&text), scalar, "text was {:?}", text);
        }
    }

    #[test]
    fn test_tryfrom_conversions() {
        assert_eq!(i64::try_from(Value::from(42)).unwrap(), 42);
        assert_eq!(i64::try_from(Value::from(42.0)).unwrap(), 42);
        assert!(i64::try_from(Value::from(42.5)).is_err());
        assert_eq!(f64::try_from(Value::from(2)).unwrap(), 2.0);
        assert!(bool::try_from(Value::from(1)).is_err());
        assert_eq!(String::try_from(Value::from("x")).unwrap(), "x");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::from("a"));
    }

    #[test]
    fn test_scalar_classification() {
        assert!(Value::Null.is_scalar());
        assert!(Value::from("a").is_scalar());
        assert!(!Value::List(vec![]).is_scalar());
        assert!(!Value::Map(XmlMap::new()).is_scalar());
    }
}
