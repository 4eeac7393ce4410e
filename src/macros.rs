/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Map keys must be string literals. Any other Rust expression is converted
/// through [`to_value`](crate::to_value); negative numbers inside lists and
/// maps need parentheses.
///
/// ```rust
/// use serde_xmldoc::{xml, Value};
///
/// let value = xml!({
///     "@attributes": {"id": 1},
///     "tags": ["a", "b"],
///     "offset": (-3),
///     "note": null
/// });
/// assert!(value.is_map());
/// assert_eq!(xml!([]), Value::List(vec![]));
/// ```
#[macro_export]
macro_rules! xml {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::List(vec![$($crate::xml!($elem)),*])
    };

    ({}) => {
        $crate::Value::Map($crate::XmlMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::XmlMap::new();
        $(
            map.insert($key.to_string(), $crate::xml!($value));
        )*
        $crate::Value::Map(map)
    }};

    // Fallback for any serializable expression
    ($s:expr) => {{
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    }};
}
