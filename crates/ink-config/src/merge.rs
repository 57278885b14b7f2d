//! Deep merge of user configuration over the built-in defaults.
//!
//! The merge is intentionally asymmetric:
//! - a key recurses only when *both* sides hold a mapping at that key
//! - anything else (scalars, arrays, `null`, mapping-over-scalar) replaces outright
//!
//! Arrays are never concatenated. A user `nav` list fully replaces the default.

use serde_json::{Map, Value};

/// Merge `source` over `target`, returning the merged value.
///
/// Keys present only in `target` are kept as-is. When `target` is not a
/// mapping the result is `source` itself.
///
/// # Example
///
/// ```
/// use ink_config::deep_merge;
/// use serde_json::json;
///
/// let defaults = json!({"theme": {"search": true, "darkMode": true}, "nav": [1, 2]});
/// let user = json!({"theme": {"search": false}, "nav": [3]});
///
/// let merged = deep_merge(&defaults, &user);
/// assert_eq!(merged, json!({"theme": {"search": false, "darkMode": true}, "nav": [3]}));
/// ```
#[must_use]
pub fn deep_merge(target: &Value, source: &Value) -> Value {
    let (Value::Object(target_map), Value::Object(source_map)) = (target, source) else {
        return source.clone();
    };

    let mut out: Map<String, Value> = target_map.clone();
    for (key, value) in source_map {
        let merged = match (target_map.get(key), value) {
            (Some(existing @ Value::Object(_)), Value::Object(_)) => deep_merge(existing, value),
            _ => value.clone(),
        };
        out.insert(key.clone(), merged);
    }
    Value::Object(out)
}
