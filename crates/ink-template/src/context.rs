//! Evaluation scopes and value semantics.
//!
//! Templates are evaluated against a `serde_json::Value`. Each `{{#each}}`
//! iteration pushes a child scope: record elements shadow the outer names,
//! other elements are only reachable as `.`.

use serde_json::Value;

/// A lookup scope with an optional parent.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Scope<'a> {
    value: &'a Value,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    /// Root scope over the whole render context.
    pub(crate) fn root(value: &'a Value) -> Self {
        Self {
            value,
            parent: None,
        }
    }

    /// Child scope for one iteration element.
    pub(crate) fn child(&'a self, item: &'a Value) -> Self {
        Self {
            value: item,
            parent: Some(self),
        }
    }

    /// Resolve a dotted path.
    ///
    /// `.` is the current iteration element and is unset at the root.
    /// Otherwise the first segment is looked up from the innermost scope
    /// outwards, and the remaining segments descend through mappings (or
    /// sequences, for numeric segments). Any missing segment yields `None`.
    pub(crate) fn lookup(&self, path: &str) -> Option<&'a Value> {
        if path == "." {
            return self.parent.map(|_| self.value);
        }
        if path.is_empty() {
            return None;
        }

        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.lookup_name(first)?;
        for segment in segments {
            current = descend(current, segment)?;
        }
        Some(current)
    }

    fn lookup_name(&self, name: &str) -> Option<&'a Value> {
        let mut scope = Some(self);
        while let Some(s) = scope {
            if let Value::Object(map) = s.value
                && let Some(value) = map.get(name)
            {
                return Some(value);
            }
            scope = s.parent;
        }
        None
    }
}

fn descend<'v>(value: &'v Value, segment: &str) -> Option<&'v Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Template truthiness.
///
/// `null`, `false`, `""`, `0`, empty sequences and empty mappings are falsy.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// String form of a value for substitution.
pub(crate) fn to_display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract().abs() < f64::EPSILON && f.abs() < 1e15 => {
                format!("{f:.0}")
            }
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(to_display).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}
