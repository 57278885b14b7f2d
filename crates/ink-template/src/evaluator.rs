//! Template evaluation.

use serde_json::Value;

use crate::ast::Node;
use crate::context::{Scope, is_truthy, to_display};

/// Evaluate nodes against a scope, appending to `out`.
pub(crate) fn evaluate(nodes: &[Node], scope: &Scope<'_>, out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Var { path, escape } => {
                let Some(value) = scope.lookup(path) else {
                    continue;
                };
                let text = to_display(value);
                if *escape {
                    out.push_str(&escape_html(&text));
                } else {
                    out.push_str(&text);
                }
            }
            Node::Each { path, body } => {
                if let Some(Value::Array(items)) = scope.lookup(path) {
                    for item in items {
                        evaluate(body, &scope.child(item), out);
                    }
                }
            }
            Node::If {
                path,
                then,
                otherwise,
            } => {
                if scope.lookup(path).is_some_and(is_truthy) {
                    evaluate(then, scope, out);
                } else {
                    evaluate(otherwise, scope, out);
                }
            }
            Node::Unless { path, body } => {
                if !scope.lookup(path).is_some_and(is_truthy) {
                    evaluate(body, scope, out);
                }
            }
        }
    }
}

/// Escape `&`, `<`, `>` and `"` for HTML text and attribute values.
fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            _ => result.push(c),
        }
    }
    result
}
