//! Logic-enabled HTML templates for Ink.
//!
//! A small directive language evaluated over a `serde_json::Value` context:
//!
//! | Syntax | Meaning |
//! |--------|---------|
//! | `{{path}}` | HTML-escaped substitution |
//! | `{{{path}}}` | raw substitution |
//! | `{{#each path}}...{{/each}}` | iteration; `{{.}}` is the current element |
//! | `{{#if path}}...{{else}}...{{/if}}` | conditional (`{{#else}}` also accepted) |
//! | `{{#unless path}}...{{/unless}}` | negated conditional |
//!
//! Paths are dotted (`page.title`, `items.0`). A missing path renders as the
//! empty string and is falsy, as does `{{.}}` outside an `each`. A tag whose
//! content is not a path, such as `{{ 1 + 2 }}`, is left as literal text. Rendering never fails: block tags that do not
//! balance are emitted as literal text.
//!
//! # Example
//!
//! ```
//! use ink_template::Template;
//! use serde_json::json;
//!
//! let template = Template::parse("{{#each items}}[{{.}}]{{/each}}");
//! assert_eq!(template.render(&json!({"items": [1, 2, 3]})), "[1][2][3]");
//! ```

mod ast;
mod context;
mod evaluator;
mod lexer;
mod parser;

use serde_json::Value;

use ast::Node;
use context::Scope;

/// A parsed template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Template {
    nodes: Vec<Node>,
}

impl Template {
    /// Parse template source. Never fails.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        Self {
            nodes: parser::parse(source),
        }
    }

    /// Render against a context value.
    #[must_use]
    pub fn render(&self, context: &Value) -> String {
        let mut out = String::new();
        evaluator::evaluate(&self.nodes, &Scope::root(context), &mut out);
        out
    }
}

/// Parse and render in one step.
#[must_use]
pub fn render(source: &str, context: &Value) -> String {
    Template::parse(source).render(context)
}
