//! Template AST types.

/// A node in the template AST.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Node {
    /// Literal text to be output as-is.
    Text(String),

    /// Substitution: `{{path}}` when `escape` is set, `{{{path}}}` otherwise.
    Var { path: String, escape: bool },

    /// Iteration: `{{#each path}}...{{/each}}`
    Each { path: String, body: Vec<Node> },

    /// Conditional: `{{#if path}}...{{else}}...{{/if}}`
    If {
        path: String,
        then: Vec<Node>,
        otherwise: Vec<Node>,
    },

    /// Negated conditional: `{{#unless path}}...{{/unless}}`
    Unless { path: String, body: Vec<Node> },
}
