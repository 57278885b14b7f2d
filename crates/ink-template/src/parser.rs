//! Balanced-block parser.
//!
//! Parsing runs in two passes over the token stream. The first pass pairs every
//! block opener with its terminator using a depth stack, so an inner
//! `{{#each}}` never closes against the outer block's `{{/each}}`. The second
//! pass builds the tree from the pairing. Tags left unpaired (an opener with no
//! terminator, a stray terminator, an `{{else}}` outside an `{{#if}}`) are
//! emitted as literal text.

use std::ops::Range;

use crate::ast::Node;
use crate::lexer::{BlockKind, Token, tokenize};

/// What a token turned into after pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Role {
    /// Text or substitution.
    Plain,
    /// Block tag that failed to pair; emitted as its source text.
    Literal,
    /// Opener paired with its terminator and optional `else`.
    Block { close: usize, else_at: Option<usize> },
    /// Terminator or `else` owned by a paired opener.
    Consumed,
}

/// An opener waiting for its terminator.
struct Pending {
    index: usize,
    kind: BlockKind,
    else_at: Option<usize>,
}

/// Parse a template into its node tree. Never fails.
pub(crate) fn parse(source: &str) -> Vec<Node> {
    let tokens = tokenize(source);
    let roles = pair_blocks(&tokens);
    build(&tokens, &roles, 0..tokens.len())
}

fn pair_blocks(tokens: &[Token<'_>]) -> Vec<Role> {
    let mut roles: Vec<Role> = tokens
        .iter()
        .map(|token| match token {
            Token::Text(_) | Token::Var { .. } => Role::Plain,
            _ => Role::Literal,
        })
        .collect();
    let mut stack: Vec<Pending> = Vec::new();

    for (index, token) in tokens.iter().enumerate() {
        match *token {
            Token::Open { kind, .. } => stack.push(Pending {
                index,
                kind,
                else_at: None,
            }),
            Token::Else { .. } => {
                if let Some(top) = stack.last_mut()
                    && top.kind == BlockKind::If
                    && top.else_at.is_none()
                {
                    top.else_at = Some(index);
                }
            }
            Token::Close { kind, .. } => {
                let Some(depth) = stack.iter().rposition(|pending| pending.kind == kind) else {
                    continue;
                };
                // Openers above the match never closed; they stay literal.
                stack.truncate(depth + 1);
                if let Some(open) = stack.pop() {
                    roles[open.index] = Role::Block {
                        close: index,
                        else_at: open.else_at,
                    };
                    roles[index] = Role::Consumed;
                    if let Some(else_at) = open.else_at {
                        roles[else_at] = Role::Consumed;
                    }
                }
            }
            Token::Text(_) | Token::Var { .. } => {}
        }
    }

    let unbalanced = roles.iter().filter(|role| **role == Role::Literal).count();
    if unbalanced > 0 {
        tracing::debug!(unbalanced, "Unbalanced template tags emitted as text");
    }
    roles
}

fn build(tokens: &[Token<'_>], roles: &[Role], range: Range<usize>) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut i = range.start;

    while i < range.end {
        match (tokens[i], roles[i]) {
            (Token::Var { path, raw, .. }, _) => nodes.push(Node::Var {
                path: path.to_owned(),
                escape: !raw,
            }),
            (Token::Open { kind, path, .. }, Role::Block { close, else_at }) => {
                let body = build(tokens, roles, i + 1..else_at.unwrap_or(close));
                let path = path.to_owned();
                nodes.push(match kind {
                    BlockKind::Each => Node::Each { path, body },
                    BlockKind::Unless => Node::Unless { path, body },
                    BlockKind::If => Node::If {
                        path,
                        then: body,
                        otherwise: else_at
                            .map(|at| build(tokens, roles, at + 1..close))
                            .unwrap_or_default(),
                    },
                });
                i = close + 1;
                continue;
            }
            (token, _) => push_text(&mut nodes, token.source()),
        }
        i += 1;
    }

    nodes
}

/// Append text, merging with a preceding text node.
fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_owned()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(s: &str) -> Node {
        Node::Text(s.to_owned())
    }

    fn var(path: &str) -> Node {
        Node::Var {
            path: path.to_owned(),
            escape: true,
        }
    }

    #[test]
    fn test_parse_if_else() {
        assert_eq!(
            parse("{{#if a}}X{{else}}Y{{/if}}"),
            vec![Node::If {
                path: "a".to_owned(),
                then: vec![text("X")],
                otherwise: vec![text("Y")],
            }]
        );
    }

    #[test]
    fn test_nested_each_closes_against_matching_terminator() {
        assert_eq!(
            parse("{{#each a}}<{{#each b}}{{x}}{{/each}}>{{/each}}!"),
            vec![
                Node::Each {
                    path: "a".to_owned(),
                    body: vec![
                        text("<"),
                        Node::Each {
                            path: "b".to_owned(),
                            body: vec![var("x")],
                        },
                        text(">"),
                    ],
                },
                text("!"),
            ]
        );
    }

    #[test]
    fn test_unclosed_opener_is_literal() {
        assert_eq!(
            parse("a{{#if x}}b{{y}}"),
            vec![text("a{{#if x}}b"), var("y")]
        );
    }

    #[test]
    fn test_stray_terminator_is_literal() {
        assert_eq!(parse("a{{/each}}b"), vec![text("a{{/each}}b")]);
    }

    #[test]
    fn test_unmatched_inner_opener_inside_block() {
        assert_eq!(
            parse("{{#each a}}{{#if b}}x{{/each}}"),
            vec![Node::Each {
                path: "a".to_owned(),
                body: vec![text("{{#if b}}x")],
            }]
        );
    }

    #[test]
    fn test_else_only_belongs_to_if() {
        assert_eq!(
            parse("{{#unless a}}x{{else}}y{{/unless}}"),
            vec![Node::Unless {
                path: "a".to_owned(),
                body: vec![text("x{{else}}y")],
            }]
        );
    }

    #[test]
    fn test_second_else_is_literal() {
        assert_eq!(
            parse("{{#if a}}1{{else}}2{{else}}3{{/if}}"),
            vec![Node::If {
                path: "a".to_owned(),
                then: vec![text("1")],
                otherwise: vec![text("2{{else}}3")],
            }]
        );
    }
}
