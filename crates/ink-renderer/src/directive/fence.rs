//! Fenced code block protection.
//!
//! Before container and component expansion, every backtick-fenced code block
//! is swapped for an opaque `<!--CODE_BLOCK_n-->` placeholder so the textual
//! rewrites never touch code. The blocks are restored byte-for-byte before the
//! text reaches the markdown parser.

use std::fmt::Write;

const PLACEHOLDER_PREFIX: &str = "<!--CODE_BLOCK_";
const PLACEHOLDER_SUFFIX: &str = "-->";

/// Code blocks removed from a document, indexed by placeholder number.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ProtectedCode {
    blocks: Vec<String>,
}

impl ProtectedCode {
    /// Number of protected blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no block was protected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Put the original blocks back in place of their placeholders.
    ///
    /// Placeholders with an unknown index are left as they are.
    #[must_use]
    pub fn restore(&self, text: &str) -> String {
        if self.blocks.is_empty() {
            return text.to_owned();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(PLACEHOLDER_PREFIX) {
            out.push_str(&rest[..start]);
            let after = &rest[start + PLACEHOLDER_PREFIX.len()..];
            let digits = after.bytes().take_while(u8::is_ascii_digit).count();
            let block = after[..digits]
                .parse::<usize>()
                .ok()
                .filter(|_| after[digits..].starts_with(PLACEHOLDER_SUFFIX))
                .and_then(|index| self.blocks.get(index));

            if let Some(block) = block {
                out.push_str(block);
                rest = &after[digits + PLACEHOLDER_SUFFIX.len()..];
            } else {
                out.push_str(PLACEHOLDER_PREFIX);
                rest = after;
            }
        }
        out.push_str(rest);
        out
    }
}

/// Replace fenced code blocks with placeholders.
///
/// A fence opens with three or more backticks at the start of a line and
/// closes at the first later line consisting of exactly the same backtick run
/// (trailing whitespace allowed). A fence that never closes is left in place.
#[must_use]
pub fn protect_fences(markdown: &str) -> (String, ProtectedCode) {
    let lines: Vec<&str> = markdown.split_inclusive('\n').collect();
    let mut protected = ProtectedCode::default();
    let mut out = String::with_capacity(markdown.len());
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];
        let closing = opening_fence(line).and_then(|fence| {
            lines[i + 1..]
                .iter()
                .position(|candidate| candidate.trim_end() == fence)
                .map(|offset| i + 1 + offset)
        });

        let Some(close) = closing else {
            out.push_str(line);
            i += 1;
            continue;
        };

        let block = lines[i..=close].concat();
        let (code, line_ending) = block.split_at(block.trim_end_matches(['\r', '\n']).len());
        let _ = write!(
            out,
            "{PLACEHOLDER_PREFIX}{}{PLACEHOLDER_SUFFIX}{line_ending}",
            protected.blocks.len()
        );
        protected.blocks.push(code.to_owned());
        i = close + 1;
    }

    (out, protected)
}

/// The backtick run opening a fence on this line, if any.
fn opening_fence(line: &str) -> Option<&str> {
    let run = line.bytes().take_while(|&b| b == b'`').count();
    (run >= 3).then(|| &line[..run])
}
