//! Colored terminal output for command status lines.

use std::fmt::Display;

use console::{Style, Term};

/// Status printer on stderr.
pub(crate) struct Output {
    term: Term,
    title: Style,
    label: Style,
    done: Style,
    failed: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            done: Style::new().green(),
            failed: Style::new().red(),
        }
    }

    /// Command banner, e.g. `Building Ink Docs`.
    pub(crate) fn banner(&self, msg: &str) {
        self.line(&self.title.apply_to(msg).to_string());
    }

    /// A `Label: value` line with the label dimmed.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        self.line(&format!("{} {value}", self.label.apply_to(format!("{label}:"))));
    }

    /// Plain status line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Completion line (green).
    pub(crate) fn success(&self, msg: &str) {
        self.line(&self.done.apply_to(msg).to_string());
    }

    /// Error line (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(&self.failed.apply_to(msg).to_string());
    }

    fn line(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}
