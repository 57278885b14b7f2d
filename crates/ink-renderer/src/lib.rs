//! Markdown rendering for Ink sites.
//!
//! [`Pipeline`] turns a markdown page body into HTML plus its heading list.
//! It runs the text-level extensions in [`directive`], renders with
//! [`MarkdownRenderer`] and finishes with [`autospace`].
//!
//! # Architecture
//!
//! The renderer uses a trait-based abstraction for markup decisions:
//! - [`HtmlBackend`]: anchored headings, wrapped tables, code blocks with a
//!   copy button and figures for images
//!
//! Shared functionality (lists, inline formatting, heading ids) is handled by
//! the generic renderer.
//!
//! # Example
//!
//! ```
//! use ink_renderer::{HtmlBackend, MarkdownRenderer};
//!
//! let result = MarkdownRenderer::<HtmlBackend>::new()
//!     .render_markdown("# Hello\n\n**Bold** text");
//! assert_eq!(result.headings[0].id, "hello");
//! ```

mod autospace;
mod backend;
pub mod directive;
mod html;
mod locale;
mod pipeline;
mod renderer;
mod slug;
mod state;
mod util;

pub use autospace::autospace;
pub use backend::RenderBackend;
pub use html::HtmlBackend;
pub use locale::Locale;
pub use pipeline::{Pipeline, RenderedPage};
pub use renderer::{MarkdownRenderer, RenderResult};
pub use slug::{slugify, strip_tags};
pub use state::{Heading, escape_html};
