//! Text-level markdown extensions.
//!
//! These passes run on markdown source before it reaches the parser:
//!
//! - [`protect_fences`]: hides fenced code blocks behind placeholders
//! - [`expand_containers`]: `::: kind[title]` ... `:::` blocks
//! - [`expand_components`]: `{% name attrs %}` components
//!
//! Expanded blocks become HTML islands with their bodies separated by blank
//! lines, so the markdown inside them is still rendered by the parser.

mod args;
mod component;
mod container;
mod fence;

pub use args::ComponentArgs;
pub use component::{IdGenerator, expand_components};
pub use container::{ContainerKind, expand_containers};
pub use fence::{ProtectedCode, protect_fences};
