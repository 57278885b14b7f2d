//! Site assembly for Ink.
//!
//! This crate turns a directory of markdown files into a static site:
//! - [`collect_pages`]: ordered page collection with front matter
//! - [`Sidebar`] and [`neighbors`]: sidebar tree and prev/next links
//! - [`SiteBuilder`]: page rendering through the theme templates
//! - [`build_search_index`]: client-side search records
//! - [`build_site`]: the full build, written to disk
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use ink_config::Config;
//!
//! let config = Config::load(None, None)?;
//! let stats = ink_site::build_site(&config)?;
//! println!("{} pages", stats.pages);
//! # Ok(())
//! # }
//! ```

mod assets;
mod builder;
mod collector;
mod error;
mod frontmatter;
mod icons;
mod navigation;
mod output;
mod page;
mod search;
mod templates;

pub use assets::{STATIC_EXTENSIONS, copy_static_files, copy_theme_assets};
pub use builder::{BuildStats, SiteBuilder, build_site};
pub use collector::collect_pages;
pub use error::BuildError;
pub use frontmatter::{DEFAULT_ORDER, FrontMatterError, FrontMatterParser, Frontmatter, YamlFrontMatter};
pub use icons::{feature_icon, nav_icon};
pub use navigation::{Sidebar, SidebarGroup, SidebarLink, SidebarNode, build_auto_sidebar, neighbors};
pub use output::{BuiltSite, NOT_FOUND_FILE, OutputFile, SEARCH_INDEX_FILE, check_output_dir, clean_output_dir};
pub use page::{Page, PageRef, extract_title, out_path_for, slug_for};
pub use search::{MAX_CONTENT_CHARS, SearchEntry, build_search_index, search_text};
pub use templates::Templates;
