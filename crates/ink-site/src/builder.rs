//! Site assembly.
//!
//! [`SiteBuilder`] turns collected pages into finished HTML: every page body
//! goes through the markdown [`Pipeline`], then into the page (or hero)
//! template, then into the layout template together with the sidebar and nav.

use std::borrow::Cow;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use ink_config::{Config, Footer, NavItem};
use ink_renderer::{Heading, Locale, Pipeline};
use serde::Serialize;
use serde_json::{Value, json};

use crate::assets::{copy_static_files, copy_theme_assets};
use crate::collector::collect_pages;
use crate::error::BuildError;
use crate::frontmatter::{FrontMatterParser, Frontmatter, YamlFrontMatter};
use crate::icons::{feature_icon, nav_icon};
use crate::navigation::{Sidebar, neighbors};
use crate::output::{BuiltSite, OutputFile, check_output_dir, clean_output_dir};
use crate::page::{Page, PageRef};
use crate::search::build_search_index;
use crate::templates::Templates;

/// Heading levels listed in the page table of contents.
const TOC_LEVELS: std::ops::RangeInclusive<u8> = 2..=3;

/// Builds a site from a [`Config`].
///
/// # Example
///
/// ```no_run
/// use ink_config::Config;
/// use ink_site::SiteBuilder;
///
/// let config = Config::load(None, None)?;
/// let site = SiteBuilder::new(&config).build()?;
/// site.write_to(&config.paths.output_dir)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SiteBuilder<'a> {
    config: &'a Config,
    parser: &'a dyn FrontMatterParser,
    templates: Option<Templates>,
}

impl<'a> SiteBuilder<'a> {
    /// Builder with YAML front matter and templates from the theme directory.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            parser: &YamlFrontMatter,
            templates: None,
        }
    }

    /// Use a different front matter parser.
    #[must_use]
    pub fn with_parser(mut self, parser: &'a dyn FrontMatterParser) -> Self {
        self.parser = parser;
        self
    }

    /// Use the given templates instead of loading them from the theme.
    #[must_use]
    pub fn with_templates(mut self, templates: Templates) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Collect, render and assemble every page.
    ///
    /// Nothing is written to disk; see [`BuiltSite::write_to`].
    ///
    /// # Errors
    ///
    /// Returns a [`BuildError`] if the source directory or a required template
    /// is missing, a source file cannot be read or has malformed front matter,
    /// or a template context cannot be serialized.
    pub fn build(&self) -> Result<BuiltSite, BuildError> {
        let paths = &self.config.paths;
        tracing::info!(source = %paths.source_dir.display(), "Building site");

        let pages = collect_pages(&paths.source_dir, self.parser)?;
        let templates = match &self.templates {
            Some(templates) => Cow::Borrowed(templates),
            None => Cow::Owned(Templates::load(&paths.templates_dir())?),
        };

        let base = self.config.base();
        let assembler = Assembler {
            config: self.config,
            config_value: serde_json::to_value(self.config)?,
            base,
            templates: &templates,
            pages: &pages,
            sidebar: Sidebar::build(&self.config.theme_config.sidebar, &pages, base),
            nav: process_nav(&self.config.theme_config.nav),
        };

        let mut pipeline = Pipeline::new(base, Locale::from_language(&self.config.language));
        let mut outputs = Vec::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            let html = assembler.render_page(index, &mut pipeline)?;
            outputs.push(OutputFile {
                path: page.out_path.clone(),
                html,
            });
        }

        let not_found = assembler.render_not_found()?;
        let search_index = build_search_index(&pages, base);

        tracing::info!(
            pages = outputs.len(),
            not_found = not_found.is_some(),
            "Assembled site"
        );

        Ok(BuiltSite {
            pages: outputs,
            not_found,
            search_index,
        })
    }
}

/// Counts reported by [`build_site`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub pages: usize,
    /// Theme assets and static files copied.
    pub assets: usize,
}

/// Build the site and write it to the configured output directory.
///
/// The output directory is removed first, then pages, the 404 page and the
/// search index are written and static assets are copied.
///
/// # Errors
///
/// Returns `BuildError::OutputContainsSource` if clearing the output directory
/// would delete the sources or the theme, and any error from [`SiteBuilder::build`] or
/// from writing files.
pub fn build_site(config: &Config) -> Result<BuildStats, BuildError> {
    let paths = &config.paths;
    check_output_dir(paths)?;

    let site = SiteBuilder::new(config).build()?;
    clean_output_dir(&paths.output_dir)?;
    site.write_to(&paths.output_dir)?;

    let assets = copy_theme_assets(&paths.theme_dir, &paths.output_dir)?
        + copy_static_files(&paths.source_dir, &paths.output_dir)?;
    tracing::info!(output = %paths.output_dir.display(), assets, "Wrote site");

    Ok(BuildStats {
        pages: site.pages.len(),
        assets,
    })
}

/// Shared, read-only state for rendering every page of one build.
struct Assembler<'a> {
    config: &'a Config,
    config_value: Value,
    base: &'a str,
    templates: &'a Templates,
    pages: &'a [Page],
    sidebar: Sidebar,
    nav: Vec<NavItem>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LayoutContext<'a> {
    title: String,
    description: &'a str,
    language: &'a str,
    base: &'a str,
    config: &'a Value,
    sidebar: Value,
    nav: &'a [NavItem],
    has_nav: bool,
    search: bool,
    dark_mode: bool,
    body: String,
    current_slug: &'a str,
    is_hero: bool,
    footer: &'a Footer,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageContext<'a> {
    content: &'a str,
    toc: Vec<&'a Heading>,
    has_toc: bool,
    prev: Option<PageRef>,
    next: Option<PageRef>,
    has_prev: bool,
    has_next: bool,
    base: &'a str,
    last_updated: String,
    edit_url: String,
    frontmatter: &'a Frontmatter,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HeroContext<'a> {
    hero: Value,
    has_actions: bool,
    has_features: bool,
    content: &'a str,
    base: &'a str,
}

impl Assembler<'_> {
    fn render_page(&self, index: usize, pipeline: &mut Pipeline) -> Result<String, BuildError> {
        let page = &self.pages[index];
        let theme = &self.config.theme_config;
        let rendered = pipeline.render(&page.content);
        let is_hero = page.is_hero();

        let body = match (&self.templates.hero, page.frontmatter.hero()) {
            (Some(hero_template), Some(hero)) if is_hero => {
                let hero = resolve_hero(hero, self.base);
                let context = HeroContext {
                    has_actions: non_empty_array(&hero, "actions"),
                    has_features: non_empty_array(&hero, "features"),
                    hero,
                    content: &rendered.html,
                    base: self.base,
                };
                hero_template.render(&serde_json::to_value(context)?)
            }
            _ => {
                let toc: Vec<&Heading> = rendered
                    .headings
                    .iter()
                    .filter(|heading| TOC_LEVELS.contains(&heading.level))
                    .collect();
                let (prev, next) = neighbors(self.pages, index, self.base);
                let context = PageContext {
                    content: &rendered.html,
                    has_toc: !toc.is_empty(),
                    toc,
                    has_prev: prev.is_some(),
                    has_next: next.is_some(),
                    prev,
                    next,
                    base: self.base,
                    last_updated: if theme.last_updated {
                        last_updated(&page.source_path)
                    } else {
                        String::new()
                    },
                    edit_url: if theme.edit_link.is_empty() {
                        String::new()
                    } else {
                        format!("{}{}", theme.edit_link, page.rel_path)
                    },
                    frontmatter: &page.frontmatter,
                };
                self.templates.page.render(&serde_json::to_value(context)?)
            }
        };

        let title = if is_hero {
            self.config.title.clone()
        } else {
            format!("{} | {}", page.title(&self.config.title), self.config.title)
        };

        tracing::debug!(slug = %page.slug, hero = is_hero, "Rendered page");

        self.layout(LayoutContext {
            title,
            description: page
                .frontmatter
                .description()
                .unwrap_or(&self.config.description),
            sidebar: self.sidebar.to_value(&page.slug)?,
            search: theme.search,
            body,
            current_slug: &page.slug,
            is_hero,
            ..self.layout_defaults()
        })
    }

    fn render_not_found(&self) -> Result<Option<String>, BuildError> {
        let Some(template) = &self.templates.not_found else {
            return Ok(None);
        };
        let body = template.render(&json!({ "base": self.base }));

        self.layout(LayoutContext {
            title: format!("404 | {}", self.config.title),
            description: "Page not found",
            body,
            current_slug: "404",
            ..self.layout_defaults()
        })
        .map(Some)
    }

    /// Layout context shared by every page; the 404 page uses it with an empty
    /// sidebar and search disabled.
    fn layout_defaults(&self) -> LayoutContext<'_> {
        let theme = &self.config.theme_config;
        LayoutContext {
            title: String::new(),
            description: &self.config.description,
            language: &self.config.language,
            base: self.base,
            config: &self.config_value,
            sidebar: Value::Array(Vec::new()),
            nav: &self.nav,
            has_nav: !self.nav.is_empty(),
            search: false,
            dark_mode: theme.dark_mode,
            body: String::new(),
            current_slug: "",
            is_hero: false,
            footer: &theme.footer,
        }
    }

    fn layout(&self, context: LayoutContext<'_>) -> Result<String, BuildError> {
        Ok(self.templates.layout.render(&serde_json::to_value(context)?))
    }
}

/// Nav items with brand icons filled in for known hosts.
fn process_nav(nav: &[NavItem]) -> Vec<NavItem> {
    nav.iter()
        .map(|item| NavItem {
            icon: item
                .icon
                .clone()
                .or_else(|| nav_icon(&item.link).map(str::to_owned)),
            ..item.clone()
        })
        .collect()
}

/// Prefix relative action links with the base path and resolve feature icons.
fn resolve_hero(hero: &Value, base: &str) -> Value {
    let mut hero = hero.clone();

    if let Some(actions) = hero.get_mut("actions").and_then(Value::as_array_mut) {
        for action in actions {
            if let Some(link) = action.get_mut("link")
                && let Some(target) = link.as_str()
                && !target.starts_with("http")
            {
                *link = Value::String(format!("{base}{target}"));
            }
        }
    }

    if let Some(features) = hero.get_mut("features").and_then(Value::as_array_mut) {
        for feature in features {
            if let Some(icon) = feature.get_mut("icon")
                && let Some(name) = icon.as_str()
            {
                *icon = Value::String(feature_icon(name).to_owned());
            }
        }
    }

    hero
}

fn non_empty_array(value: &Value, key: &str) -> bool {
    value
        .get(key)
        .and_then(Value::as_array)
        .is_some_and(|items| !items.is_empty())
}

/// Modification date of `path` as `YYYY-MM-DD` (UTC), or empty on error.
fn last_updated(path: &Path) -> String {
    match fs::metadata(path).and_then(|meta| meta.modified()) {
        Ok(modified) => DateTime::<Utc>::from(modified)
            .format("%Y-%m-%d")
            .to_string(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to read modification time");
            String::new()
        }
    }
}
