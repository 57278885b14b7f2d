//! Sidebar and prev/next navigation.
//!
//! In automatic mode the sidebar is derived from page slugs:
//!
//! - single-segment slugs (`intro`, `guide`) become top-level links, sorted by
//!   their `order`
//! - deeper slugs (`guide/start`) are grouped by their first segment; groups
//!   appear in the order they are first seen and their items are sorted by
//!   `order`
//!
//! Both sorts are stable, so pages with equal `order` keep collection order.

use ink_config::SidebarConfig;
use serde::Serialize;
use serde_json::Value;

use crate::page::{Page, PageRef};

/// A sidebar link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarLink {
    pub text: String,
    pub link: String,
    pub slug: String,
    /// Set on the link of the page being rendered.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub active: bool,
}

/// A titled group of links sharing a first path segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    pub text: String,
    pub items: Vec<SidebarLink>,
    pub collapsed: bool,
}

/// A top-level sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarNode {
    Link(SidebarLink),
    Group(SidebarGroup),
}

/// The site sidebar.
#[derive(Clone, Debug, PartialEq)]
pub enum Sidebar {
    /// Derived from the page tree.
    Auto(Vec<SidebarNode>),
    /// User-supplied tree, passed to templates unchanged.
    Explicit(Value),
}

impl Sidebar {
    /// Build the sidebar for a configured mode.
    #[must_use]
    pub fn build(config: &SidebarConfig, pages: &[Page], base: &str) -> Self {
        match config {
            SidebarConfig::Auto => Self::Auto(build_auto_sidebar(pages, base)),
            SidebarConfig::Explicit(tree) => Self::Explicit(tree.clone()),
        }
    }

    /// Template value with the link for `current_slug` marked active.
    ///
    /// Explicit trees are returned as configured.
    pub fn to_value(&self, current_slug: &str) -> Result<Value, serde_json::Error> {
        match self {
            Self::Explicit(tree) => Ok(tree.clone()),
            Self::Auto(nodes) => {
                let mut nodes = nodes.clone();
                for link in nodes.iter_mut().flat_map(SidebarNode::links_mut) {
                    link.active = link.slug == current_slug;
                }
                serde_json::to_value(nodes)
            }
        }
    }
}

impl SidebarNode {
    fn links_mut(&mut self) -> std::slice::IterMut<'_, SidebarLink> {
        match self {
            Self::Link(link) => std::slice::from_mut(link).iter_mut(),
            Self::Group(group) => group.items.iter_mut(),
        }
    }
}

struct Entry {
    link: SidebarLink,
    order: f64,
}

/// Derive sidebar nodes from the collected pages.
#[must_use]
pub fn build_auto_sidebar(pages: &[Page], base: &str) -> Vec<SidebarNode> {
    let mut top_level: Vec<Entry> = Vec::new();
    let mut groups: Vec<(String, Vec<Entry>)> = Vec::new();

    for page in pages {
        let order = page.frontmatter.order();
        match page.slug.split_once('/') {
            None => top_level.push(Entry {
                link: sidebar_link(page, page.frontmatter.title().unwrap_or(&page.slug), base),
                order,
            }),
            Some((group, rest)) => {
                let entry = Entry {
                    link: sidebar_link(page, page.frontmatter.title().unwrap_or(rest), base),
                    order,
                };
                match groups.iter_mut().find(|(key, _)| key == group) {
                    Some((_, items)) => items.push(entry),
                    None => groups.push((group.to_owned(), vec![entry])),
                }
            }
        }
    }

    let mut nodes: Vec<SidebarNode> = sorted(top_level)
        .into_iter()
        .map(SidebarNode::Link)
        .collect();

    for (key, items) in groups {
        nodes.push(SidebarNode::Group(SidebarGroup {
            text: group_title(&key, pages),
            items: sorted(items),
            collapsed: false,
        }));
    }

    nodes
}

fn sidebar_link(page: &Page, text: &str, base: &str) -> SidebarLink {
    SidebarLink {
        text: text.to_owned(),
        link: page.link(base),
        slug: page.slug.clone(),
        active: false,
    }
}

fn sorted(mut entries: Vec<Entry>) -> Vec<SidebarLink> {
    entries.sort_by(|a, b| a.order.total_cmp(&b.order));
    entries.into_iter().map(|entry| entry.link).collect()
}

/// Group title: front matter title of the page whose slug is the group key,
/// else the key with its first letter upper-cased.
fn group_title(key: &str, pages: &[Page]) -> String {
    pages
        .iter()
        .find(|page| page.slug == key)
        .and_then(|page| page.frontmatter.title())
        .map_or_else(|| capitalize(key), str::to_owned)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Document-order neighbours of the page at `index`.
#[must_use]
pub fn neighbors(pages: &[Page], index: usize, base: &str) -> (Option<PageRef>, Option<PageRef>) {
    let prev = index
        .checked_sub(1)
        .and_then(|i| pages.get(i))
        .map(|page| page.to_ref(base));
    let next = pages.get(index + 1).map(|page| page.to_ref(base));
    (prev, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::Frontmatter;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page(rel_path: &str, fm: Value) -> Page {
        let map = fm.as_object().cloned().unwrap_or_default();
        Page::new(rel_path, rel_path, Frontmatter::from(map), "")
    }

    fn link(text: &str, slug: &str) -> SidebarLink {
        SidebarLink {
            text: text.to_owned(),
            link: format!("/docs/{slug}.html"),
            slug: slug.to_owned(),
            active: false,
        }
    }

    #[test]
    fn test_top_level_and_groups() {
        let pages = vec![
            page("a.md", json!({"order": 2})),
            page("b.md", json!({"order": 1})),
            page("g/x.md", json!({})),
            page("g/y.md", json!({})),
        ];

        assert_eq!(
            build_auto_sidebar(&pages, "/docs"),
            vec![
                SidebarNode::Link(link("b", "b")),
                SidebarNode::Link(link("a", "a")),
                SidebarNode::Group(SidebarGroup {
                    text: "G".to_owned(),
                    items: vec![link("x", "g/x"), link("y", "g/y")],
                    collapsed: false,
                }),
            ]
        );
    }

    #[test]
    fn test_group_items_sorted_by_order_stably() {
        let pages = vec![
            page("g/first.md", json!({})),
            page("g/second.md", json!({"order": 1})),
            page("g/third.md", json!({})),
        ];

        let nodes = build_auto_sidebar(&pages, "");
        let SidebarNode::Group(group) = &nodes[0] else {
            panic!("expected a group");
        };
        let slugs: Vec<&str> = group.items.iter().map(|l| l.slug.as_str()).collect();
        assert_eq!(slugs, vec!["g/second", "g/first", "g/third"]);
    }

    #[test]
    fn test_explicit_zero_order_sorts_first() {
        let pages = vec![page("a.md", json!({})), page("z.md", json!({"order": 0}))];
        let nodes = build_auto_sidebar(&pages, "");
        assert_eq!(nodes[0], SidebarNode::Link(SidebarLink {
            text: "z".to_owned(),
            link: "/z.html".to_owned(),
            slug: "z".to_owned(),
            active: false,
        }));
    }

    #[test]
    fn test_group_title_from_index_page() {
        let pages = vec![
            page("guide/index.md", json!({"title": "User Guide"})),
            page("guide/start.md", json!({"title": "Start"})),
            page("api/deep/ref.md", json!({})),
        ];

        let nodes = build_auto_sidebar(&pages, "");
        assert_eq!(nodes.len(), 3);
        assert!(matches!(&nodes[0], SidebarNode::Link(l) if l.text == "User Guide" && l.slug == "guide"));
        let SidebarNode::Group(guide) = &nodes[1] else {
            panic!("expected a group");
        };
        assert_eq!(guide.text, "User Guide");
        assert_eq!(guide.items[0].text, "Start");
        let SidebarNode::Group(api) = &nodes[2] else {
            panic!("expected a group");
        };
        assert_eq!(api.text, "Api");
        assert_eq!(api.items[0].text, "deep/ref");
    }

    #[test]
    fn test_to_value_marks_active() {
        let pages = vec![page("a.md", json!({})), page("g/x.md", json!({}))];
        let sidebar = Sidebar::build(&SidebarConfig::Auto, &pages, "");

        assert_eq!(
            sidebar.to_value("g/x").unwrap(),
            json!([
                {"text": "a", "link": "/a.html", "slug": "a"},
                {"text": "G", "collapsed": false, "items": [
                    {"text": "x", "link": "/g/x.html", "slug": "g/x", "active": true}
                ]}
            ])
        );
    }

    #[test]
    fn test_explicit_sidebar_passes_through() {
        let tree = json!([{"text": "Custom", "items": []}]);
        let sidebar = Sidebar::build(&SidebarConfig::Explicit(tree.clone()), &[], "");
        assert_eq!(sidebar.to_value("index").unwrap(), tree);
    }

    #[test]
    fn test_neighbors() {
        let pages = vec![page("index.md", json!({})), page("guide/start.md", json!({"title": "Start"}))];

        let (prev, next) = neighbors(&pages, 0, "");
        assert_eq!(prev, None);
        assert_eq!(next.map(|r| r.slug), Some("guide/start".to_owned()));

        let (prev, next) = neighbors(&pages, 1, "");
        assert_eq!(prev.map(|r| r.link), Some("/index.html".to_owned()));
        assert_eq!(next, None);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("guide"), "Guide");
        assert_eq!(capitalize("指南"), "指南");
        assert_eq!(capitalize(""), "");
    }
}
