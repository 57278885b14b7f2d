use std::fs;
use std::path::Path;

use ink_config::Config;
use ink_site::build_site;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::tempdir;

const LAYOUT: &str = r#"<!DOCTYPE html>
<html lang="{{language}}">
<head><title>{{title}}</title></head>
<body>
<nav>{{#each sidebar}}{{#if items}}<section data-group="{{text}}">{{#each items}}<a href="{{link}}">{{text}}</a>{{/each}}</section>{{else}}<a class="top" href="{{link}}">{{text}}</a>{{/if}}{{/each}}</nav>
<main>{{{body}}}</main>
</body>
</html>
"#;

const PAGE: &str = r#"<article>{{{content}}}</article>
{{#if hasPrev}}<a class="prev" href="{{prev.link}}">{{prev.title}}</a>{{/if}}
{{#if hasNext}}<a class="next" href="{{next.link}}">{{next.title}}</a>{{/if}}
"#;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn files_under(root: &Path, rel: &str, out: &mut Vec<String>) {
    for entry in fs::read_dir(root.join(rel)).unwrap() {
        let entry = entry.unwrap();
        let name = entry.file_name().to_string_lossy().into_owned();
        let child = if rel.is_empty() {
            name
        } else {
            format!("{rel}/{name}")
        };
        if entry.file_type().unwrap().is_dir() {
            files_under(root, &child, out);
        } else {
            out.push(child);
        }
    }
}

#[test]
fn test_two_page_project() {
    let dir = tempdir().unwrap();
    let root = dir.path();
    write(root, "ink.toml", "title = \"Demo\"\nbasePath = \"/demo/\"\nlanguage = \"en\"\n");
    write(root, "docs/index.md", "---\ntitle: Welcome\n---\n# Welcome\n\nStart here.\n");
    write(
        root,
        "docs/guide/start.md",
        "# Getting Started\n\n## Install\n\n::: tip\nRun `ink build`.\n:::\n",
    );
    write(root, "themes/default/templates/layout.html", LAYOUT);
    write(root, "themes/default/templates/page.html", PAGE);

    let config = Config::load(Some(&root.join("ink.toml")), None).unwrap();
    let stats = build_site(&config).unwrap();
    assert_eq!(stats.pages, 2);

    let dist = root.join("dist");
    let mut files = Vec::new();
    files_under(&dist, "", &mut files);
    files.sort();
    assert_eq!(
        files,
        vec!["guide/start.html", "index.html", "search-index.json"]
    );

    let index = fs::read_to_string(dist.join("index.html")).unwrap();
    assert!(index.contains("<title>Welcome | Demo</title>"));
    assert!(index.contains(
        r#"<nav><a class="top" href="/demo/index.html">Welcome</a><section data-group="Guide"><a href="/demo/guide/start.html">start</a></section></nav>"#
    ));
    assert!(index.contains(r#"<a class="next" href="/demo/guide/start.html">Getting Started</a>"#));
    assert!(!index.contains(r#"class="prev""#));

    let start = fs::read_to_string(dist.join("guide/start.html")).unwrap();
    assert!(start.contains("<title>Getting Started | Demo</title>"));
    assert!(start.contains(r#"<a class="prev" href="/demo/index.html">Welcome</a>"#));
    assert!(!start.contains(r#"class="next""#));
    assert!(start.contains(r#"<h2 id="install">"#));
    assert!(start.contains(r#"<div class="ink-container ink-tip">"#));

    let search: Value =
        serde_json::from_str(&fs::read_to_string(dist.join("search-index.json")).unwrap()).unwrap();
    let entries: Vec<(&str, &str)> = search
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| (entry["title"].as_str().unwrap(), entry["url"].as_str().unwrap()))
        .collect();
    assert_eq!(
        entries,
        vec![
            ("Welcome", "/demo/index.html"),
            ("guide/start", "/demo/guide/start.html"),
        ]
    );
}

#[test]
fn test_missing_source_dir_is_fatal() {
    let dir = tempdir().unwrap();
    write(dir.path(), "ink.toml", "srcDir = \"nowhere\"\n");

    let config = Config::load(Some(&dir.path().join("ink.toml")), None).unwrap();
    let err = build_site(&config).unwrap_err();
    assert!(err.to_string().contains("Source directory not found"));
}
