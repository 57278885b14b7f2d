//! Inline components: `{% name attr="value" %}`.
//!
//! | Component | Form | Output |
//! |-----------|------|--------|
//! | `badge` | single tag, `type` (default `tip`) and `text` | inline label |
//! | `steps` | `{% steps %}` ... `{% endsteps %}` | styled step list |
//! | `tabs` | `{% tabs %}` `{% tab "Label" %}` ... `{% endtabs %}` | tab switcher |
//! | `player` | single tag, `src`, `title`, `artist` | audio player |
//! | `video` | single tag, `src`, `caption`, `poster` | video embed |
//!
//! Paired components close at the first matching terminator. Unknown tags and
//! openers without a terminator are left as literal text.

use std::fmt::Write;

use crate::directive::ComponentArgs;
use crate::locale::Locale;
use crate::state::escape_html;

const ICON_PLAY: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="currentColor"><polygon points="5,3 19,12 5,21"/></svg>"#;
const ICON_LOOP: &str = r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><path d="m17 2 4 4-4 4"/><path d="M3 11v-1a4 4 0 0 1 4-4h14"/><path d="m7 22-4-4 4-4"/><path d="M21 13v1a4 4 0 0 1-4 4H3"/></svg>"#;

/// Generates element ids for tabs, players and videos.
///
/// One generator is shared by every page of a build so ids are unique across
/// the site and stable between builds of the same input.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: usize,
}

impl IdGenerator {
    /// Create a generator starting at 1.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id with the given prefix, e.g. `tabs_3`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        self.next += 1;
        format!("{prefix}_{}", self.next)
    }
}

/// A `{% ... %}` tag located in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tag<'a> {
    /// Byte offset of `{%`.
    start: usize,
    /// Byte offset just past `%}`.
    end: usize,
    name: &'a str,
    attrs: &'a str,
}

/// Expand every component tag into HTML.
#[must_use]
pub fn expand_components(markdown: &str, locale: Locale, ids: &mut IdGenerator) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut pos = 0;

    while let Some(tag) = find_tag(markdown, pos) {
        out.push_str(&markdown[pos..tag.start]);
        pos = tag.end;

        match tag.name {
            "badge" => render_badge(&ComponentArgs::parse(tag.attrs), &mut out),
            "player" => render_player(&ComponentArgs::parse(tag.attrs), locale, ids, &mut out),
            "video" => render_video(&ComponentArgs::parse(tag.attrs), ids, &mut out),
            "steps" | "tabs" => {
                let terminator = if tag.name == "steps" { "endsteps" } else { "endtabs" };
                let Some(close) = find_named(markdown, tag.end, terminator) else {
                    tracing::warn!(component = tag.name, "Unterminated component left as text");
                    out.push_str(&markdown[tag.start..tag.end]);
                    continue;
                };
                let body = &markdown[tag.end..close.start];
                if tag.name == "steps" {
                    let inner = expand_components(body, locale, ids);
                    let _ = write!(out, "<div class=\"ink-steps\">\n\n{}\n\n</div>", inner.trim());
                } else {
                    render_tabs(body, locale, ids, &mut out);
                }
                pos = close.end;
            }
            _ => out.push_str(&markdown[tag.start..tag.end]),
        }
    }

    out.push_str(&markdown[pos..]);
    out
}

fn render_badge(args: &ComponentArgs, out: &mut String) {
    let _ = write!(
        out,
        r#"<span class="ink-badge ink-badge-{}">{}</span>"#,
        escape_html(args.get_or("type", "tip")),
        escape_html(args.get_or("text", ""))
    );
}

fn render_tabs(body: &str, locale: Locale, ids: &mut IdGenerator, out: &mut String) {
    let tabs = split_tabs(body);
    let uid = ids.next_id("tabs");

    let _ = write!(out, r#"<div class="ink-tabs" id="{uid}"><div class="ink-tabs-nav">"#);
    for (i, (label, _)) in tabs.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        let _ = write!(
            out,
            r#"<button class="ink-tab-btn{active}" onclick="inkSwitchTab('{uid}',{i})">{}</button>"#,
            escape_html(label)
        );
    }
    out.push_str("</div>");

    for (i, (_, content)) in tabs.iter().enumerate() {
        let active = if i == 0 { " active" } else { "" };
        let content = expand_components(content, locale, ids);
        let _ = write!(
            out,
            "<div class=\"ink-tab-panel{active}\">\n\n{}\n\n</div>",
            content.trim()
        );
    }
    out.push_str("</div>");
}

/// Split a tabs body into `(label, content)` pairs.
///
/// Each `{% tab "Label" %}` runs to the next `tab` tag or the end of the body.
/// `{% endtab %}` closers are dropped. Text before the first tab is ignored.
fn split_tabs(body: &str) -> Vec<(String, String)> {
    let mut tabs: Vec<(String, String)> = Vec::new();
    let mut pos = 0;

    while let Some(tag) = find_tag(body, pos) {
        if let Some((_, content)) = tabs.last_mut() {
            content.push_str(&body[pos..tag.start]);
        }
        pos = tag.end;

        match tag.name {
            "tab" => {
                let label = ComponentArgs::parse(tag.attrs)
                    .label
                    .unwrap_or_else(|| format!("Tab {}", tabs.len() + 1));
                tabs.push((label, String::new()));
            }
            "endtab" => {}
            _ => {
                if let Some((_, content)) = tabs.last_mut() {
                    content.push_str(&body[tag.start..tag.end]);
                }
            }
        }
    }

    if let Some((_, content)) = tabs.last_mut() {
        content.push_str(&body[pos..]);
    }
    tabs
}

fn render_player(args: &ComponentArgs, locale: Locale, ids: &mut IdGenerator, out: &mut String) {
    let uid = ids.next_id("player");
    let title = escape_html(args.get_or("title", locale.unknown_track()));
    let artist = escape_html(args.get_or("artist", ""));
    let src = escape_html(args.get_or("src", ""));

    let _ = write!(out, r#"<div class="ink-player" id="{uid}">"#);
    let _ = write!(
        out,
        r#"<button class="ink-player-btn" onclick="inkPlayerToggle('{uid}')">{ICON_PLAY}</button>"#
    );
    out.push_str(r#"<div class="ink-player-info">"#);
    let _ = write!(out, r#"<div class="ink-player-title">{title}</div>"#);
    if !artist.is_empty() {
        let _ = write!(out, r#"<div class="ink-player-artist">{artist}</div>"#);
    }
    out.push_str("</div>");
    out.push_str(r#"<div class="ink-player-progress">"#);
    let _ = write!(out, r#"<span class="ink-player-time" id="{uid}_cur">0:00</span>"#);
    let _ = write!(
        out,
        r#"<div class="ink-player-bar" onclick="inkPlayerSeek(event,'{uid}')"><div class="ink-player-fill" id="{uid}_fill"></div></div>"#
    );
    let _ = write!(out, r#"<span class="ink-player-time" id="{uid}_dur">0:00</span>"#);
    out.push_str("</div>");
    let _ = write!(
        out,
        r#"<button class="ink-player-loop" onclick="inkPlayerLoop('{uid}')" title="{}">{ICON_LOOP}</button>"#,
        locale.loop_label()
    );
    let _ = write!(out, r#"<audio id="{uid}_audio" src="{src}" preload="metadata"></audio>"#);
    out.push_str("</div>");
}

fn render_video(args: &ComponentArgs, ids: &mut IdGenerator, out: &mut String) {
    let uid = ids.next_id("video");
    let caption = args.get_or("caption", "");
    let poster = args.get_or("poster", "");

    out.push_str(r#"<div class="ink-video">"#);
    let _ = write!(out, r#"<div class="ink-video-container" id="{uid}"></div>"#);
    if !caption.is_empty() {
        let _ = write!(
            out,
            r#"<div class="ink-video-caption">{}</div>"#,
            escape_html(caption)
        );
    }
    out.push_str("</div>");

    let poster_option = if poster.is_empty() {
        String::new()
    } else {
        format!(",poster:'{}'", escape_js_string(poster))
    };
    let _ = write!(
        out,
        "<script>document.addEventListener('DOMContentLoaded',function(){{if(typeof Artplayer!=='undefined'){{new Artplayer({{container:'#{uid}',url:'{}'{poster_option},volume:0.7,autoSize:true,fullscreen:true,fullscreenWeb:true,pip:true,playbackRate:true,aspectRatio:true,setting:true,theme:'var(--ink-accent)',lang:navigator.language.startsWith('zh')?'zh-cn':'en'}});}}}});</script>",
        escape_js_string(args.get_or("src", ""))
    );
}

/// Escape a value for a single-quoted JavaScript string inside `<script>`.
fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '<' => out.push_str("\\x3c"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Find the next `{% ... %}` tag at or after `from`.
fn find_tag(text: &str, from: usize) -> Option<Tag<'_>> {
    let start = from + text[from..].find("{%")?;
    let inner_start = start + 2;
    let inner_len = text[inner_start..].find("%}")?;
    let inner = text[inner_start..inner_start + inner_len].trim();
    let (name, attrs) = inner
        .split_once(char::is_whitespace)
        .unwrap_or((inner, ""));

    Some(Tag {
        start,
        end: inner_start + inner_len + 2,
        name,
        attrs: attrs.trim(),
    })
}

/// Find the next tag with the given name at or after `from`.
fn find_named<'a>(text: &'a str, from: usize, name: &str) -> Option<Tag<'a>> {
    let mut pos = from;
    while let Some(tag) = find_tag(text, pos) {
        if tag.name == name {
            return Some(tag);
        }
        pos = tag.end;
    }
    None
}
