//! HTML rendering of status updates.
//!
//! The stored text is parsed as CommonMark. HTML typed by the author is
//! demoted to plain text, so the only markup in the result comes from
//! markdown itself and from two link passes that run over every text run
//! outside links, images and code:
//!
//! 1. [`format_update`] links `@user` mentions, `bug 123` references and,
//!    when the status's project has a repository, `pull 45` / `PR 45`.
//! 2. [`urlize`] links bare `http(s)://` and `www.` URLs that are not already
//!    inside an anchor.
//!
//! Both passes take escaped text and only add markup they generate.

use std::sync::OnceLock;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use regex::{Captures, Regex};

use crate::domain::{Project, Status};

/// Bug tracker that `bug NNN` references point at.
pub const BUGZILLA_URL: &str = "https://bugzilla.mozilla.org/show_bug.cgi?id=";

static MENTION_RE: OnceLock<Regex> = OnceLock::new();
static BUG_RE: OnceLock<Regex> = OnceLock::new();
static PULL_RE: OnceLock<Regex> = OnceLock::new();
static URL_RE: OnceLock<Regex> = OnceLock::new();
static TAG_RE: OnceLock<Regex> = OnceLock::new();

fn compiled(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("formatting regex {pattern:?} failed to compile: {error}"))
    })
}

fn mention_regex() -> &'static Regex {
    compiled(&MENTION_RE, r"(^|[^\w@/&;])@([A-Za-z0-9_-]+)")
}

fn bug_regex() -> &'static Regex {
    compiled(&BUG_RE, r"(?i)\bbug\s+#?([0-9]+)\b")
}

fn pull_regex() -> &'static Regex {
    compiled(&PULL_RE, r"(?i)\b(?:pull|pr)\s+#?([0-9]+)\b")
}

fn url_regex() -> &'static Regex {
    compiled(&URL_RE, r"(?i)\b(?:https?://|www\.)(?:[^\s<&]|&amp;)+")
}

fn tag_regex() -> &'static Regex {
    compiled(&TAG_RE, r"<[^>]*>")
}

/// Escape the five HTML-significant characters.
///
/// # Examples
/// ```
/// use standup::domain::formatting::escape_html;
///
/// assert_eq!(escape_html("<b>\"Tom\" & 'Jerry'</b>"),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Project-aware link pass over escaped status text.
pub fn format_update(escaped: &str, project: Option<&Project>) -> String {
    let linked = mention_regex().replace_all(escaped, |caps: &Captures<'_>| {
        format!(r#"{}<a href="/user/{slug}">@{slug}</a>"#, &caps[1], slug = &caps[2])
    });
    let linked = bug_regex().replace_all(&linked, |caps: &Captures<'_>| {
        format!(r#"<a href="{BUGZILLA_URL}{}">{}</a>"#, &caps[1], &caps[0])
    });
    match project.and_then(Project::repo_url) {
        Some(repo) => {
            let repo = escape_html(repo);
            pull_regex()
                .replace_all(&linked, |caps: &Captures<'_>| {
                    format!(r#"<a href="{repo}/pull/{}">{}</a>"#, &caps[1], &caps[0])
                })
                .into_owned()
        }
        None => linked.into_owned(),
    }
}

/// Link bare URLs found in text outside tags and anchors.
pub fn urlize(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut anchor_depth = 0_usize;
    let mut cursor = 0;
    for tag in tag_regex().find_iter(html) {
        push_text(&mut out, &html[cursor..tag.start()], anchor_depth == 0);
        let lowered = tag.as_str().to_ascii_lowercase();
        if lowered.starts_with("<a ") || lowered == "<a>" {
            anchor_depth += 1;
        } else if lowered.starts_with("</a") {
            anchor_depth = anchor_depth.saturating_sub(1);
        }
        out.push_str(tag.as_str());
        cursor = tag.end();
    }
    push_text(&mut out, &html[cursor..], anchor_depth == 0);
    out
}

fn push_text(out: &mut String, text: &str, linkify: bool) {
    if !linkify {
        out.push_str(text);
        return;
    }
    let mut cursor = 0;
    for found in url_regex().find_iter(text) {
        let matched = found.as_str();
        let url = matched.trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\'']);
        let end = found.start() + url.len();
        out.push_str(&text[cursor..found.start()]);
        let href = if url.to_ascii_lowercase().starts_with("www.") {
            format!("http://{url}")
        } else {
            url.to_owned()
        };
        out.push_str(&format!(r#"<a href="{href}" rel="nofollow">{url}</a>"#));
        cursor = end;
    }
    out.push_str(&text[cursor..]);
}

/// Render `source` as CommonMark, linking references in its text runs.
pub fn render_status_text(source: &str, project: Option<&Project>) -> String {
    let mut link_depth = 0_usize;
    let mut in_code_block = false;
    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH);
    let events = TextMergeStream::new(parser).map(|event| match event {
        Event::Start(Tag::Link { .. } | Tag::Image { .. }) => {
            link_depth += 1;
            event
        }
        Event::End(TagEnd::Link | TagEnd::Image) => {
            link_depth = link_depth.saturating_sub(1);
            event
        }
        Event::Start(Tag::CodeBlock(_)) => {
            in_code_block = true;
            event
        }
        Event::End(TagEnd::CodeBlock) => {
            in_code_block = false;
            event
        }
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Text(text) if link_depth == 0 && !in_code_block => {
            Event::InlineHtml(urlize(&format_update(&escape_html(&text), project)).into())
        }
        other => other,
    });
    let mut rendered = String::with_capacity(source.len() * 2);
    html::push_html(&mut rendered, events);
    rendered
}

/// Linked and rendered status text, as shown inside a listing.
pub fn status_body(status: &Status) -> String {
    render_status_text(status.content_html(), status.project())
}

/// Full rendering of a status body, headed by the project name when the
/// status is tagged with one.
pub fn format_status(status: &Status) -> String {
    let body = status_body(status);
    match status.project() {
        Some(project) => format!("<h3>{}</h3>{body}", escape_html(project.name())),
        None => body,
    }
}
