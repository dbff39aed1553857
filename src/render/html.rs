//! Small string helpers for composing markup.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static URL_PREFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://(www\.)?").unwrap());

/// Escapes text for element content and double-quoted attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encodes a URL the way a URL parser serializes it; unparseable
/// input is returned unchanged.
pub fn encode_uri(url: &str) -> String {
    Url::parse(url).map(String::from).unwrap_or_else(|_| url.to_string())
}

/// `<a href="url">title</a>`, or just `title` without a URL. `title_html` is
/// inserted as-is.
pub fn link(url: Option<&str>, title_html: &str) -> String {
    match url.filter(|u| !u.trim().is_empty()) {
        Some(url) => format!("<a href=\"{}\">{}</a>", escape(&encode_uri(url)), title_html),
        None => title_html.to_string(),
    }
}

/// `https://www.github.com/jane/` becomes `github.com/jane`.
pub fn link_title_from_url(url: &str) -> String {
    let stripped = URL_PREFIX.replace(url, "");
    stripped.strip_suffix('/').unwrap_or(&*stripped).to_string()
}
