//! HTML sanitizing for fragments that carry document content.
//!
//! Fragments built from the CV document may contain light markup (`<strong>`
//! in an achievement, a link in the summary). Before they reach the page they
//! go through a [`Sanitizer`], which the renderer receives as a dependency.

use crate::render::html::escape;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use url::Url;

pub trait Sanitizer: Send + Sync {
    fn sanitize(&self, html: &str) -> String;
}

pub const ALLOWED_TAGS: [&str; 12] = [
    "strong", "span", "i", "b", "em", "a", "ul", "li", "p", "h1", "h2", "h3",
];

pub const ALLOWED_ATTR: [&str; 4] = ["class", "href", "target", "rel"];

/// Tags removed together with everything inside them.
const DROP_WITH_CONTENT: [&str; 8] = [
    "script", "style", "iframe", "object", "embed", "template", "noscript", "textarea",
];

/// Link targets must parse as absolute URLs with one of these schemes.
const ALLOWED_SCHEMES: [&str; 4] = ["http", "https", "mailto", "tel"];

static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<!--.*?-->|<(/?)([A-Za-z][A-Za-z0-9]*)((?:[^>"']|"[^"]*"|'[^']*')*)>"#)
        .unwrap()
});

static CHAR_REF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#[xX]([0-9A-Fa-f]+);?|#([0-9]+);?|([A-Za-z][A-Za-z0-9]*);)").unwrap()
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .unwrap()
});

/// Keeps an allow-list of tags and attributes and drops the rest.
///
/// Disallowed tags are unwrapped (their text stays), script-like elements are
/// removed whole, comments are removed, and every link is forced to open in a
/// new tab with `rel="noopener noreferrer"`.
#[derive(Debug, Clone, Default)]
pub struct AllowListSanitizer;

impl AllowListSanitizer {
    pub fn new() -> Self {
        Self
    }

    /// `value` is already entity-decoded.
    fn is_safe_href(value: &str) -> bool {
        let normalized: String = value
            .chars()
            .filter(|c| !c.is_whitespace() && !c.is_control())
            .collect();
        Url::parse(&normalized)
            .is_ok_and(|url| ALLOWED_SCHEMES.contains(&url.scheme()))
    }

    fn open_tag(name: &str, raw_attributes: &str) -> String {
        let mut tag = format!("<{}", name);
        for caps in ATTRIBUTE.captures_iter(raw_attributes) {
            let attr = caps[1].to_ascii_lowercase();
            if !ALLOWED_ATTR.contains(&attr.as_str()) {
                continue;
            }
            if name == "a" && (attr == "target" || attr == "rel") {
                continue;
            }
            let value = decode_char_refs(Self::attribute_value(&caps));
            if attr == "href" && !Self::is_safe_href(&value) {
                tracing::debug!(href = %value, "Dropped unsafe link target");
                continue;
            }
            tag.push_str(&format!(" {}=\"{}\"", attr, escape(&value)));
        }
        if name == "a" {
            tag.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
        }
        tag.push('>');
        tag
    }

    fn attribute_value<'h>(caps: &Captures<'h>) -> &'h str {
        caps.get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default()
    }
}

/// Resolves character references the way a browser does inside an attribute
/// value; unknown named references are kept as written.
fn decode_char_refs(value: &str) -> String {
    CHAR_REF
        .replace_all(value, |caps: &Captures| {
            let numeric = caps
                .get(1)
                .and_then(|hex| u32::from_str_radix(hex.as_str(), 16).ok())
                .or_else(|| caps.get(2).and_then(|dec| dec.as_str().parse().ok()));
            if let Some(code) = numeric {
                return char::from_u32(code)
                    .filter(|c| *c != '\0')
                    .unwrap_or('\u{FFFD}')
                    .to_string();
            }
            match caps.get(3).map(|name| name.as_str()) {
                Some("amp") => "&".to_string(),
                Some("lt") => "<".to_string(),
                Some("gt") => ">".to_string(),
                Some("quot") => "\"".to_string(),
                Some("apos") => "'".to_string(),
                Some("colon") => ":".to_string(),
                Some("Tab") => "\t".to_string(),
                Some("NewLine") => "\n".to_string(),
                Some("nbsp") => "\u{A0}".to_string(),
                _ => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn escape_text(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

impl Sanitizer for AllowListSanitizer {
    fn sanitize(&self, html: &str) -> String {
        let mut out = String::with_capacity(html.len());
        let mut skipping: Option<String> = None;
        let mut last = 0;

        for caps in TOKEN.captures_iter(html) {
            let Some(whole) = caps.get(0) else { continue };
            if skipping.is_none() {
                out.push_str(&escape_text(&html[last..whole.start()]));
            }
            last = whole.end();

            // comments have no tag name group
            let Some(name) = caps.get(2) else { continue };
            let name = name.as_str().to_ascii_lowercase();
            let closing = !caps[1].is_empty();

            if let Some(dropped) = &skipping {
                if closing && *dropped == name {
                    skipping = None;
                }
                continue;
            }

            if DROP_WITH_CONTENT.contains(&name.as_str()) {
                let self_closing = caps[3].trim_end().ends_with('/');
                if !closing && !self_closing {
                    skipping = Some(name);
                }
                continue;
            }

            if !ALLOWED_TAGS.contains(&name.as_str()) {
                continue;
            }

            if closing {
                out.push_str(&format!("</{}>", name));
            } else {
                out.push_str(&Self::open_tag(&name, &caps[3]));
            }
        }

        if skipping.is_none() {
            out.push_str(&escape_text(&html[last..]));
        }
        out
    }
}
