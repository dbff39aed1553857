use crate::domain::model::Link;
use crate::render::html::{escape, link, link_title_from_url};
use crate::render::sanitize::Sanitizer;

/// Chainable builder for the repeated blocks of a CV section.
pub struct Fragment<'a> {
    sanitizer: &'a dyn Sanitizer,
    html: String,
}

impl<'a> Fragment<'a> {
    pub fn new(sanitizer: &'a dyn Sanitizer) -> Self {
        Self {
            sanitizer,
            html: String::new(),
        }
    }

    pub fn header(&mut self, title_html: &str) -> &mut Self {
        let title = self.sanitizer.sanitize(title_html);
        self.html.push_str(&format!("<h3>{}</h3>\n", title));
        self
    }

    /// `<p class="dates">range (duration)</p>`; the duration is left out when empty.
    pub fn dates(&mut self, range: &str, duration: &str) -> &mut Self {
        let text = if duration.is_empty() {
            escape(range)
        } else {
            format!("{} ({})", escape(range), escape(duration))
        };
        self.html.push_str(&format!("<p class=\"dates\">{}</p>\n", text));
        self
    }

    /// Unordered list; `prefix` becomes the first item.
    pub fn list<S: AsRef<str>>(&mut self, items: &[S], prefix: Option<&str>) -> &mut Self {
        let items: Vec<String> = prefix
            .into_iter()
            .chain(items.iter().map(|item| item.as_ref()))
            .map(|item| format!("<li>{}</li>", item))
            .collect();
        let list = self.sanitizer.sanitize(&items.join("\n"));
        self.html.push_str(&format!("<ul>\n{}\n</ul>\n", list));
        self
    }

    /// One `<li>` per link: a titled link for screens and the bare address for print.
    pub fn links(&mut self, links: &[Link]) -> &mut Self {
        for item in links {
            let print_title = link_title_from_url(&item.url);
            let title = if item.title.trim().is_empty() {
                escape(&print_title)
            } else {
                item.title.clone()
            };
            let body = format!(
                "<span class=\"web\">{}</span><span class=\"print\">{}</span>",
                link(Some(&item.url), &title),
                escape(&print_title)
            );
            self.html
                .push_str(&format!("<li>{}</li>\n", self.sanitizer.sanitize(&body)));
        }
        self
    }

    pub fn into_html(self) -> String {
        self.html
    }
}
