//! Static HTML rendering of a validated [`CvDocument`].
//!
//! The page skeleton is produced here; every piece that carries document
//! content is composed by a [`Fragment`] or passed through the injected
//! [`Sanitizer`] before it is inserted.

pub mod fragment;
pub mod html;
pub mod sanitize;

pub use fragment::Fragment;
pub use sanitize::{AllowListSanitizer, Sanitizer};

use crate::core::duration::DurationFormatter;
use crate::core::phone;
use crate::core::theme::Theme;
use crate::domain::model::{Contacts, CvDocument, Education, Experience, Expertise, Summary};
use crate::utils::error::Result;
use html::{escape, link};
use regex::{Captures, Regex};
use std::sync::LazyLock;

pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; script-src 'self'; \
style-src 'self' 'unsafe-inline'; img-src 'self' data:; font-src 'self'; connect-src 'self'; \
object-src 'none'; base-uri 'self'";

pub const DEFAULT_MAINTENANCE_MESSAGE: &str =
    "<h1>Site is on maintenance. Please try again later.</h1>";

static STRONG_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(\w+)\*\*").unwrap());
static EM_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"__(\w+)__").unwrap());
static SPAN_PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[\[(\w+)]]").unwrap());

/// Page-level presentation settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOptions {
    pub lang: String,
    pub theme: Theme,
    pub stylesheet: Option<String>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            theme: Theme::System,
            stylesheet: None,
        }
    }
}

pub struct CvRenderer<S: Sanitizer = AllowListSanitizer> {
    sanitizer: S,
    formatter: DurationFormatter,
    options: PageOptions,
}

impl Default for CvRenderer<AllowListSanitizer> {
    fn default() -> Self {
        Self::new(
            AllowListSanitizer::new(),
            DurationFormatter::now(),
            PageOptions::default(),
        )
    }
}

impl<S: Sanitizer> CvRenderer<S> {
    pub fn new(sanitizer: S, formatter: DurationFormatter, options: PageOptions) -> Self {
        Self {
            sanitizer,
            formatter,
            options,
        }
    }

    pub fn options(&self) -> &PageOptions {
        &self.options
    }

    pub fn render(&self, cv: &CvDocument) -> Result<String> {
        tracing::debug!(
            experience = cv.experience.len(),
            expertise = cv.expertise.len(),
            education = cv.education.len(),
            "Rendering CV page"
        );

        let name = escape(&cv.name);
        let mut body = String::new();
        body.push_str(&self.theme_toggle());
        body.push_str(&format!("<header><h1 class=\"author\">{}</h1></header>\n", name));
        body.push_str(&section("summary", "Summary", &self.render_summary(&cv.summary)));
        body.push_str(&section("contacts", "Contacts", &self.render_contacts(&cv.contacts)?));
        body.push_str(&section("experience", "Experience", &self.render_experience(&cv.experience)?));
        body.push_str(&section("skills", "Expertise", &self.render_expertise(&cv.expertise)));
        body.push_str(&section("education", "Education", &self.render_education(&cv.education)?));
        body.push_str(&format!(
            "<footer><span class=\"author\">{}</span> &copy; <span class=\"theCurrentYear\">{}</span></footer>\n",
            name,
            self.formatter.current_year()
        ));

        Ok(self.page(&format!("CV: {}", cv.name), &body))
    }

    /// Static notice shown when no usable CV document could be loaded.
    pub fn render_maintenance(&self, message_html: &str) -> String {
        let body = format!("{}\n", self.sanitizer.sanitize(message_html));
        self.page("CV", &body)
    }

    fn page(&self, title: &str, body: &str) -> String {
        let theme = self
            .options
            .theme
            .data_attribute()
            .map(|t| format!(" data-theme=\"{}\"", t))
            .unwrap_or_default();
        let stylesheet = self
            .options
            .stylesheet
            .as_deref()
            .map(|href| format!("<link rel=\"stylesheet\" href=\"{}\">\n", escape(href)))
            .unwrap_or_default();

        format!(
            "<!DOCTYPE html>\n\
             <html lang=\"{lang}\"{theme}>\n\
             <head>\n\
             <meta charset=\"utf-8\">\n\
             <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
             <meta http-equiv=\"Content-Security-Policy\" content=\"{csp}\">\n\
             <title>{title}</title>\n\
             {stylesheet}\
             </head>\n\
             <body>\n\
             {body}\
             </body>\n\
             </html>\n",
            lang = escape(&self.options.lang),
            theme = theme,
            csp = CONTENT_SECURITY_POLICY,
            title = escape(title),
            stylesheet = stylesheet,
            body = body,
        )
    }

    fn theme_toggle(&self) -> String {
        let theme = self.options.theme;
        format!(
            "<button id=\"theme-toggle\" class=\"theme-toggle\" type=\"button\" title=\"{tip}\" aria-label=\"{tip}\" data-theme=\"{name}\"><span class=\"theme-toggle-icon\">{icon}</span></button>\n",
            tip = escape(theme.tooltip()),
            name = theme,
            icon = theme.icon(),
        )
    }

    /// Expands `**x**`, `__x__` and `[[x]]` into empty elements with class `x`,
    /// filling the classes the renderer knows a value for.
    pub fn render_summary(&self, summary: &Summary) -> String {
        let fill = |class: &str| -> String {
            match class {
                "theProfessionalYears" => escape(&self.formatter.professional_years(summary.since)),
                "theCurrentYear" => self.formatter.current_year().to_string(),
                _ => String::new(),
            }
        };

        let expanded = STRONG_PLACEHOLDER.replace_all(&summary.template, |caps: &Captures| {
            format!("<strong class=\"{0}\">{1}</strong>", &caps[1], fill(&caps[1]))
        });
        let expanded = EM_PLACEHOLDER.replace_all(&expanded, |caps: &Captures| {
            format!("<em class=\"{0}\">{1}</em>", &caps[1], fill(&caps[1]))
        });
        let expanded = SPAN_PLACEHOLDER.replace_all(&expanded, |caps: &Captures| {
            format!("<span class=\"{0}\">{1}</span>", &caps[1], fill(&caps[1]))
        });

        format!("<p>{}</p>\n", self.sanitizer.sanitize(&expanded))
    }

    pub fn render_contacts(&self, contacts: &Contacts) -> Result<String> {
        let plain = phone::decode(&contacts.phone)?;
        let [area, exchange, line] = phone::groups(&plain)?;
        let phone_html = format!(
            "<a class=\"phone\" href=\"{}\">{}</a>",
            escape(&phone::tel_uri(&plain)?),
            self.sanitizer.sanitize(&format!(
                "{}<i>&#0045;</i>{}<i>&#0045;</i>{}",
                area, exchange, line
            ))
        );

        let email = contacts.email_parts();
        let email_html = format!(
            "<span class=\"email\">{}</span>",
            self.sanitizer.sanitize(&format!(
                "{}<b>&#0064;</b>{}.{}",
                escape(email.username),
                escape(email.subdomain),
                escape(email.domain)
            ))
        );

        let location_html = self.sanitizer.sanitize(&link(
            contacts.location.url.as_deref(),
            &contacts.location.title,
        ));
        let cv_html = self
            .sanitizer
            .sanitize(&link(Some(&contacts.cv), &escape(&contacts.cv)));

        let mut links = Fragment::new(&self.sanitizer);
        links.links(&contacts.links);

        Ok(format!(
            "<ul>\n\
             <li class=\"thePhone\">{}</li>\n\
             <li class=\"theEmail\">{}</li>\n\
             <li class=\"theContactsLocation\">{}</li>\n\
             <li class=\"theCV\">{}</li>\n\
             {}\
             </ul>\n",
            phone_html,
            email_html,
            location_html,
            cv_html,
            links.into_html()
        ))
    }

    pub fn render_experience(&self, experience: &[Experience]) -> Result<String> {
        let mut fragment = Fragment::new(&self.sanitizer);
        for item in experience {
            let company = link(item.company.url.as_deref(), &item.company.name);
            let mut title = format!("{} <i>&#0064;</i> {}", item.role, company);
            if !item.location.name.trim().is_empty() {
                let place = link(item.location.url.as_deref(), &item.location.name);
                title.push_str(&format!(" ({})", place));
            }

            fragment
                .header(&title)
                .dates(
                    &self.formatter.format_range_str(&item.start_date, &item.end_date)?,
                    &self.formatter.format_duration_str(&item.start_date, &item.end_date)?,
                )
                .list(&item.achievements, None);
        }
        Ok(fragment.into_html())
    }

    pub fn render_expertise(&self, expertise: &[Expertise]) -> String {
        let mut fragment = Fragment::new(&self.sanitizer);
        for area in expertise {
            fragment.header(&area.title).list(&area.skills, None);
        }
        fragment.into_html()
    }

    pub fn render_education(&self, education: &[Education]) -> Result<String> {
        let mut fragment = Fragment::new(&self.sanitizer);
        for item in education {
            fragment
                .header(&item.title)
                .dates(
                    &self.formatter.format_range_str(&item.start_date, &item.end_date)?,
                    &self.formatter.format_duration_str(&item.start_date, &item.end_date)?,
                )
                .list(&item.additional_info, Some(&item.place));
        }
        Ok(fragment.into_html())
    }
}

fn section(class: &str, heading: &str, content: &str) -> String {
    format!(
        "<section class=\"{}\">\n<h2>{}</h2>\n{}</section>\n",
        class, heading, content
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Company, Place, Text};
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn renderer() -> CvRenderer {
        CvRenderer::new(
            AllowListSanitizer::new(),
            DurationFormatter::at(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()),
            PageOptions::default(),
        )
    }

    #[derive(Default)]
    struct RecordingSanitizer {
        calls: Mutex<Vec<String>>,
    }

    impl Sanitizer for RecordingSanitizer {
        fn sanitize(&self, html: &str) -> String {
            self.calls.lock().unwrap().push(html.to_string());
            html.to_string()
        }
    }

    #[test]
    fn test_summary_placeholders() {
        let summary = Summary {
            template: "**theProfessionalYears** of work, __focus__ until [[theCurrentYear]]"
                .to_string(),
            since: 2014,
        };
        assert_eq!(
            renderer().render_summary(&summary),
            "<p><strong class=\"theProfessionalYears\">12 years</strong> of work, \
             <em class=\"focus\"></em> until <span class=\"theCurrentYear\">2026</span></p>\n"
        );
    }

    #[test]
    fn test_experience_block() {
        let html = renderer()
            .render_experience(&[Experience {
                role: "Engineer".to_string(),
                company: Company {
                    name: "Acme".to_string(),
                    url: Some("https://acme.example".to_string()),
                },
                location: Place {
                    name: "Remote".to_string(),
                    url: None,
                },
                start_date: "2020-01".to_string(),
                end_date: "2022-07".to_string(),
                achievements: vec!["Shipped <strong>v2</strong>".to_string()],
            }])
            .unwrap();

        assert!(html.contains("Engineer <i>&#0064;</i> <a href=\"https://acme.example/\""));
        assert!(html.contains("(Remote)</h3>"));
        assert!(html.contains("<p class=\"dates\">Jan 2020\u{2013}Jul 2022 (2 years, 6 months)</p>"));
        assert!(html.contains("<li>Shipped <strong>v2</strong></li>"));
    }

    #[test]
    fn test_education_place_leads_the_list() {
        let html = renderer()
            .render_education(&[Education {
                title: "BSc Computer Science".to_string(),
                start_date: "2010-09".to_string(),
                end_date: "2014-06".to_string(),
                place: "State University".to_string(),
                additional_info: vec![Text("Honours".to_string())],
            }])
            .unwrap();
        assert!(html.contains("<ul>\n<li>State University</li>\n<li>Honours</li>\n</ul>"));
        assert!(html.contains("(3 years, 9 months)"));
    }

    #[test]
    fn test_maintenance_page_is_sanitized() {
        let html = renderer().render_maintenance("<h1>Back soon</h1><script>x()</script>");
        assert!(html.contains("<body>\n<h1>Back soon</h1>\n</body>"));
        assert!(!html.contains("script>"));
    }

    #[test]
    fn test_content_passes_through_injected_sanitizer() {
        let sanitizer = RecordingSanitizer::default();
        let renderer = CvRenderer::new(
            sanitizer,
            DurationFormatter::at(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()),
            PageOptions::default(),
        );
        renderer.render_expertise(&[Expertise {
            title: "Languages".to_string(),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
        }]);

        let calls = renderer.sanitizer.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), ["Languages", "<li>Rust</li>\n<li>SQL</li>"]);
    }

    #[test]
    fn test_theme_attribute() {
        let dark = CvRenderer::new(
            AllowListSanitizer::new(),
            DurationFormatter::at(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()),
            PageOptions {
                theme: Theme::Dark,
                stylesheet: Some("cv.css".to_string()),
                ..PageOptions::default()
            },
        );
        let html = dark.render_maintenance("down");
        assert!(html.contains("<html lang=\"en\" data-theme=\"dark\">"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"cv.css\">"));

        let system = renderer().render_maintenance("down");
        assert!(system.contains("<html lang=\"en\">"));
    }
}
