//! Shape checks for the raw CV document.
//!
//! Validation is fail-fast: the first violated rule is reported with the path
//! of the offending field and its raw value. Checks run in document order:
//! root, required keys, name, summary, contacts, experience, expertise,
//! education.

use crate::core::duration::YearMonth;
use crate::utils::error::CvValidationError;
use chrono::{Datelike, Local};
use serde_json::{Map, Value};
use url::Url;

pub const REQUIRED_FIELDS: [&str; 6] = [
    "name",
    "summary",
    "contacts",
    "experience",
    "expertise",
    "education",
];

const EXPERIENCE_FIELDS: [&str; 6] = [
    "role",
    "company",
    "location",
    "startDate",
    "endDate",
    "achievements",
];

pub const MAX_NAME_LENGTH: usize = 100;
pub const MIN_YEAR: i32 = 1900;
/// How far past the current year a date may point (planned graduations etc).
pub const MAX_YEARS_AHEAD: i32 = 10;

const EMAIL_PARTS: usize = 3;
const PHONE_DIGITS: usize = 10;

type Check = Result<(), CvValidationError>;

fn fail(message: impl Into<String>, field: impl Into<String>, value: &Value) -> Check {
    Err(CvValidationError::new(message, field, value.clone()))
}

fn get<'a>(object: &'a Map<String, Value>, key: &str) -> &'a Value {
    object.get(key).unwrap_or(&Value::Null)
}

fn is_non_empty_text(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.trim().is_empty())
}

fn is_single_digit(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.len() == 1 && s.as_bytes()[0].is_ascii_digit())
}

fn missing_keys(object: &Map<String, Value>, keys: &[&str]) -> Vec<String> {
    keys.iter()
        .filter(|key| !object.contains_key(**key))
        .map(|key| key.to_string())
        .collect()
}

/// Integral JSON numbers, including floats such as `2000.0`.
pub fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && f.abs() <= i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Any string a URL parser accepts; no scheme restriction.
pub fn is_valid_url(value: &Value) -> bool {
    value.as_str().is_some_and(|s| Url::parse(s).is_ok())
}

#[derive(Debug, Clone, Copy)]
pub struct CvValidator {
    current_year: i32,
}

impl Default for CvValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl CvValidator {
    pub fn new() -> Self {
        Self::with_current_year(Local::now().year())
    }

    pub fn with_current_year(current_year: i32) -> Self {
        Self { current_year }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// `YYYY-MM` with the year in `[1900, current year + 10]`.
    pub fn is_valid_date(&self, value: &Value) -> bool {
        value
            .as_str()
            .and_then(|s| s.parse::<YearMonth>().ok())
            .is_some_and(|date| {
                (MIN_YEAR..=self.current_year + MAX_YEARS_AHEAD).contains(&date.year())
            })
    }

    pub fn validate(&self, data: &Value) -> Check {
        let Some(root) = data.as_object() else {
            return fail("CV data must be an object", "root", data);
        };

        Self::validate_required_fields(root)?;
        Self::validate_name(get(root, "name"))?;
        self.validate_summary(get(root, "summary"))?;
        Self::validate_contacts(get(root, "contacts"))?;
        self.validate_experience(get(root, "experience"))?;
        Self::validate_expertise(get(root, "expertise"))?;
        self.validate_education(get(root, "education"))?;

        tracing::debug!("CV document passed validation");
        Ok(())
    }

    fn validate_required_fields(root: &Map<String, Value>) -> Check {
        let missing = missing_keys(root, &REQUIRED_FIELDS);
        if !missing.is_empty() {
            return fail(
                format!("Missing required fields: {}", missing.join(", ")),
                "requiredFields",
                &Value::from(missing),
            );
        }
        Ok(())
    }

    fn validate_name(name: &Value) -> Check {
        let Some(text) = name.as_str().filter(|s| !s.trim().is_empty()) else {
            return fail("Name must be a non-empty string", "name", name);
        };
        if text.chars().count() > MAX_NAME_LENGTH {
            return fail(
                format!("Name must be at most {} characters", MAX_NAME_LENGTH),
                "name",
                name,
            );
        }
        Ok(())
    }

    fn validate_summary(&self, summary: &Value) -> Check {
        let Some(summary) = summary.as_object() else {
            return fail("Summary must be an object", "summary", summary);
        };

        let template = get(summary, "template");
        if !is_non_empty_text(template) {
            return fail(
                "Summary template must be a non-empty string",
                "summary.template",
                template,
            );
        }

        let since = get(summary, "since");
        let in_range = whole_number(since)
            .is_some_and(|year| (i64::from(MIN_YEAR)..=i64::from(self.current_year)).contains(&year));
        if !in_range {
            return fail("Summary since must be a valid year", "summary.since", since);
        }
        Ok(())
    }

    fn validate_contacts(contacts: &Value) -> Check {
        let Some(contacts) = contacts.as_object() else {
            return fail("Contacts must be an object", "contacts", contacts);
        };

        let email = get(contacts, "email");
        match email.as_array() {
            Some(parts) if parts.len() == EMAIL_PARTS => {
                if !parts.iter().all(|p| p.as_str().is_some_and(|s| !s.is_empty())) {
                    return fail(
                        "All email parts must be non-empty strings",
                        "contacts.email",
                        email,
                    );
                }
            }
            _ => {
                return fail(
                    "Email must be an array of 3 strings [domain, subdomain, username]",
                    "contacts.email",
                    email,
                )
            }
        }

        let phone = get(contacts, "phone");
        match phone.as_array() {
            Some(digits) if digits.len() == PHONE_DIGITS => {
                if !digits.iter().all(is_single_digit) {
                    return fail(
                        "All phone parts must be single digit strings",
                        "contacts.phone",
                        phone,
                    );
                }
            }
            _ => {
                return fail(
                    "Phone must be an array of 10 digit strings",
                    "contacts.phone",
                    phone,
                )
            }
        }

        let cv = get(contacts, "cv");
        if !is_valid_url(cv) {
            return fail("CV must be a valid URL", "contacts.cv", cv);
        }

        let location = get(contacts, "location");
        let Some(location) = location.as_object() else {
            return fail("Location must be an object", "contacts.location", location);
        };
        let title = get(location, "title");
        if !is_non_empty_text(title) {
            return fail(
                "Location title must be a non-empty string",
                "contacts.location.title",
                title,
            );
        }

        let links = get(contacts, "links");
        let Some(links) = links.as_array() else {
            return fail("Links must be an array", "contacts.links", links);
        };
        for (index, link) in links.iter().enumerate() {
            let path = format!("contacts.links[{}]", index);
            let Some(entry) = link.as_object() else {
                return fail(format!("Link at index {} must be an object", index), path, link);
            };
            let url = get(entry, "url");
            if !is_valid_url(url) {
                return fail(
                    format!("Link URL at index {} must be valid", index),
                    format!("{}.url", path),
                    url,
                );
            }
            let title = get(entry, "title");
            if !is_non_empty_text(title) {
                return fail(
                    format!("Link title at index {} must be non-empty", index),
                    format!("{}.title", path),
                    title,
                );
            }
        }
        Ok(())
    }

    fn validate_experience(&self, experience: &Value) -> Check {
        let Some(items) = experience.as_array() else {
            return fail("Experience must be an array", "experience", experience);
        };
        items
            .iter()
            .enumerate()
            .try_for_each(|(index, item)| self.validate_experience_item(item, index))
    }

    fn validate_experience_item(&self, item: &Value, index: usize) -> Check {
        let path = format!("experience[{}]", index);
        let Some(entry) = item.as_object() else {
            return fail(
                format!("Experience item at index {} must be an object", index),
                path,
                item,
            );
        };

        let missing = missing_keys(entry, &EXPERIENCE_FIELDS);
        if !missing.is_empty() {
            return fail(
                format!("Experience item {} missing fields: {}", index, missing.join(", ")),
                path,
                &Value::from(missing),
            );
        }

        let role = get(entry, "role");
        if !is_non_empty_text(role) {
            return fail(
                format!("Role at index {} must be non-empty string", index),
                format!("{}.role", path),
                role,
            );
        }

        let company = get(entry, "company");
        let Some(company) = company.as_object() else {
            return fail(
                format!("Company at index {} must be an object", index),
                format!("{}.company", path),
                company,
            );
        };
        let company_name = get(company, "name");
        if !is_non_empty_text(company_name) {
            return fail(
                format!("Company name at index {} must be non-empty", index),
                format!("{}.company.name", path),
                company_name,
            );
        }

        for (key, label) in [("startDate", "Start date"), ("endDate", "End date")] {
            let date = get(entry, key);
            if !self.is_valid_date(date) {
                return fail(
                    format!("{} at index {} must be YYYY-MM format", label, index),
                    format!("{}.{}", path, key),
                    date,
                );
            }
        }

        let achievements = get(entry, "achievements");
        let Some(list) = achievements.as_array() else {
            return fail(
                format!("Achievements at index {} must be an array", index),
                format!("{}.achievements", path),
                achievements,
            );
        };
        if !list.iter().all(is_non_empty_text) {
            return fail(
                format!("All achievements at index {} must be non-empty strings", index),
                format!("{}.achievements", path),
                achievements,
            );
        }
        Ok(())
    }

    fn validate_expertise(expertise: &Value) -> Check {
        let Some(areas) = expertise.as_array() else {
            return fail("Expertise must be an array", "expertise", expertise);
        };

        for (index, area) in areas.iter().enumerate() {
            let path = format!("expertise[{}]", index);
            let Some(entry) = area.as_object() else {
                return fail(
                    format!("Expertise area at index {} must be an object", index),
                    path,
                    area,
                );
            };

            let title = get(entry, "title");
            if !is_non_empty_text(title) {
                return fail(
                    format!("Expertise title at index {} must be non-empty", index),
                    format!("{}.title", path),
                    title,
                );
            }

            let skills = get(entry, "skills");
            match skills.as_array() {
                Some(list) if !list.is_empty() => {
                    if !list.iter().all(is_non_empty_text) {
                        return fail(
                            format!("All skills at index {} must be non-empty strings", index),
                            format!("{}.skills", path),
                            skills,
                        );
                    }
                }
                _ => {
                    return fail(
                        format!("Skills at index {} must be non-empty array", index),
                        format!("{}.skills", path),
                        skills,
                    )
                }
            }
        }
        Ok(())
    }

    fn validate_education(&self, education: &Value) -> Check {
        let Some(items) = education.as_array() else {
            return fail("Education must be an array", "education", education);
        };

        for (index, item) in items.iter().enumerate() {
            let path = format!("education[{}]", index);
            let Some(entry) = item.as_object() else {
                return fail(
                    format!("Education item at index {} must be an object", index),
                    path,
                    item,
                );
            };

            let title = get(entry, "title");
            if !is_non_empty_text(title) {
                return fail(
                    format!("Education title at index {} must be non-empty", index),
                    format!("{}.title", path),
                    title,
                );
            }

            for (key, label) in [("startDate", "start date"), ("endDate", "end date")] {
                let date = get(entry, key);
                if !self.is_valid_date(date) {
                    return fail(
                        format!("Education {} at index {} must be YYYY-MM format", label, index),
                        format!("{}.{}", path, key),
                        date,
                    );
                }
            }

            let place = get(entry, "place");
            if !is_non_empty_text(place) {
                return fail(
                    format!("Education place at index {} must be non-empty", index),
                    format!("{}.place", path),
                    place,
                );
            }

            let info = get(entry, "additionalInfo");
            if !info.is_array() {
                return fail(
                    format!("Additional info at index {} must be an array", index),
                    format!("{}.additionalInfo", path),
                    info,
                );
            }
        }
        Ok(())
    }
}
