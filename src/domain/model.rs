use crate::core::validator::{whole_number, CvValidator};
use crate::utils::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A CV document that has passed [`CvValidator`]. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvDocument {
    pub name: String,
    pub summary: Summary,
    pub contacts: Contacts,
    pub experience: Vec<Experience>,
    pub expertise: Vec<Expertise>,
    pub education: Vec<Education>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Text with `**class**`, `__class__` and `[[class]]` placeholders.
    pub template: String,
    /// Year professional experience started.
    #[serde(deserialize_with = "whole_year")]
    pub since: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contacts {
    /// `[domain, subdomain, username]`, stored split to deter crawlers.
    pub email: Vec<String>,
    /// Encoded digits, see [`crate::core::phone`].
    pub phone: Vec<String>,
    pub cv: String,
    pub location: Location,
    pub links: Vec<Link>,
}

impl Contacts {
    pub fn email_parts(&self) -> EmailParts<'_> {
        let part = |i: usize| self.email.get(i).map(String::as_str).unwrap_or_default();
        EmailParts {
            domain: part(0),
            subdomain: part(1),
            username: part(2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmailParts<'a> {
    pub domain: &'a str,
    pub subdomain: &'a str,
    pub username: &'a str,
}

impl EmailParts<'_> {
    pub fn address(&self) -> String {
        format!("{}@{}.{}", self.username, self.subdomain, self.domain)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub url: Option<String>,
}

/// Where a job took place: either a plain string or `{ name, url }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Place {
    pub name: String,
    pub url: Option<String>,
}

impl From<Value> for Place {
    fn from(value: Value) -> Self {
        match value {
            Value::String(name) => Place { name, url: None },
            Value::Object(map) => Place {
                name: map
                    .get("name")
                    .or_else(|| map.get("title"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                url: map.get("url").and_then(Value::as_str).map(str::to_string),
            },
            _ => Place::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub role: String,
    pub company: Company,
    pub location: Place,
    pub start_date: String,
    pub end_date: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expertise {
    pub title: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub place: String,
    pub additional_info: Vec<Text>,
}

/// Free-form list entry; non-string JSON values keep their JSON text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value")]
pub struct Text(pub String);

impl From<Value> for Text {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Text(s),
            other => Text(other.to_string()),
        }
    }
}

impl AsRef<str> for Text {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

fn whole_year<'de, D>(deserializer: D) -> std::result::Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    whole_number(&value)
        .and_then(|year| i32::try_from(year).ok())
        .ok_or_else(|| serde::de::Error::custom(format!("expected a whole year, got {}", value)))
}

impl CvDocument {
    /// Validates `value` and converts it into the typed model.
    pub fn from_value(value: Value, validator: &CvValidator) -> Result<Self> {
        validator.validate(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    pub fn from_json_str(content: &str, validator: &CvValidator) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value, validator)
    }
}
