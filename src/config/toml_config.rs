use crate::adapters::{HttpSource, LocalSource};
use crate::core::theme::Theme;
use crate::domain::ports::DocumentSource;
use crate::render::{PageOptions, DEFAULT_MAINTENANCE_MESSAGE};
use crate::utils::error::{CvError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub source: SourceConfig,
    pub output: OutputConfig,
    pub page: PageConfig,
}

/// Where `cv.json` lives: a local directory or a base URL. `url` wins when both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub path: Option<String>,
    pub url: Option<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            path: Some("./data".to_string()),
            url: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: "./dist/index.html".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub lang: String,
    pub theme: Theme,
    pub stylesheet: Option<String>,
    pub maintenance_message: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            lang: "en".to_string(),
            theme: Theme::System,
            stylesheet: Some("cv.css".to_string()),
            maintenance_message: DEFAULT_MAINTENANCE_MESSAGE.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| CvError::ConfigParse {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    /// Points the source at a directory, or at a base URL when `data` is `http(s)://`.
    pub fn set_data_location(&mut self, data: &str) {
        if data.starts_with("http://") || data.starts_with("https://") {
            self.source.url = Some(data.to_string());
            self.source.path = None;
        } else {
            self.source.path = Some(data.to_string());
            self.source.url = None;
        }
    }

    pub fn validate_config(&self) -> Result<()> {
        match (&self.source.url, &self.source.path) {
            (Some(url), _) => validation::validate_url("source.url", url)?,
            (None, Some(path)) => validation::validate_path("source.path", path)?,
            (None, None) => {
                return Err(CvError::InvalidConfigValue {
                    field: "source".to_string(),
                    value: String::new(),
                    reason: "Either source.path or source.url must be set".to_string(),
                })
            }
        }

        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_non_empty_string("page.lang", &self.page.lang)?;
        if let Some(stylesheet) = &self.page.stylesheet {
            validation::validate_non_empty_string("page.stylesheet", stylesheet)?;
        }
        validation::validate_non_empty_string(
            "page.maintenance_message",
            &self.page.maintenance_message,
        )?;

        Ok(())
    }

    pub fn document_source(&self) -> Box<dyn DocumentSource> {
        match (&self.source.url, &self.source.path) {
            (Some(url), _) => Box::new(HttpSource::new(url.clone())),
            (None, Some(path)) => Box::new(LocalSource::new(path)),
            (None, None) => Box::new(LocalSource::new(".")),
        }
    }

    pub fn page_options(&self) -> PageOptions {
        PageOptions {
            lang: self.page.lang.clone(),
            theme: self.page.theme,
            stylesheet: self.page.stylesheet.clone(),
        }
    }

    pub fn output_path(&self) -> &str {
        &self.output.path
    }

    pub fn maintenance_message(&self) -> &str {
        &self.page.maintenance_message
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
