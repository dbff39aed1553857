use crate::utils::error::CvError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color scheme of the rendered page. `System` defers to `prefers-color-scheme`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub const ALL: [Theme; 3] = [Theme::Light, Theme::Dark, Theme::System];

    /// Toggle order: light, dark, system, light...
    pub fn next(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::System,
            Theme::System => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Theme::Light => "\u{2600}\u{fe0f}",
            Theme::Dark => "\u{1f319}",
            Theme::System => "\u{1f313}",
        }
    }

    pub fn tooltip(self) -> &'static str {
        match self {
            Theme::Light => "Currently using light mode. Click to switch to dark mode.",
            Theme::Dark => "Currently using dark mode. Click to switch to system theme.",
            Theme::System => "Currently using system theme. Click to switch to light mode.",
        }
    }

    /// Value for the root `data-theme` attribute; none when following the system.
    pub fn data_attribute(self) -> Option<&'static str> {
        match self {
            Theme::System => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = CvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| theme.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CvError::InvalidConfigValue {
                field: "theme".to_string(),
                value: s.to_string(),
                reason: "Expected one of: light, dark, system".to_string(),
            })
    }
}
